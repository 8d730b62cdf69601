use anyhow::{anyhow, Context, Result};
use directories_next::BaseDirs;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const GENAPI_DEFAULT_URL: &'static str = "https://api.gen-api.ru/api/v1/networks/gpt-4o-mini";

#[derive(Clone, Debug)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub admin_id: u64,
    pub question_count: usize,
    pub id_length: usize,
    pub max_listed_quizzes: usize,
    pub genapi_url: String,
    pub genapi_key: String,
    pub generation_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: PathBuf::from("quizcraft-data"),
            admin_id: 0,
            question_count: 10,
            id_length: 6,
            max_listed_quizzes: 10,
            genapi_url: GENAPI_DEFAULT_URL.to_owned(),
            genapi_key: String::new(),
            generation_timeout: Duration::from_secs(60),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Settings> {
        let defaults = Settings::default();

        let data_dir = match env::var_os("QUIZCRAFT_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let settings = Settings {
            data_dir,
            admin_id: parse_var("QUIZCRAFT_ADMIN_ID", defaults.admin_id)?,
            question_count: parse_var("QUIZCRAFT_QUESTION_COUNT", defaults.question_count)?,
            id_length: parse_var("QUIZCRAFT_ID_LENGTH", defaults.id_length)?,
            max_listed_quizzes: parse_var("QUIZCRAFT_MAX_LISTED", defaults.max_listed_quizzes)?,
            genapi_url: env::var("GENAPI_URL").unwrap_or(defaults.genapi_url),
            genapi_key: env::var("GENAPI_KEY").unwrap_or(defaults.genapi_key),
            generation_timeout: Duration::from_secs(parse_var(
                "QUIZCRAFT_GENERATION_TIMEOUT_SECS",
                defaults.generation_timeout.as_secs(),
            )?),
        };

        if settings.question_count == 0 {
            return Err(anyhow!("QUIZCRAFT_QUESTION_COUNT must be at least 1"));
        }
        if settings.id_length == 0 {
            return Err(anyhow!("QUIZCRAFT_ID_LENGTH must be at least 1"));
        }

        Ok(settings)
    }

    pub fn quizzes_dir(&self) -> PathBuf {
        self.data_dir.join("quizzes")
    }

    pub fn progress_dir(&self) -> PathBuf {
        self.data_dir.join("progress")
    }

    pub fn stats_dir(&self) -> PathBuf {
        self.data_dir.join("stats")
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let mut dir = BaseDirs::new()
        .context("could not locate system directories")?
        .data_dir()
        .to_path_buf();
    dir.push("quizcraft");
    Ok(dir)
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Could not parse {} from {:?}", name, value)),
        Err(_) => Ok(default),
    }
}
