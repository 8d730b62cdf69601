use log::warn;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub mod identifier;
pub mod progress;
pub mod quizzes;

pub use identifier::IdentifierAllocator;
pub use progress::ProgressRepository;
pub use quizzes::QuizRepository;


const RECORD_EXTENSION: &'static str = ".json";

/// A flat directory of JSON records named `<prefix>_<key>.json`.
///
/// Records are always written to a hidden temporary file first and then moved into place,
/// so a reader opening the final path sees either the previous record or the new one.
#[derive(Debug)]
pub struct RecordDir {
    dir: PathBuf,
    prefix: &'static str,
}

impl RecordDir {
    pub fn open(dir: &Path, prefix: &'static str) -> Result<RecordDir> {
        fs::create_dir_all(dir)?;
        Ok(RecordDir {
            dir: dir.to_path_buf(),
            prefix,
        })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}_{}{}", self.prefix, key, RECORD_EXTENSION))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_reader(BufReader::new(file))
            .map(Some)
            .map_err(|source| Error::Corrupt {
                path: path.to_string_lossy().into_owned(),
                source,
            })
    }

    /// Writes a record, replacing any previous version.
    pub fn replace<T: Serialize>(&self, key: &str, record: &T) -> Result<()> {
        let temp_path = self.write_temp(key, record)?;
        fs::rename(&temp_path, self.path_for(key)).map_err(|e| {
            fs::remove_file(&temp_path).ok();
            Error::Io(e)
        })
    }

    /// Writes a record that must not exist yet.
    pub fn create<T: Serialize>(&self, key: &str, record: &T) -> Result<()> {
        let temp_path = self.write_temp(key, record)?;
        // Unlike rename, hard_link refuses to clobber an existing record.
        let result = fs::hard_link(&temp_path, self.path_for(key));
        fs::remove_file(&temp_path).ok();
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(Error::DuplicateIdentifier(key.to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Keys of every committed record, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let record_prefix = format!("{}_", self.prefix);
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let file_name = entry?.file_name();
            let file_name = match file_name.to_str() {
                Some(name) => name,
                None => continue,
            };
            if let Some(key) = file_name
                .strip_prefix(record_prefix.as_str())
                .and_then(|rest| rest.strip_suffix(RECORD_EXTENSION))
            {
                keys.push(key.to_owned());
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Reads every committed record, skipping (and logging) the ones that cannot be read.
    pub fn read_all<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let mut records = Vec::new();
        for key in self.keys()? {
            match self.read(&key) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => (),
                Err(e) => warn!("Skipping unreadable record {:?}: {}", key, e),
            }
        }
        Ok(records)
    }

    fn write_temp<T: Serialize>(&self, key: &str, record: &T) -> Result<PathBuf> {
        let nonce: String = thread_rng().sample_iter(&Alphanumeric).take(8).collect();
        let temp_path = self
            .dir
            .join(format!(".{}_{}.{}.tmp", self.prefix, key, nonce));

        let write = || -> Result<()> {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, record).map_err(|source| {
                Error::Corrupt {
                    path: temp_path.to_string_lossy().into_owned(),
                    source,
                }
            })?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            Ok(())
        }();

        if let Err(e) = write {
            fs::remove_file(&temp_path).ok();
            return Err(e);
        }
        Ok(temp_path)
    }
}
