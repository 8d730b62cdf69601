use log::info;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::quiz::definition::{string_or_null, Quiz, QuizId};
use crate::store::RecordDir;

const USER_PREFIX: &'static str = "user";

/// On-disk shapes of a completion. The oldest records only kept the score.
#[derive(Clone, Deserialize, Serialize)]
#[serde(untagged)]
enum StoredCompletion {
    Detailed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        score: u32,
    },
    Legacy(u32),
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "StoredCompletion", into = "StoredCompletion")]
pub struct Completion {
    /// Title at completion time, `None` for records that predate title snapshots.
    pub title: Option<String>,
    pub score: u32,
}

impl Completion {
    pub fn title_or<'a>(&'a self, quiz: Option<&'a Quiz>) -> Option<&'a str> {
        self.title
            .as_deref()
            .or_else(|| quiz.map(|q| q.title.as_str()))
    }
}

impl From<StoredCompletion> for Completion {
    fn from(stored: StoredCompletion) -> Self {
        match stored {
            StoredCompletion::Detailed { title, score } => Completion { title, score },
            StoredCompletion::Legacy(score) => Completion { title: None, score },
        }
    }
}

impl From<Completion> for StoredCompletion {
    fn from(completion: Completion) -> Self {
        match completion.title {
            Some(title) => StoredCompletion::Detailed {
                title: Some(title),
                score: completion.score,
            },
            None => StoredCompletion::Legacy(completion.score),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ProgressRecord {
    pub user_id: u64,
    #[serde(alias = "username", default, deserialize_with = "string_or_null")]
    pub display_name: String,
    #[serde(alias = "completed_tests", default)]
    pub completions: BTreeMap<QuizId, Completion>,
}

impl ProgressRecord {
    fn new(user_id: u64, display_name: &str) -> Self {
        ProgressRecord {
            user_id,
            display_name: display_name.to_owned(),
            completions: BTreeMap::new(),
        }
    }
}

/// Per-user completion records.
#[derive(Debug)]
pub struct ProgressRepository {
    records: RecordDir,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl ProgressRepository {
    pub fn open(dir: &Path) -> Result<Self> {
        Ok(ProgressRepository {
            records: RecordDir::open(dir, USER_PREFIX)?,
            write_lock: Mutex::new(()),
        })
    }

    /// Inserts or overwrites the user's entry for this quiz. The latest attempt wins.
    pub fn record_completion(
        &self,
        user_id: u64,
        display_name: &str,
        quiz_id: &QuizId,
        quiz_title: &str,
        score: u32,
    ) -> Result<()> {
        let _guard = self.write_lock.lock();
        let key = user_id.to_string();
        let mut record = self
            .records
            .read::<ProgressRecord>(&key)?
            .unwrap_or_else(|| ProgressRecord::new(user_id, display_name));
        record.display_name = display_name.to_owned();
        record.completions.insert(
            quiz_id.clone(),
            Completion {
                title: Some(quiz_title.to_owned()),
                score,
            },
        );
        self.records.replace(&key, &record)?;
        info!(
            "Recorded score {} on quiz {} for user {}",
            score, quiz_id, user_id
        );
        Ok(())
    }

    pub fn get(&self, user_id: u64) -> Result<ProgressRecord> {
        self.records
            .read(&user_id.to_string())?
            .ok_or_else(|| Error::NotFound(format!("Progress of user {}", user_id)))
    }

    pub fn list_all(&self) -> Result<Vec<ProgressRecord>> {
        self.records.read_all()
    }
}
