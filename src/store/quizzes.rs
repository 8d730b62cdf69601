use log::info;
use std::path::Path;

use crate::error::{Error, Result};
use crate::quiz::definition::{Quiz, QuizId};
use crate::store::RecordDir;

const QUIZ_PREFIX: &'static str = "quiz";

/// Published quizzes, one immutable record per ID.
#[derive(Debug)]
pub struct QuizRepository {
    records: RecordDir,
}

impl QuizRepository {
    pub fn open(dir: &Path) -> Result<Self> {
        Ok(QuizRepository {
            records: RecordDir::open(dir, QUIZ_PREFIX)?,
        })
    }

    pub fn put(&self, quiz: &Quiz) -> Result<()> {
        self.records.create(quiz.id().as_str(), quiz)?;
        info!(
            "Stored quiz {} ({:?}) by {}",
            quiz.id(),
            quiz.title,
            quiz.metadata.creator_id
        );
        Ok(())
    }

    pub fn get(&self, id: &QuizId) -> Result<Quiz> {
        self.records
            .read(id.as_str())?
            .ok_or_else(|| Error::NotFound(format!("Quiz {}", id)))
    }

    pub fn contains(&self, id: &QuizId) -> bool {
        self.records.contains(id.as_str())
    }

    pub fn list_all(&self) -> Result<Vec<Quiz>> {
        self.records.read_all()
    }
}
