use anyhow::Result;

use crate::error::Error;
use crate::quiz::definition::QuizDraft;

pub mod genapi;

pub use genapi::GenApiGenerator;


/// Produces quiz content for a topic.
pub trait QuestionGenerator: Send + Sync {
    fn generate(&self, topic: &str, question_count: usize) -> Result<QuizDraft>;
}

/// Parses generated JSON without trusting its shape.
pub fn parse_draft(content: &str, question_count: usize) -> Result<QuizDraft> {
    let draft: QuizDraft = serde_json::from_str(content)
        .map_err(|e| Error::InvalidGeneratedContent(format!("malformed JSON ({})", e)))?;
    Ok(draft.validate(question_count)?)
}
