use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Question {
    #[serde(default)]
    pub topic: String,
    pub question_text: String,
    pub options: Vec<String>,
    #[serde(alias = "answers")]
    pub correct_answer_indices: Vec<usize>,
}

impl Question {
    pub fn is_answer_correct(&self, option_index: usize) -> bool {
        self.correct_answer_indices.contains(&option_index)
    }

    /// The option shown as "the" correct answer, even when several are accepted.
    pub fn displayed_answer(&self) -> &str {
        self.correct_answer_indices
            .first()
            .and_then(|index| self.options.get(*index))
            .map(|option| option.as_str())
            .unwrap_or_default()
    }

    pub fn validate(&self, position: usize) -> Result<()> {
        let invalid = |reason: &str| {
            Err(Error::InvalidGeneratedContent(format!(
                "question {} {}",
                position + 1,
                reason
            )))
        };
        if self.question_text.trim().is_empty() {
            return invalid("has no text");
        }
        if self.options.len() < 2 {
            return invalid("has fewer than two options");
        }
        if self.correct_answer_indices.is_empty() {
            return invalid("has no correct answer");
        }
        if self
            .correct_answer_indices
            .iter()
            .any(|index| *index >= self.options.len())
        {
            return invalid("points to an option that does not exist");
        }
        Ok(())
    }
}
