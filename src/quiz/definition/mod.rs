use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::convert::TryFrom;
use std::fmt;

use crate::error::{Error, Result};

pub mod question;

pub use question::Question;

#[cfg(test)]
mod tests;

lazy_static! {
    static ref QUIZ_ID_REGEX: Regex = Regex::new("^[A-Za-z0-9]+$").unwrap();
}

/// Older records were written with `null` when the author had no username.
pub(crate) fn string_or_null<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_points_per_question() -> u32 {
    1
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct QuizId(String);

impl QuizId {
    pub fn parse(id: &str) -> Result<QuizId> {
        let id = id.trim();
        if QUIZ_ID_REGEX.is_match(id) {
            Ok(QuizId(id.to_owned()))
        } else {
            Err(Error::NotFound(format!("Quiz {:?}", id)))
        }
    }

    pub(crate) fn from_trusted(id: String) -> QuizId {
        QuizId(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generated content that has not been published yet.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct QuizDraft {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(alias = "points_per_mcq", default = "default_points_per_question")]
    pub points_per_question: u32,
    #[serde(alias = "question_options")]
    pub questions: Vec<Question>,
}

impl QuizDraft {
    /// Checks the structural shape of generated content and drops any surplus questions.
    pub fn validate(mut self, question_count: usize) -> Result<QuizDraft> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidGeneratedContent("the quiz has no title".into()));
        }
        if self.points_per_question == 0 {
            return Err(Error::InvalidGeneratedContent(
                "questions must be worth at least one point".into(),
            ));
        }
        if self.questions.len() < question_count.max(1) {
            return Err(Error::InvalidGeneratedContent(format!(
                "expected {} questions, got {}",
                question_count,
                self.questions.len()
            )));
        }
        self.questions.truncate(question_count);
        for (position, question) in self.questions.iter().enumerate() {
            question.validate(position)?;
        }
        Ok(self)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Metadata {
    pub id: QuizId,
    pub created_at: NaiveDateTime,
    pub creator_id: u64,
    #[serde(alias = "creator_username", default, deserialize_with = "string_or_null")]
    pub creator_display_name: String,
    pub total_points: u32,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Quiz {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(alias = "points_per_mcq")]
    pub points_per_question: u32,
    #[serde(alias = "question_options")]
    pub questions: Vec<Question>,
    pub metadata: Metadata,
}

impl Quiz {
    pub fn new(
        id: QuizId,
        draft: QuizDraft,
        points_per_question: u32,
        creator_id: u64,
        creator_display_name: &str,
        created_at: NaiveDateTime,
    ) -> Result<Quiz> {
        let total_points = Quiz::checked_total_points(draft.questions.len(), points_per_question)
            .ok_or_else(|| {
                Error::InvalidGeneratedContent(format!(
                    "{} points per question is too many",
                    points_per_question
                ))
            })?;
        Ok(Quiz {
            title: draft.title,
            category: draft.category,
            points_per_question,
            questions: draft.questions,
            metadata: Metadata {
                id,
                created_at,
                creator_id,
                creator_display_name: creator_display_name.to_owned(),
                total_points,
            },
        })
    }

    /// `None` when the total does not fit the score range.
    pub fn checked_total_points(question_count: usize, points_per_question: u32) -> Option<u32> {
        u32::try_from(question_count)
            .ok()?
            .checked_mul(points_per_question)
    }

    pub fn id(&self) -> &QuizId {
        &self.metadata.id
    }

    pub fn total_points(&self) -> u32 {
        self.metadata.total_points
    }

    pub fn is_created_by(&self, creator_id: u64) -> bool {
        self.metadata.creator_id == creator_id
    }
}
