use itertools::Itertools;
use log::warn;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::Result;
use crate::quiz::definition::{Quiz, QuizId};
use crate::store::{ProgressRepository, QuizRepository};

pub mod export;


#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "User ID")]
    pub user_id: u64,
    #[serde(rename = "Username")]
    pub display_name: String,
    #[serde(rename = "Quiz ID")]
    pub quiz_id: QuizId,
    #[serde(rename = "Quiz Title")]
    pub quiz_title: String,
    #[serde(rename = "Score")]
    pub score: u32,
}

pub struct StatisticsAggregator<'a> {
    quizzes: &'a QuizRepository,
    progress: &'a ProgressRepository,
}

impl<'a> StatisticsAggregator<'a> {
    pub fn new(quizzes: &'a QuizRepository, progress: &'a ProgressRepository) -> Self {
        StatisticsAggregator { quizzes, progress }
    }

    /// Every completion of a quiz made by `creator_id`, ordered by user then quiz.
    pub fn report_for(&self, creator_id: u64) -> Result<Vec<ReportRow>> {
        let mut quiz_cache: HashMap<QuizId, Option<Quiz>> = HashMap::new();
        let mut rows = Vec::new();

        for record in self.progress.list_all()? {
            for (quiz_id, completion) in &record.completions {
                let quiz = quiz_cache
                    .entry(quiz_id.clone())
                    .or_insert_with(|| match self.quizzes.get(quiz_id) {
                        Ok(quiz) => Some(quiz),
                        Err(e) => {
                            warn!("Skipping completions of quiz {}: {}", quiz_id, e);
                            None
                        }
                    });
                let quiz = match quiz.as_ref() {
                    Some(quiz) if quiz.is_created_by(creator_id) => quiz,
                    _ => continue,
                };
                rows.push(ReportRow {
                    user_id: record.user_id,
                    display_name: record.display_name.clone(),
                    quiz_id: quiz_id.clone(),
                    quiz_title: completion.title_or(Some(quiz)).unwrap_or_default().to_owned(),
                    score: completion.score,
                });
            }
        }

        Ok(rows
            .into_iter()
            .sorted_by(|a, b| (a.user_id, &a.quiz_id).cmp(&(b.user_id, &b.quiz_id)))
            .collect())
    }
}
