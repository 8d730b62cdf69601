use std::path::PathBuf;

use crate::quiz::{Outcome, Question, QuizId};

pub mod discord;

#[derive(Clone, Debug, PartialEq)]
pub struct QuizSummary {
    pub id: QuizId,
    pub title: String,
    pub category: String,
    pub question_count: usize,
    pub total_points: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressLine {
    pub quiz_id: QuizId,
    pub title: String,
    pub score: u32,
    /// Unknown when the quiz can no longer be read.
    pub total_points: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Welcome,
    Generating(String),
    Preview {
        index: usize,
        total: usize,
        question: Question,
    },
    QuizPublished {
        id: QuizId,
        title: String,
    },
    AuthoringCancelled,
    NoDraft,
    MyQuizzes(Vec<QuizSummary>),
    NoQuizzesCreated,
    AvailableQuizzes(Vec<QuizSummary>),
    NoQuizzesAvailable,
    QuestionBegins {
        index: usize,
        total: usize,
        question_text: String,
        options: Vec<String>,
    },
    QuizResults(Outcome),
    NoActiveQuiz,
    Progress(Vec<ProgressLine>),
    NoProgress,
    StatisticsReady(PathBuf),
    NoStatistics,
    AdminOnly,
    Failure(String),
}
