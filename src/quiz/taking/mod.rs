use log::{debug, warn};

use crate::error::{Error, Result};
use crate::quiz::definition::{Question, Quiz, QuizId};
use crate::store::{ProgressRepository, QuizRepository};

#[cfg(test)]
mod tests;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnswerRecord {
    pub question_text: String,
    pub chosen_option: String,
    pub correct_option_display: String,
    pub points_awarded: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub quiz_id: QuizId,
    pub title: String,
    pub score: u32,
    pub total_points: u32,
    pub answers: Vec<AnswerRecord>,
}

impl Outcome {
    pub fn percentage(&self) -> f64 {
        if self.total_points == 0 {
            return 0.0;
        }
        self.score as f64 / self.total_points as f64 * 100.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    /// The answer targeted a question other than the current one, or an option that does not exist.
    Ignored,
    Answered(AnswerRecord),
    Finished(Outcome),
}

/// One user's run through a published quiz. Nothing is persisted until the last answer.
#[derive(Debug)]
pub struct TakingSession {
    user_id: u64,
    display_name: String,
    quiz: Quiz,
    current_index: usize,
    score: u32,
    answer_log: Vec<AnswerRecord>,
    is_finished: bool,
}

impl TakingSession {
    pub fn begin(
        quizzes: &QuizRepository,
        quiz_id: &QuizId,
        user_id: u64,
        display_name: &str,
    ) -> Result<TakingSession> {
        let quiz = quizzes.get(quiz_id)?;
        if quiz.questions.is_empty() {
            return Err(Error::InvalidSessionState("This quiz has no questions"));
        }
        debug!("User {} begins quiz {}", user_id, quiz_id);
        Ok(TakingSession {
            user_id,
            display_name: display_name.to_owned(),
            quiz,
            current_index: 0,
            score: 0,
            answer_log: Vec::new(),
            is_finished: false,
        })
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[cfg(test)]
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.is_finished {
            return None;
        }
        self.quiz.questions.get(self.current_index)
    }

    pub fn submit_answer(
        &mut self,
        progress: &ProgressRepository,
        question_index: usize,
        option_index: usize,
    ) -> Result<Submission> {
        if self.is_finished {
            return Err(Error::InvalidSessionState("This quiz is already over"));
        }
        if question_index != self.current_index {
            debug!(
                "Ignoring stale answer to question {} (current is {})",
                question_index, self.current_index
            );
            return Ok(Submission::Ignored);
        }

        let question = &self.quiz.questions[self.current_index];
        let chosen_option = match question.options.get(option_index) {
            Some(option) => option.clone(),
            None => {
                warn!(
                    "Ignoring answer with unknown option {} for question {}",
                    option_index, question_index
                );
                return Ok(Submission::Ignored);
            }
        };

        let points_awarded = if question.is_answer_correct(option_index) {
            self.quiz.points_per_question
        } else {
            0
        };
        let record = AnswerRecord {
            question_text: question.question_text.clone(),
            chosen_option,
            correct_option_display: question.displayed_answer().to_owned(),
            points_awarded,
        };
        let score = self.score.saturating_add(points_awarded);

        // The final answer only counts once the completion is durable.
        let is_last = self.current_index + 1 == self.quiz.questions.len();
        if is_last {
            progress.record_completion(
                self.user_id,
                &self.display_name,
                self.quiz.id(),
                &self.quiz.title,
                score,
            )?;
        }

        self.score = score;
        self.answer_log.push(record.clone());
        self.current_index += 1;

        if is_last {
            self.is_finished = true;
            Ok(Submission::Finished(Outcome {
                quiz_id: self.quiz.id().clone(),
                title: self.quiz.title.clone(),
                score: self.score,
                total_points: self.quiz.total_points(),
                answers: self.answer_log.clone(),
            }))
        } else {
            Ok(Submission::Answered(record))
        }
    }
}
