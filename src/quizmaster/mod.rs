use log::{debug, error, info, warn};
use std::sync::Arc;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::generator::QuestionGenerator;
use crate::output::{Message, ProgressLine, QuizSummary};
use crate::quiz::{AuthoringSession, Direction, Quiz, QuizId, Submission, TakingSession};
use crate::session::{ActiveSession, SessionStore};
use crate::statistics::export::export_csv;
use crate::statistics::StatisticsAggregator;
use crate::store::{IdentifierAllocator, ProgressRepository, QuizRepository};


/// Entry point for every user action. Each operation answers with the message the user should see.
pub struct Quizmaster {
    settings: Settings,
    quizzes: QuizRepository,
    progress: ProgressRepository,
    allocator: IdentifierAllocator,
    generator: Box<dyn QuestionGenerator>,
    sessions: Arc<dyn SessionStore>,
}

impl Quizmaster {
    pub fn new(
        settings: Settings,
        generator: Box<dyn QuestionGenerator>,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Quizmaster> {
        let quizzes = QuizRepository::open(&settings.quizzes_dir())?;
        let progress = ProgressRepository::open(&settings.progress_dir())?;
        let allocator = IdentifierAllocator::new(settings.id_length);
        info!("Quiz data lives in {:?}", settings.data_dir);
        Ok(Quizmaster {
            settings,
            quizzes,
            progress,
            allocator,
            generator,
            sessions,
        })
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.settings.admin_id != 0 && self.settings.admin_id == user_id
    }

    pub fn start_authoring(&self, user_id: u64, topic: &str) -> Message {
        let topic = topic.trim();
        if topic.is_empty() {
            return Message::Failure("Please name a topic for the quiz".into());
        }

        let draft = match self.generator.generate(topic, self.settings.question_count) {
            Ok(draft) => draft,
            Err(e) => {
                warn!("Quiz generation for user {} failed: {:#}", user_id, e);
                return Message::Failure(format!("Could not generate a quiz: {}", e));
            }
        };

        let mut session = AuthoringSession::new();
        if let Err(e) = session.start(draft) {
            return Message::Failure(e.to_string());
        }
        let message = preview_message(&session);
        self.sessions
            .insert(user_id, ActiveSession::Authoring(session));
        message
    }

    pub fn navigate_preview(&self, user_id: u64, direction: Direction) -> Message {
        let handle = match self.sessions.get(user_id) {
            Some(handle) => handle,
            None => return Message::NoDraft,
        };
        let mut active = handle.lock();
        match &mut *active {
            ActiveSession::Authoring(session) => {
                let moved = match direction {
                    Direction::Forward => session.advance(),
                    Direction::Backward => session.retreat(),
                };
                match moved {
                    Ok(_) => preview_message(session),
                    Err(_) => Message::NoDraft,
                }
            }
            _ => Message::NoDraft,
        }
    }

    pub fn publish(&self, user_id: u64, display_name: &str, points: Option<u32>) -> Message {
        let handle = match self.sessions.get(user_id) {
            Some(handle) => handle,
            None => return Message::NoDraft,
        };
        let mut active = handle.lock();
        let session = match &mut *active {
            ActiveSession::Authoring(session) if session.is_previewing() => session,
            _ => return Message::NoDraft,
        };

        let title = match session.draft() {
            Some(draft) => draft.title.clone(),
            None => return Message::NoDraft,
        };
        let points = points
            .or_else(|| session.draft().map(|d| d.points_per_question))
            .unwrap_or(1);

        match session.publish(
            &self.quizzes,
            &self.allocator,
            user_id,
            display_name,
            points,
        ) {
            Ok(id) => {
                drop(active);
                self.sessions.remove_if(user_id, &handle);
                Message::QuizPublished { id, title }
            }
            Err(e) => {
                error!("User {} could not publish their quiz: {}", user_id, e);
                Message::Failure(e.to_string())
            }
        }
    }

    pub fn cancel_authoring(&self, user_id: u64) -> Message {
        let handle = match self.sessions.get(user_id) {
            Some(handle) => handle,
            None => return Message::NoDraft,
        };
        let mut active = handle.lock();
        let cancelled = match &mut *active {
            ActiveSession::Authoring(session) => session.cancel().is_ok(),
            _ => false,
        };
        drop(active);
        if cancelled {
            self.sessions.remove_if(user_id, &handle);
            Message::AuthoringCancelled
        } else {
            Message::NoDraft
        }
    }

    pub fn list_my_quizzes(&self, creator_id: u64) -> Message {
        match self.newest_quizzes() {
            Ok(quizzes) => {
                let mine: Vec<QuizSummary> = quizzes
                    .iter()
                    .filter(|q| q.is_created_by(creator_id))
                    .map(summarize)
                    .collect();
                if mine.is_empty() {
                    Message::NoQuizzesCreated
                } else {
                    Message::MyQuizzes(mine)
                }
            }
            Err(e) => Message::Failure(e.to_string()),
        }
    }

    pub fn list_all_quizzes(&self) -> Message {
        match self.newest_quizzes() {
            Ok(quizzes) => {
                let listed: Vec<QuizSummary> = quizzes
                    .iter()
                    .take(self.settings.max_listed_quizzes)
                    .map(summarize)
                    .collect();
                if listed.is_empty() {
                    Message::NoQuizzesAvailable
                } else {
                    Message::AvailableQuizzes(listed)
                }
            }
            Err(e) => Message::Failure(e.to_string()),
        }
    }

    pub fn start_taking(&self, user_id: u64, display_name: &str, quiz_id: &str) -> Message {
        let session = QuizId::parse(quiz_id)
            .and_then(|id| TakingSession::begin(&self.quizzes, &id, user_id, display_name));
        let session = match session {
            Ok(session) => session,
            Err(e) => return Message::Failure(e.to_string()),
        };
        let message = question_message(&session);
        self.sessions.insert(user_id, ActiveSession::Taking(session));
        message
    }

    /// `None` when the answer does not apply to the current question,
    /// including repeated taps on the last question of a run that just ended.
    pub fn submit_answer(
        &self,
        user_id: u64,
        question_index: usize,
        option_index: usize,
    ) -> Option<Message> {
        let handle = match self.sessions.get(user_id) {
            Some(handle) => handle,
            None => return Some(Message::NoActiveQuiz),
        };
        let mut active = handle.lock();
        let session = match &mut *active {
            ActiveSession::Taking(session) => session,
            ActiveSession::Finished(quiz_id) => {
                debug!("Ignoring answer of user {} to finished quiz {}", user_id, quiz_id);
                return None;
            }
            ActiveSession::Authoring(_) => return Some(Message::NoActiveQuiz),
        };

        match session.submit_answer(&self.progress, question_index, option_index) {
            Ok(Submission::Ignored) => None,
            Ok(Submission::Answered(_)) => Some(question_message(session)),
            Ok(Submission::Finished(outcome)) => {
                *active = ActiveSession::Finished(outcome.quiz_id.clone());
                Some(Message::QuizResults(outcome))
            }
            Err(e) => {
                error!("Could not record answer of user {}: {}", user_id, e);
                Some(Message::Failure(e.to_string()))
            }
        }
    }

    pub fn get_progress(&self, user_id: u64) -> Message {
        let record = match self.progress.get(user_id) {
            Ok(record) => record,
            Err(ref e) if e.is_not_found() => return Message::NoProgress,
            Err(e) => return Message::Failure(e.to_string()),
        };

        let lines: Vec<ProgressLine> = record
            .completions
            .iter()
            .map(|(quiz_id, completion)| {
                let quiz = match self.quizzes.get(quiz_id) {
                    Ok(quiz) => Some(quiz),
                    Err(e) => {
                        warn!("Progress of user {} refers to {}: {}", user_id, quiz_id, e);
                        None
                    }
                };
                ProgressLine {
                    quiz_id: quiz_id.clone(),
                    title: completion
                        .title_or(quiz.as_ref())
                        .unwrap_or(quiz_id.as_str())
                        .to_owned(),
                    score: completion.score,
                    total_points: quiz.as_ref().map(Quiz::total_points),
                }
            })
            .collect();

        if lines.is_empty() {
            Message::NoProgress
        } else {
            Message::Progress(lines)
        }
    }

    pub fn get_statistics(&self, requester_id: u64) -> Message {
        if !self.is_admin(requester_id) {
            warn!("User {} asked for statistics without permission", requester_id);
            return Message::AdminOnly;
        }

        let rows = match StatisticsAggregator::new(&self.quizzes, &self.progress)
            .report_for(requester_id)
        {
            Ok(rows) => rows,
            Err(e) => return Message::Failure(e.to_string()),
        };
        if rows.is_empty() {
            return Message::NoStatistics;
        }

        match export_csv(&rows, &self.settings.stats_dir()) {
            Ok(path) => Message::StatisticsReady(path),
            Err(e) => {
                error!("Could not export statistics: {:#}", e);
                Message::Failure(e.to_string())
            }
        }
    }

    fn newest_quizzes(&self) -> Result<Vec<Quiz>> {
        let mut quizzes = self.quizzes.list_all()?;
        quizzes.sort_by(|a, b| {
            b.metadata
                .created_at
                .cmp(&a.metadata.created_at)
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(quizzes)
    }
}

fn summarize(quiz: &Quiz) -> QuizSummary {
    QuizSummary {
        id: quiz.id().clone(),
        title: quiz.title.clone(),
        category: quiz.category.clone(),
        question_count: quiz.questions.len(),
        total_points: quiz.total_points(),
    }
}

fn preview_message(session: &AuthoringSession) -> Message {
    match session.preview() {
        Ok(page) => Message::Preview {
            index: page.index,
            total: page.total,
            question: page.question.clone(),
        },
        Err(Error::InvalidSessionState(_)) => Message::NoDraft,
        Err(e) => Message::Failure(e.to_string()),
    }
}

fn question_message(session: &TakingSession) -> Message {
    match session.current_question() {
        Some(question) => Message::QuestionBegins {
            index: session.current_index(),
            total: session.quiz().questions.len(),
            question_text: question.question_text.clone(),
            options: question.options.clone(),
        },
        None => Message::NoActiveQuiz,
    }
}
