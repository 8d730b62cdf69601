use chrono::Local;
use log::{debug, info};

use crate::error::{Error, Result};
use crate::quiz::definition::{Question, Quiz, QuizDraft, QuizId};
use crate::store::{IdentifierAllocator, QuizRepository};


#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug)]
enum State {
    Idle,
    Previewing { draft: QuizDraft, cursor: usize },
    Published(QuizId),
    Cancelled,
}

#[derive(Debug, PartialEq)]
pub struct PreviewPage<'a> {
    pub index: usize,
    pub total: usize,
    pub question: &'a Question,
}

/// A generated quiz being reviewed by its author before it becomes a durable record.
#[derive(Debug)]
pub struct AuthoringSession {
    state: State,
}

impl Default for AuthoringSession {
    fn default() -> Self {
        AuthoringSession { state: State::Idle }
    }
}

impl AuthoringSession {
    pub fn new() -> Self {
        Default::default()
    }

    fn set_state(&mut self, state: State) {
        debug!("Authoring session entering state: {:?}", state);
        self.state = state;
    }

    pub fn start(&mut self, draft: QuizDraft) -> Result<()> {
        match self.state {
            State::Idle => {
                if draft.questions.is_empty() {
                    return Err(Error::InvalidGeneratedContent(
                        "the quiz has no questions".into(),
                    ));
                }
                self.set_state(State::Previewing { draft, cursor: 0 });
                Ok(())
            }
            _ => Err(Error::InvalidSessionState(
                "This quiz draft has already been started",
            )),
        }
    }

    pub fn is_previewing(&self) -> bool {
        match self.state {
            State::Previewing { .. } => true,
            _ => false,
        }
    }

    pub fn draft(&self) -> Option<&QuizDraft> {
        match &self.state {
            State::Previewing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn preview(&self) -> Result<PreviewPage> {
        match &self.state {
            State::Previewing { draft, cursor } => Ok(PreviewPage {
                index: *cursor,
                total: draft.questions.len(),
                question: &draft.questions[*cursor],
            }),
            _ => Err(Error::InvalidSessionState("There is no quiz draft to preview")),
        }
    }

    /// Moves the preview cursor, staying put at either end.
    fn navigate(&mut self, direction: Direction) -> Result<usize> {
        match &mut self.state {
            State::Previewing { draft, cursor } => {
                let last = draft.questions.len() - 1;
                *cursor = match direction {
                    Direction::Forward => (*cursor + 1).min(last),
                    Direction::Backward => cursor.saturating_sub(1),
                };
                Ok(*cursor)
            }
            _ => Err(Error::InvalidSessionState("There is no quiz draft to preview")),
        }
    }

    pub fn advance(&mut self) -> Result<usize> {
        self.navigate(Direction::Forward)
    }

    pub fn retreat(&mut self) -> Result<usize> {
        self.navigate(Direction::Backward)
    }

    /// Allocates an ID and writes the draft as an immutable quiz.
    /// On failure the draft stays open so publishing can be retried.
    pub fn publish(
        &mut self,
        quizzes: &QuizRepository,
        allocator: &IdentifierAllocator,
        creator_id: u64,
        creator_display_name: &str,
        points_per_question: u32,
    ) -> Result<QuizId> {
        if !self.is_previewing() {
            return Err(Error::InvalidSessionState(
                "There is no quiz draft to publish",
            ));
        }
        if points_per_question == 0 {
            return Err(Error::InvalidGeneratedContent(
                "questions must be worth at least one point".into(),
            ));
        }
        let question_count = self.draft().map_or(0, |d| d.questions.len());
        if Quiz::checked_total_points(question_count, points_per_question).is_none() {
            return Err(Error::InvalidGeneratedContent(format!(
                "{} points per question is too many",
                points_per_question
            )));
        }

        let (draft, cursor) = match std::mem::replace(&mut self.state, State::Idle) {
            State::Previewing { draft, cursor } => (draft, cursor),
            other => {
                self.state = other;
                return Err(Error::InvalidSessionState(
                    "There is no quiz draft to publish",
                ));
            }
        };

        let result = allocator.allocate(|id| quizzes.contains(id)).and_then(|id| {
            let quiz = Quiz::new(
                id,
                draft.clone(),
                points_per_question,
                creator_id,
                creator_display_name,
                Local::now().naive_local(),
            )?;
            quizzes.put(&quiz)?;
            Ok(quiz.metadata.id)
        });

        match result {
            Ok(id) => {
                info!("User {} published quiz {}", creator_id, id);
                self.set_state(State::Published(id.clone()));
                Ok(id)
            }
            Err(e) => {
                self.state = State::Previewing { draft, cursor };
                Err(e)
            }
        }
    }

    pub fn cancel(&mut self) -> Result<()> {
        if !self.is_previewing() {
            return Err(Error::InvalidSessionState("There is no quiz draft to cancel"));
        }
        self.set_state(State::Cancelled);
        Ok(())
    }
}
