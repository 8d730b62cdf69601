pub mod authoring;
pub mod definition;
pub mod taking;

pub use authoring::{AuthoringSession, Direction};
pub use definition::{Question, Quiz, QuizDraft, QuizId};
pub use taking::{Outcome, Submission, TakingSession};
