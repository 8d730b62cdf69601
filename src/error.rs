use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(String),

    #[error("A quiz with ID {0} already exists")]
    DuplicateIdentifier(String),

    #[error("The generated quiz is unusable: {0}")]
    InvalidGeneratedContent(String),

    #[error("{0}")]
    InvalidSessionState(&'static str),

    #[error("Could not find a free quiz ID after {0} attempts")]
    ExhaustedIdentifierSpace(usize),

    #[error("Record {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
