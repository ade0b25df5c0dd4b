use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed institution record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Duplicate institution id: {0}")]
    DuplicateId(u64),

    #[error("At least {required} institution ids are required, got {actual}")]
    InsufficientIds { required: usize, actual: usize },

    #[error("No institutions found for the given ids")]
    NoMatchingInstitutions,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
