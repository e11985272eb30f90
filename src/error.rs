use thiserror::Error;

#[derive(Debug, Error)]
pub enum EndgameError {
    #[error("invalid word {word:?}: {reason}")]
    InvalidWord { word: String, reason: &'static str },

    #[error("word list {0:?} contains no words")]
    EmptyWordList(String),

    #[error("penalty schedule {0:?} has no entries")]
    EmptySchedule(String),

    #[error("embedded data file {0:?} not found")]
    MissingData(String),

    #[error("embedded data file {0:?} is not valid UTF-8")]
    InvalidData(String),

    #[error("unable to parse json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EndgameError>;
