use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("{op} failed for {path}: {message}")]
    Transport {
        op: &'static str,
        path: String,
        message: String,
    },

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("User input error: {0}")]
    UserInput(String),
}

impl SweepError {
    pub fn transport(op: &'static str, path: &str, message: impl ToString) -> Self {
        SweepError::Transport {
            op,
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<dialoguer::Error> for SweepError {
    fn from(err: dialoguer::Error) -> Self {
        SweepError::UserInput(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;
