use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutreachError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for OutreachError {
    fn from(err: config::ConfigError) -> Self {
        OutreachError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OutreachError>;
