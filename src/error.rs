use thiserror::Error;

#[derive(Debug, Error)]
pub enum SprintError {
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid sprint number: {0} (sprints run from 1 to 26)")]
    InvalidSprint(i64),

    #[error("Dates in year {year} cannot be represented")]
    DateOutOfRange { year: i32 },

    #[error("Config already exists at {0}")]
    ConfigExists(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SprintError>;
