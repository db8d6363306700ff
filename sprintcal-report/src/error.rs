use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Data file not found: {0}")]
    FileNotFound(String),

    #[error("{count} weekly record(s) could not be placed on the sprint calendar")]
    MalformedRecords { count: usize },

    #[error("No sprints given and none found in the data")]
    NoSprints,

    #[error(transparent)]
    Sprint(#[from] sprintcal::SprintError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
