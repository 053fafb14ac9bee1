use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: {0}")]
    ConfigParse(#[from] config::ConfigError),

    #[error("Repository access error: {0}")]
    Access(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Invalid fetch range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Duplicate date in dataset: {0}")]
    DuplicateDate(NaiveDate),
}
