use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("entry for user {user} on {date} already exists")]
    Duplicate { user: String, date: NaiveDate },
    #[error("no entry for user {user} on {date}")]
    NotFound { user: String, date: NaiveDate },
    #[error("storage failure: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}
