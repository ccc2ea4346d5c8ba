//! Error types for the receiver.

use thiserror::Error;

/// Result type alias for receiver operations
pub type Result<T> = std::result::Result<T, CbrError>;

/// Main error type for the receiver.
///
/// A cycle fails with exactly one of these; the worker loop logs it and
/// moves on to the next poll.
#[derive(Error, Debug)]
pub enum CbrError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Feed returned HTTP {0}")]
    FeedStatus(reqwest::StatusCode),

    #[error("Feed request failed after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("Problem with parsing data, received from the source feed")]
    FeedStructure,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
