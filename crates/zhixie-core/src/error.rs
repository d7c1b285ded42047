//! Error types for Zhixie.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),

    /// Network failure, non-success status or request timeout.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Malformed remote record (CSV row, word list entry).
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error came from fetching a remote resource rather than
    /// from interpreting its content. Bulk importers skip a source on fetch
    /// failures and abort on everything else.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
