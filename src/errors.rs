//! Unified error types for the inventory view-model.

use thiserror::Error;

/// Every failure the crate reports.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller passed a value outside a supported set (sort field, export format, ...)
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was rejected and what is accepted
        message: String,
    },

    /// A medicine record breaks the data-model invariants
    #[error("Invalid record: {message}")]
    InvalidRecord {
        /// Which record and which invariant
        message: String,
    },

    /// Settings file unreadable, malformed or inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable cause
        message: String,
    },

    /// File access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API payload could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
