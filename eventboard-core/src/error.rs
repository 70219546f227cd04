//! Error types for eventboard.

use thiserror::Error;

/// Errors that can occur while loading and normalizing events.
///
/// Classification and arrangement are total and never produce these;
/// they only come from the edges (date strings, feed files, config).
#[derive(Error, Debug)]
pub enum EventboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD, YYYY-MM-DDTHH:MM[:SS] or RFC 3339")]
    InvalidDate(String),

    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for eventboard operations.
pub type EventboardResult<T> = Result<T, EventboardError>;
