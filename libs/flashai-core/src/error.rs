//! Error types for flashai-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised when parsing user-facing values into core types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown rating: {0}")]
    UnknownRating(String),

    #[error("unknown difficulty level: {0}")]
    UnknownLevel(String),

    #[error("unknown study mode: {0}")]
    UnknownMode(String),
}
