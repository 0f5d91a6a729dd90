//! Error types for journal-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown rule violation: {0}")]
    UnknownViolation(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
