//! Guard error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Invalid rate limit configuration: {0}")]
    InvalidConfig(String),
}

pub type GuardResult<T> = Result<T, GuardError>;
