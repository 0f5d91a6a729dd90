//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rate limit error: {0}")]
    Guard(#[from] journal_guard::GuardError),

    #[error("Server error: {0}")]
    Server(#[from] journal_server::ServerError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] journal_telemetry::TelemetryError),
}

pub type AppResult<T> = Result<T, AppError>;
