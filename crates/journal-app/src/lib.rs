//! Trading journal service.
//!
//! Wires the session classifier and rate limiter into an HTTP service:
//! - TOML configuration with per-field defaults
//! - Structured logging and Prometheus metrics
//! - Background sweep of expired rate-limit keys

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
