//! Prometheus metrics and structured logging for the trading journal.
//!
//! - Structured logging with tracing (pretty in development, JSON in production)
//! - Prometheus metrics for HTTP traffic, rate limiting and session lookups

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
