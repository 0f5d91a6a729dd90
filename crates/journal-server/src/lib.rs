//! journal-server - HTTP surface for the trading journal's session tools.
//!
//! # Routes
//!
//! ```text
//! GET /api/session?at=<RFC 3339 | epoch ms>  → SessionReport (rate limited)
//! GET /api/kill-zones                        → KillZoneReport (rate limited)
//! GET /api/discipline?violation=..&occurrence=..  → Punishment (rate limited)
//! GET /health                                → "ok"
//! GET /metrics                               → Prometheus text format
//! ```
//!
//! Rate limiting is per caller key (first `X-Forwarded-For` entry, then
//! `X-Real-IP`, else `"unknown"`). Denied requests get `429` with a
//! `Retry-After` header in seconds.
//!
//! # Usage
//!
//! ```ignore
//! use journal_server::{run_server, AppState, ServerConfig};
//!
//! let config = ServerConfig::default();
//! let limiter = Arc::new(FixedWindowRateLimiter::from_config(&config.rate_limit)?);
//! tokio::spawn(journal_server::run_sweeper(limiter.clone(), config.rate_limit.sweep_interval_ms));
//! run_server(AppState::new(limiter), config, shutdown_signal()).await?;
//! ```

mod config;
mod error;
mod server;
mod sweeper;
mod types;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{create_router, run_server, AppState};
pub use sweeper::run_sweeper;
pub use types::{DisciplineQuery, KillZoneReport, SessionQuery, SessionReport};
