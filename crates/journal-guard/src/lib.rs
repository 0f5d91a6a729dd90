//! Request guarding for the trading journal.
//!
//! Provides:
//! - Per-key fixed-window rate limiting (in-process, single instance)
//! - Caller key derivation from proxy headers
//! - A clock abstraction so windows can be driven in tests

pub mod client_key;
pub mod clock;
pub mod error;
pub mod rate_limiter;

pub use client_key::{client_key, UNKNOWN_CLIENT};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{GuardError, GuardResult};
pub use rate_limiter::{FixedWindowRateLimiter, RateLimitConfig};
