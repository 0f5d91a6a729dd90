//! Per-key fixed-window rate limiting.
//!
//! Each caller key gets a counter that resets on the first call after its
//! window has elapsed. This is a strict fixed window, not a sliding one:
//! - A caller can land up to `2 * max_requests` calls across a window
//!   boundary (end of one window plus start of the next).
//! - State is process-local and lost on restart. Running several instances
//!   multiplies the effective limit.
//! - Records are never dropped by `is_allowed`; call
//!   [`FixedWindowRateLimiter::sweep_expired`] periodically to bound memory.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{GuardError, GuardResult};

/// Rate limit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per key per window.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Window length in milliseconds.
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
    /// Interval for sweeping expired keys (ms). 0 disables the sweep.
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,
}

fn default_max_requests() -> u32 {
    60
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_sweep_interval_ms() -> u64 {
    300_000 // 5 minutes
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_ms: default_window_ms(),
            sweep_interval_ms: default_sweep_interval_ms(),
        }
    }
}

impl RateLimitConfig {
    /// Reject zero-sized limits.
    pub fn validate(&self) -> GuardResult<()> {
        if self.max_requests == 0 {
            return Err(GuardError::InvalidConfig(
                "max_requests must be positive".to_string(),
            ));
        }
        if self.window_ms == 0 {
            return Err(GuardError::InvalidConfig(
                "window_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Counter state for one key.
#[derive(Debug, Clone, Copy)]
struct RateLimitRecord {
    count: u32,
    window_start: Instant,
}

/// Fixed-window rate limiter keyed by caller identity.
///
/// Thread-safe: a single `parking_lot::Mutex` guards the key table, so
/// concurrent calls for the same key never lose an increment.
pub struct FixedWindowRateLimiter<C: Clock = SystemClock> {
    max_requests: u32,
    window: Duration,
    records: Mutex<HashMap<String, RateLimitRecord>>,
    clock: C,
}

impl FixedWindowRateLimiter<SystemClock> {
    /// Create a new rate limiter.
    ///
    /// # Arguments
    /// * `max_requests` - Maximum admitted requests per window
    /// * `window_ms` - Window length in milliseconds
    pub fn new(max_requests: u32, window_ms: u64) -> Self {
        Self::with_clock(max_requests, window_ms, SystemClock)
    }

    /// Create a rate limiter from validated configuration.
    pub fn from_config(config: &RateLimitConfig) -> GuardResult<Self> {
        config.validate()?;
        Ok(Self::new(config.max_requests, config.window_ms))
    }
}

impl<C: Clock> FixedWindowRateLimiter<C> {
    /// Create a rate limiter driven by the given clock.
    pub fn with_clock(max_requests: u32, window_ms: u64, clock: C) -> Self {
        Self {
            max_requests,
            window: Duration::from_millis(window_ms),
            records: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Decide whether a call from `key` is admitted, and count it.
    ///
    /// The call that discovers an expired window always succeeds and starts a
    /// new window with `count = 1`. Within a window, the `max_requests`-th call
    /// is still admitted and the next one is denied.
    pub fn is_allowed(&self, key: &str) -> bool {
        let now = self.clock.now();
        let mut records = self.records.lock();

        let Some(record) = records.get_mut(key) else {
            records.insert(
                key.to_string(),
                RateLimitRecord {
                    count: 1,
                    window_start: now,
                },
            );
            return true;
        };

        if now.saturating_duration_since(record.window_start) > self.window {
            record.count = 1;
            record.window_start = now;
            return true;
        }

        record.count = record.count.saturating_add(1);
        let allowed = record.count <= self.max_requests;

        if !allowed {
            debug!(
                key,
                count = record.count,
                max = self.max_requests,
                "Rate limit exceeded"
            );
        }

        allowed
    }

    /// Time until the current window for `key` ends.
    ///
    /// Zero if the key is untracked or its window has already elapsed.
    pub fn retry_after(&self, key: &str) -> Duration {
        let now = self.clock.now();
        self.records.lock().get(key).map_or(Duration::ZERO, |r| {
            (r.window_start + self.window).saturating_duration_since(now)
        })
    }

    /// Requests counted for `key` in its current window.
    pub fn current_count(&self, key: &str) -> u32 {
        self.records.lock().get(key).map_or(0, |r| r.count)
    }

    /// Number of keys with a record.
    pub fn tracked_keys(&self) -> usize {
        self.records.lock().len()
    }

    /// Drop records whose window has elapsed.
    ///
    /// A dropped key behaves exactly as an expired one on its next call, so
    /// sweeping never changes an admission decision.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|_, r| now.saturating_duration_since(r.window_start) <= self.window);
        let removed = before - records.len();

        if removed > 0 {
            debug!(removed, remaining = records.len(), "Swept expired rate limit keys");
        }
        if records.len() > 100_000 {
            warn!(
                tracked = records.len(),
                "Rate limiter tracking a large number of keys"
            );
        }

        removed
    }

    /// Reset rate limiter state.
    pub fn reset(&self) {
        self.records.lock().clear();
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
