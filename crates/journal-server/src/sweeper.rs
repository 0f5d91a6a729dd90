//! Background eviction of expired rate-limit keys.

use std::sync::Arc;
use std::time::Duration;

use journal_guard::{Clock, FixedWindowRateLimiter};
use journal_telemetry::Metrics;
use tracing::{debug, info};

/// Run the sweeper task.
///
/// Every `interval_ms`, drops keys whose window has elapsed and publishes the
/// remaining key count. Returns immediately if `interval_ms` is 0.
pub async fn run_sweeper<C: Clock>(limiter: Arc<FixedWindowRateLimiter<C>>, interval_ms: u64) {
    if interval_ms == 0 {
        info!("Rate limit sweeper disabled");
        return;
    }

    let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let removed = limiter.sweep_expired();
        let remaining = limiter.tracked_keys();
        Metrics::tracked_keys_set(remaining);
        debug!(removed, remaining, "Rate limit sweep complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_guard::ManualClock;

    #[tokio::test]
    async fn test_disabled_sweeper_returns() {
        let limiter = Arc::new(FixedWindowRateLimiter::new(1, 1000));
        run_sweeper(limiter, 0).await;
    }

    #[tokio::test]
    async fn test_sweeper_evicts_expired_keys() {
        let clock = Arc::new(ManualClock::new());
        let limiter = Arc::new(FixedWindowRateLimiter::with_clock(1, 1000, clock.clone()));
        limiter.is_allowed("a");
        limiter.is_allowed("b");
        clock.advance(Duration::from_millis(1500));

        let task = tokio::spawn(run_sweeper(limiter.clone(), 10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        task.abort();

        assert_eq!(limiter.tracked_keys(), 0);
    }
}
