//! Fixed-window behaviour through the public API.

use std::sync::Arc;
use std::time::Duration;

use journal_guard::{client_key, FixedWindowRateLimiter, ManualClock, UNKNOWN_CLIENT};

fn limiter() -> (FixedWindowRateLimiter<Arc<ManualClock>>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    (FixedWindowRateLimiter::with_clock(3, 1000, clock.clone()), clock)
}

#[test]
fn test_three_then_deny_then_reset() {
    let (limiter, clock) = limiter();

    let first: Vec<bool> = (0..4).map(|_| limiter.is_allowed("10.0.0.1")).collect();
    assert_eq!(first, vec![true, true, true, false]);

    clock.advance(Duration::from_millis(1001));

    let second: Vec<bool> = (0..4).map(|_| limiter.is_allowed("10.0.0.1")).collect();
    assert_eq!(second, vec![true, true, true, false]);
}

#[test]
fn test_boundary_burst_up_to_twice_max() {
    let (limiter, clock) = limiter();

    // Idle start of the window, then a burst at its tail
    assert!(limiter.is_allowed("k"));
    clock.advance(Duration::from_millis(999));
    assert!(limiter.is_allowed("k"));
    assert!(limiter.is_allowed("k"));

    // Just past the window: a full new allowance
    clock.advance(Duration::from_millis(2));
    let admitted = (0..5).filter(|_| limiter.is_allowed("k")).count();
    assert_eq!(admitted, 3);
}

#[test]
fn test_unknown_key_convention() {
    let (limiter, _clock) = limiter();
    let key = client_key(None, None);
    assert_eq!(key, UNKNOWN_CLIENT);

    for _ in 0..3 {
        assert!(limiter.is_allowed(&key));
    }
    // Every caller without an origin shares one bucket
    assert!(!limiter.is_allowed(&client_key(Some(""), None)));
    assert!(limiter.is_allowed(&client_key(Some("192.0.2.1"), None)));
}
