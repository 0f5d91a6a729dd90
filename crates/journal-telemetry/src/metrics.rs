//! Prometheus metrics for the trading journal.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. A registration failure
//! means a duplicate metric name, which is a programming error that should
//! crash at first use rather than silently drop metrics.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, Encoder, HistogramVec,
    IntCounterVec, IntGauge, TextEncoder,
};

use crate::error::TelemetryResult;

/// Total HTTP requests served.
/// Labels: route, status
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "journal_http_requests_total",
        "Total HTTP requests served",
        &["route", "status"]
    )
    .unwrap()
});

/// HTTP request latency in milliseconds.
pub static HTTP_LATENCY_MS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "journal_http_latency_ms",
        "HTTP request latency in milliseconds",
        &["route"],
        vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 50.0, 100.0, 500.0]
    )
    .unwrap()
});

/// Requests denied by the rate limiter.
pub static RATE_LIMITED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "journal_rate_limited_total",
        "Requests denied by the rate limiter",
        &["route"]
    )
    .unwrap()
});

/// Keys currently tracked by the rate limiter.
pub static RATE_LIMIT_TRACKED_KEYS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "journal_rate_limit_tracked_keys",
        "Caller keys currently tracked by the rate limiter"
    )
    .unwrap()
});

/// Session lookups by primary session.
pub static SESSION_LOOKUPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "journal_session_lookups_total",
        "Session classifications served, by primary session",
        &["primary", "kill_zone"]
    )
    .unwrap()
});

/// Metrics facade.
pub struct Metrics;

impl Metrics {
    /// Record a served HTTP request.
    pub fn http_request(route: &str, status: u16, latency_ms: f64) {
        let status = status.to_string();
        HTTP_REQUESTS_TOTAL
            .with_label_values(&[route, status.as_str()])
            .inc();
        HTTP_LATENCY_MS
            .with_label_values(&[route])
            .observe(latency_ms);
    }

    /// Record a rate-limit denial.
    pub fn rate_limited(route: &str) {
        RATE_LIMITED_TOTAL.with_label_values(&[route]).inc();
    }

    /// Update the tracked key gauge.
    pub fn tracked_keys_set(count: usize) {
        RATE_LIMIT_TRACKED_KEYS.set(i64::try_from(count).unwrap_or(i64::MAX));
    }

    /// Record a session classification.
    pub fn session_lookup(primary: &str, kill_zone: bool) {
        SESSION_LOOKUPS_TOTAL
            .with_label_values(&[primary, if kill_zone { "true" } else { "false" }])
            .inc();
    }

    /// Render all registered metrics in the Prometheus text format.
    pub fn render() -> TelemetryResult<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&prometheus::gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_counter() {
        let before = RATE_LIMITED_TOTAL.with_label_values(&["/test"]).get();
        Metrics::rate_limited("/test");
        assert_eq!(
            RATE_LIMITED_TOTAL.with_label_values(&["/test"]).get(),
            before + 1
        );
    }

    #[test]
    fn test_render_contains_metrics() {
        Metrics::tracked_keys_set(3);
        Metrics::session_lookup("london", true);
        let text = Metrics::render().unwrap();
        assert!(text.contains("journal_rate_limit_tracked_keys"));
        assert!(text.contains("journal_session_lookups_total"));
    }
}
