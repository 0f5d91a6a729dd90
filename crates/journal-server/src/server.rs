//! HTTP server implementation using axum.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Query, Request, State};
use axum::http::header;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use journal_core::{
    classify, format_session_info, is_kill_zone, parse_timestamp, pick_punishment,
    primary_session, primary_session_label, violation_for_entry, Punishment, RuleViolation,
    KILL_ZONES, KILL_ZONE_HOURS,
};
use journal_guard::{client_key, FixedWindowRateLimiter};
use journal_telemetry::Metrics;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::types::{DisciplineQuery, KillZoneReport, SessionQuery, SessionReport};

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    limiter: Arc<FixedWindowRateLimiter>,
}

impl AppState {
    pub fn new(limiter: Arc<FixedWindowRateLimiter>) -> Self {
        Self { limiter }
    }

    pub fn limiter(&self) -> &Arc<FixedWindowRateLimiter> {
        &self.limiter
    }
}

/// Create the axum router.
///
/// `/api/*` routes are rate limited per caller; `/health` and `/metrics`
/// are not.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/session", get(get_session))
        .route("/api/kill-zones", get(get_kill_zones))
        .route("/api/discipline", get(get_discipline))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .merge(api)
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .layer(middleware::from_fn(track_requests))
        .with_state(state)
}

/// Admit or reject a request based on the caller's key.
async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let headers = request.headers();
    let key = client_key(
        headers.get(X_FORWARDED_FOR).and_then(|v| v.to_str().ok()),
        headers.get(X_REAL_IP).and_then(|v| v.to_str().ok()),
    );

    if state.limiter.is_allowed(&key) {
        return next.run(request).await;
    }

    let route = route_label(&request);
    Metrics::rate_limited(&route);

    let retry_after = state.limiter.retry_after(&key);
    let retry_after_secs = retry_after.as_millis().div_ceil(1000).max(1) as u64;
    warn!(client = %key, route = %route, retry_after_secs, "Request rate limited");

    ServerError::RateLimited { retry_after_secs }.into_response()
}

/// Record request count and latency.
async fn track_requests(request: Request, next: Next) -> Response {
    let route = route_label(&request);
    let started = Instant::now();

    let response = next.run(request).await;

    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
    Metrics::http_request(&route, response.status().as_u16(), latency_ms);
    response
}

fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string())
}

/// Classify the requested instant (default: now).
async fn get_session(Query(query): Query<SessionQuery>) -> ServerResult<Json<SessionReport>> {
    let timestamp = match query.at.as_deref() {
        Some(at) => parse_timestamp(at)?,
        None => Utc::now(),
    };

    let status = classify(timestamp);
    let primary = primary_session(&status.flags).map(|s| s.key);
    let kill_zone = is_kill_zone(timestamp);

    Metrics::session_lookup(primary.map_or("none", |k| k.as_str()), kill_zone);
    debug!(%timestamp, ?primary, kill_zone, "Session classified");

    Ok(Json(SessionReport {
        timestamp,
        flags: status.flags,
        primary_label: primary_session_label(&status.flags),
        active_labels: status.active_labels,
        primary,
        is_kill_zone: kill_zone,
        off_session_violation: violation_for_entry(timestamp),
        display: format_session_info(timestamp),
    }))
}

async fn get_kill_zones() -> Json<KillZoneReport> {
    Json(KillZoneReport {
        zones: &KILL_ZONES,
        hours: &KILL_ZONE_HOURS,
    })
}

async fn get_discipline(Query(query): Query<DisciplineQuery>) -> ServerResult<Json<Punishment>> {
    let violation: RuleViolation = query.violation.parse()?;
    Ok(Json(pick_punishment(violation, query.occurrence)))
}

async fn health() -> &'static str {
    "ok"
}

async fn get_metrics() -> ServerResult<Response> {
    let body = Metrics::render()?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}

/// Run the HTTP server until `shutdown` resolves.
pub async fn run_server<F>(state: AppState, config: ServerConfig, shutdown: F) -> ServerResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);
    let addr = config.listen_addr();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Starting journal server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Journal server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::StatusCode;
    use tower::ServiceExt;

    fn router(max_requests: u32) -> Router {
        let limiter = Arc::new(FixedWindowRateLimiter::new(max_requests, 60_000));
        create_router(AppState::new(limiter))
    }

    fn get_req(uri: &str, client: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(ip) = client {
            builder = builder.header(X_FORWARDED_FOR, ip);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_session_at_overlap() {
        let response = router(10)
            .oneshot(get_req("/api/session?at=2026-02-09T15:20:00Z", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["flags"]["london"], true);
        assert_eq!(body["flags"]["new_york"], true);
        assert_eq!(body["flags"]["london_close"], true);
        assert_eq!(body["flags"]["asian"], false);
        assert_eq!(body["primary"], "london_close");
        assert_eq!(body["is_kill_zone"], false);
        assert_eq!(body["off_session_violation"], serde_json::Value::Null);
        assert_eq!(body["display"]["utc_time"], "15:20:00 UTC");
    }

    #[tokio::test]
    async fn test_session_off_hours() {
        let response = router(10)
            .oneshot(get_req("/api/session?at=2026-02-09T22:00:00Z", None))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["primary"], serde_json::Value::Null);
        assert_eq!(body["primary_label"], journal_core::NO_ACTIVE_SESSION);
        assert_eq!(body["active_labels"], serde_json::json!([]));
        assert_eq!(body["off_session_violation"], "off_session");
        assert_eq!(body["display"]["current_session"], journal_core::OFF_HOURS);
    }

    #[tokio::test]
    async fn test_session_invalid_timestamp() {
        let response = router(10)
            .oneshot(get_req("/api/session?at=not-a-time", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("Invalid timestamp"));
    }

    #[tokio::test]
    async fn test_kill_zones() {
        let response = router(10)
            .oneshot(get_req("/api/kill-zones", None))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["zones"].as_array().unwrap().len(), 4);
        assert_eq!(body["zones"][1]["start"], "07:00");
        assert_eq!(body["hours"].as_array().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_discipline() {
        let response = router(10)
            .oneshot(get_req("/api/discipline?violation=moved_stop&occurrence=4", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["severity"], "lockout");
        assert_eq!(body["title"], "Chart review");

        let response = router(10)
            .oneshot(get_req("/api/discipline?violation=nope", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rate_limit_returns_429_with_retry_after() {
        let app = router(2);

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(get_req("/api/kill-zones", Some("203.0.113.9")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(get_req("/api/kill-zones", Some("203.0.113.9")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry_after: u64 = response.headers()[header::RETRY_AFTER]
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!((1..=60).contains(&retry_after));

        // Another client is unaffected
        let response = app
            .clone()
            .oneshot(get_req("/api/kill-zones", Some("198.51.100.1")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_origin_shares_unknown_bucket() {
        let limiter = Arc::new(FixedWindowRateLimiter::new(1, 60_000));
        let app = create_router(AppState::new(limiter.clone()));

        let first = app.clone().oneshot(get_req("/api/kill-zones", None)).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(limiter.current_count(journal_guard::UNKNOWN_CLIENT), 1);

        let second = app.oneshot(get_req("/api/kill-zones", None)).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_health_and_metrics_not_limited() {
        let app = router(1);
        for _ in 0..3 {
            let response = app.clone().oneshot(get_req("/health", None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app.oneshot(get_req("/metrics", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8(bytes.to_vec())
            .unwrap()
            .contains("journal_http_requests_total"));
    }
}
