//! Application wiring: limiter, sweeper and HTTP server.

use std::sync::Arc;

use journal_guard::FixedWindowRateLimiter;
use journal_server::{run_server, run_sweeper, AppState};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::AppResult;

pub struct Application {
    config: AppConfig,
    limiter: Arc<FixedWindowRateLimiter>,
}

impl Application {
    /// Build the application from validated configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let limiter = Arc::new(FixedWindowRateLimiter::from_config(
            &config.server.rate_limit,
        )?);

        info!(
            max_requests = config.server.rate_limit.max_requests,
            window_ms = config.server.rate_limit.window_ms,
            "Rate limiter configured"
        );

        Ok(Self { config, limiter })
    }

    pub fn limiter(&self) -> &Arc<FixedWindowRateLimiter> {
        &self.limiter
    }

    /// Run until Ctrl-C.
    pub async fn run(self) -> AppResult<()> {
        if !self.config.server.enabled {
            info!("Server disabled in configuration, nothing to run");
            return Ok(());
        }

        let sweeper = tokio::spawn(run_sweeper(
            self.limiter.clone(),
            self.config.server.rate_limit.sweep_interval_ms,
        ));

        let result = run_server(
            AppState::new(self.limiter.clone()),
            self.config.server.clone(),
            shutdown_signal(),
        )
        .await;

        sweeper.abort();
        result.map_err(Into::into)
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_uses_configured_limits() {
        let mut config = AppConfig::default();
        config.server.rate_limit.max_requests = 2;

        let app = Application::new(config).unwrap();
        assert_eq!(app.limiter().max_requests(), 2);
        assert!(app.limiter().is_allowed("k"));
        assert!(app.limiter().is_allowed("k"));
        assert!(!app.limiter().is_allowed("k"));
    }

    #[tokio::test]
    async fn test_disabled_server_returns() {
        let mut config = AppConfig::default();
        config.server.enabled = false;
        Application::new(config).unwrap().run().await.unwrap();
    }
}
