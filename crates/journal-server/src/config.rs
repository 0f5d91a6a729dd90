//! Server configuration.

use journal_guard::RateLimitConfig;
use serde::{Deserialize, Serialize};

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Enable the HTTP server.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Address to bind.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-client limits applied to `/api/*`.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

fn default_enabled() -> bool {
    true
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            bind_addr: default_bind_addr(),
            port: default_port(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl ServerConfig {
    /// `bind_addr:port` as a socket address string.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert!(config.enabled);
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert_eq!(config.rate_limit.max_requests, 60);
    }

    #[test]
    fn test_partial_toml() {
        let config: ServerConfig = toml::from_str(
            r#"
            port = 9000

            [rate_limit]
            max_requests = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window_ms, 60_000);
    }
}
