//! Application configuration.

use crate::error::{AppError, AppResult};
use journal_server::ServerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "JOURNAL_CONFIG";

/// Config file used when neither CLI nor env names one.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Application configuration.
///
/// Logging is configured through `RUST_LOG`, since it is initialised
/// before this file is read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server and rate limiting.
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Resolve the config path: CLI arg > `JOURNAL_CONFIG` > default.
    pub fn resolve_path(cli: Option<String>) -> String {
        cli.or_else(|| std::env::var(CONFIG_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
    }

    /// Load from `path`, falling back to defaults if the file is missing.
    pub fn load(path: &str) -> AppResult<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        Self::from_toml(&content)
    }

    /// Parse and validate TOML content.
    pub fn from_toml(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.server.rate_limit.validate()?;
        Ok(config)
    }
}
