//! Client configuration.
//!
//! Provides the panel location, API key, timeouts, retry budget and the
//! per-manager caching toggles. Configuration is loaded from environment
//! variables with defaults suitable for a local panel.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::retry::RetryConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Which managers write normalized entities into their cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheOptions {
    /// Cache locations.
    pub locations: bool,
    /// Cache servers.
    pub servers: bool,
    /// Cache users.
    pub users: bool,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            locations: true,
            servers: true,
            users: true,
        }
    }
}

impl CacheOptions {
    /// Disable caching for every manager.
    pub fn disabled() -> Self {
        Self {
            locations: false,
            servers: false,
            users: false,
        }
    }
}

/// Configuration for an application-API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Panel base URL (e.g., "https://panel.example.com").
    pub panel_url: String,

    /// Application API key.
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Retries after the first attempt for transient failures.
    pub max_retries: u32,

    /// Whether to verify TLS certificates (disable only for testing).
    pub verify_tls: bool,

    /// Page size used when walking every page of a collection.
    pub page_size: u32,

    /// Per-manager caching toggles.
    pub cache: CacheOptions,
}

impl Default for AppConfig {
    /// Returns default configuration suitable for a local panel.
    fn default() -> Self {
        Self {
            panel_url: "http://localhost".to_string(),
            api_key: None,
            timeout_secs: 30,
            max_retries: 3,
            verify_tls: true,
            page_size: 100,
            cache: CacheOptions::default(),
        }
    }
}

impl AppConfig {
    /// Create a configuration for a panel and key, defaults elsewhere.
    pub fn new(panel_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            panel_url: panel_url.into(),
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PTERO_PANEL_URL`: panel base URL (default: http://localhost)
    /// - `PTERO_API_KEY`: application API key
    /// - `PTERO_TIMEOUT_SECS`: request timeout in seconds (default: 30)
    /// - `PTERO_MAX_RETRIES`: retries for transient failures (default: 3)
    /// - `PTERO_VERIFY_TLS`: whether to verify TLS (default: true)
    /// - `PTERO_PAGE_SIZE`: page size for full collection walks (default: 100)
    /// - `PTERO_CACHE_LOCATIONS` / `PTERO_CACHE_SERVERS` / `PTERO_CACHE_USERS`:
    ///   per-manager caching (default: true)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            panel_url: std::env::var("PTERO_PANEL_URL").unwrap_or(default.panel_url),
            api_key: std::env::var("PTERO_API_KEY").ok(),
            timeout_secs: env_parse("PTERO_TIMEOUT_SECS").unwrap_or(default.timeout_secs),
            max_retries: env_parse("PTERO_MAX_RETRIES").unwrap_or(default.max_retries),
            verify_tls: env_flag("PTERO_VERIFY_TLS").unwrap_or(default.verify_tls),
            page_size: env_parse("PTERO_PAGE_SIZE").unwrap_or(default.page_size),
            cache: CacheOptions {
                locations: env_flag("PTERO_CACHE_LOCATIONS").unwrap_or(default.cache.locations),
                servers: env_flag("PTERO_CACHE_SERVERS").unwrap_or(default.cache.servers),
                users: env_flag("PTERO_CACHE_USERS").unwrap_or(default.cache.users),
            },
        }
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The panel URL without a trailing slash.
    pub fn domain(&self) -> &str {
        self.panel_url.trim_end_matches('/')
    }

    /// Root of the application API.
    pub fn api_url(&self) -> String {
        format!("{}/api/application", self.domain())
    }

    /// Retry behaviour for the transport.
    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_retries.saturating_add(1),
            ..RetryConfig::default()
        }
    }

    /// Validate that the configuration can reach a panel.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingEnvVar("PTERO_API_KEY".to_string()));
        }
        if !(self.panel_url.starts_with("http://") || self.panel_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "panel_url".to_string(),
                message: format!("'{}' is not an http(s) URL", self.panel_url),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "page_size".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

fn env_flag(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|s| s != "false" && s != "0")
}
