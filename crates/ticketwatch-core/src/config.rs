//! Client configuration for ticketwatch.
//!
//! Loaded from `~/.ticketwatch/config.yaml` when present; every field has a
//! default so a missing file is not an error. CLI flags override whatever the
//! file provides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::logging::home_dir;

/// Default remote control surface.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Default poll cadence for both the status and log pollers, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the remote ticket service.
    pub server_url: String,

    /// Status poll interval in milliseconds.
    pub status_interval_ms: u64,

    /// Log poll interval in milliseconds.
    pub log_interval_ms: u64,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            status_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            log_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the default path, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(&default_config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults
    /// when no file exists.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).map_err(|e| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self =
            serde_yaml::from_str(&contents).map_err(|e| CoreError::ConfigInvalid {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), server_url = %config.server_url, "config loaded");
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.server_url.trim().is_empty() {
            return Err(CoreError::config_validation("server_url must not be empty"));
        }
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(CoreError::config_validation(format!(
                "server_url must start with http:// or https://, got {}",
                self.server_url
            )));
        }
        if self.status_interval_ms == 0 {
            return Err(CoreError::config_validation(
                "status_interval_ms must be positive",
            ));
        }
        if self.log_interval_ms == 0 {
            return Err(CoreError::config_validation(
                "log_interval_ms must be positive",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::config_validation(
                "request_timeout_secs must be positive",
            ));
        }
        Ok(())
    }

    /// Base URL with any trailing slash stripped, for joining request paths.
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }
}

/// Default configuration file path, `~/.ticketwatch/config.yaml`.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(home_dir()?.join(".ticketwatch").join("config.yaml"))
}
