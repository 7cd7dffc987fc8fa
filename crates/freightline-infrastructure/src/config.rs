//! API configuration.
//!
//! Resolution order: built-in defaults, then the optional
//! `config.toml` under the freightline config directory, then the
//! `FREIGHTLINE_API_BASE_URL` environment variable.

use crate::paths::FreightlinePaths;
use freightline_core::error::{FreightlineError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// On-disk configuration shape; every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

/// Resolved configuration for the remote collaborator connection.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the config file and environment.
    ///
    /// A missing config file is not an error; a file that exists but
    /// cannot be parsed is.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        let path = FreightlinePaths::config_file()?;
        if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            let file: ConfigFile = toml::from_str(&raw).map_err(|e| {
                FreightlineError::Serialization {
                    format: "TOML".to_string(),
                    message: e.to_string(),
                }
            })?;
            if let Some(base_url) = file.base_url {
                config.base_url = base_url;
            }
            if let Some(secs) = file.timeout_secs {
                config.timeout = Duration::from_secs(secs);
            }
        }

        if let Ok(base_url) = std::env::var("FREIGHTLINE_API_BASE_URL") {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }

        Ok(config)
    }

    /// Builds a config pointing at an explicit base URL, keeping the
    /// default timeout. Mostly useful for wiring tests and tools.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_config_file_shape_parses() {
        let file: ConfigFile =
            toml::from_str("base_url = \"https://api.example.com\"\ntimeout_secs = 30\n").unwrap();
        assert_eq!(file.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(file.timeout_secs, Some(30));
    }

    #[test]
    fn test_with_base_url() {
        let config = ApiConfig::with_base_url("https://staging.example.com");
        assert_eq!(config.base_url, "https://staging.example.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
