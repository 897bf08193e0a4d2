//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (FEEDCLIP_*)
//! 2. TOML config file (if FEEDCLIP_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (FEEDCLIP_*)
/// 2. TOML config file (if FEEDCLIP_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite library database.
    ///
    /// Set via FEEDCLIP_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Seconds a stashed capture stays retrievable in the handoff cache.
    ///
    /// Set via FEEDCLIP_HANDOFF_TTL_SECS environment variable.
    #[serde(default = "default_handoff_ttl_secs")]
    pub handoff_ttl_secs: u64,

    /// Number of posts the free plan may hold.
    ///
    /// Set via FEEDCLIP_FREE_TIER_LIMIT environment variable.
    #[serde(default = "default_free_tier_limit")]
    pub free_tier_limit: usize,

    /// Base URL of the licensing backend.
    ///
    /// Set via FEEDCLIP_LICENSE_BASE_URL environment variable.
    #[serde(default = "default_license_base_url")]
    pub license_base_url: String,

    /// User-Agent string for licensing requests.
    ///
    /// Set via FEEDCLIP_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via FEEDCLIP_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Whether an unverifiable checkout session still upgrades the plan.
    ///
    /// Set via FEEDCLIP_GRANT_ON_CONFIRM_FAILURE environment variable.
    #[serde(default = "default_true")]
    pub grant_on_confirm_failure: bool,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./feedclip-library.sqlite")
}

fn default_handoff_ttl_secs() -> u64 {
    300
}

fn default_free_tier_limit() -> usize {
    100
}

fn default_license_base_url() -> String {
    "https://api.feedclip.app".into()
}

fn default_user_agent() -> String {
    "feedclip/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            handoff_ttl_secs: default_handoff_ttl_secs(),
            free_tier_limit: default_free_tier_limit(),
            license_base_url: default_license_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            grant_on_confirm_failure: true,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Handoff TTL as Duration.
    pub fn handoff_ttl(&self) -> Duration {
        Duration::from_secs(self.handoff_ttl_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `FEEDCLIP_`
    /// 2. TOML file from `FEEDCLIP_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("FEEDCLIP_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("FEEDCLIP_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, PathBuf::from("./feedclip-library.sqlite"));
        assert_eq!(config.handoff_ttl_secs, 300);
        assert_eq!(config.free_tier_limit, 100);
        assert_eq!(config.license_base_url, "https://api.feedclip.app");
        assert_eq!(config.user_agent, "feedclip/0.1");
        assert_eq!(config.timeout_ms, 10_000);
        assert!(config.grant_on_confirm_failure);
    }

    #[test]
    fn test_duration_helpers() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.handoff_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_default_config_validates() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
