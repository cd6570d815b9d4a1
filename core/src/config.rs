//! # Configuration Module
//!
//! Runtime configuration for the data access façade.
//!
//! ## Sources
//! - Build-time injection: `MINTLEDGER_APP_MODE` / `MINTLEDGER_API_BASE_URL`
//!   captured with `option_env!` when the crate is compiled
//! - Process environment: the same variables read at startup
//!
//! The resulting [`AppConfig`] is built once at process entry and handed to
//! [`crate::services::ApiClient`]. Nothing reads the mode from global state.

use std::env;
use std::fmt;
use std::time::Duration;

pub const MODE_ENV_VAR: &str = "MINTLEDGER_APP_MODE";
pub const BASE_URL_ENV_VAR: &str = "MINTLEDGER_API_BASE_URL";

pub const DEFAULT_API_BASE_URL: &str = "https://api.mintledger.app";

/// Simulated network latency applied to every mock-mode call
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(600);

/// Operating mode of the façade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Fixture data only, never touches the network
    #[default]
    Mock,
    /// Real API calls with debug logging
    Dev,
    /// Real API calls, quiet logging
    Prod,
}

impl AppMode {
    /// Parse a mode string. Anything other than `dev` or `prod` selects mock.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("dev") => AppMode::Dev,
            Some("prod") => AppMode::Prod,
            _ => AppMode::Mock,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppMode::Mock => "mock",
            AppMode::Dev => "dev",
            AppMode::Prod => "prod",
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, AppMode::Mock)
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide configuration, passed explicitly to the façade
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub mode: AppMode,
    pub api_base_url: String,
    pub mock_delay: Duration,
    /// Request tracing enabled (every mode except prod)
    pub debug: bool,
    /// Demo toggle: mock FX lookups report a degraded rate service
    pub simulate_fx_failure: bool,
}

impl AppConfig {
    /// Build a config from raw mode/base-URL values. Empty base URLs count as unset.
    pub fn from_values(mode: Option<&str>, api_base_url: Option<&str>) -> Self {
        let mode = AppMode::parse(mode);
        let api_base_url = api_base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            mode,
            api_base_url,
            mock_delay: DEFAULT_MOCK_DELAY,
            debug: mode != AppMode::Prod,
            simulate_fx_failure: false,
        }
    }

    /// Values injected at compile time
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("MINTLEDGER_APP_MODE"),
            option_env!("MINTLEDGER_API_BASE_URL"),
        )
    }

    /// Values read from the process environment
    pub fn from_env() -> Self {
        let mode = env::var(MODE_ENV_VAR).ok();
        let base_url = env::var(BASE_URL_ENV_VAR).ok();
        Self::from_values(mode.as_deref(), base_url.as_deref())
    }

    pub fn mock() -> Self {
        Self::from_values(Some("mock"), None)
    }

    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }

    pub fn with_simulated_fx_failure(mut self, simulate: bool) -> Self {
        self.simulate_fx_failure = simulate;
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(AppMode::parse(Some("dev")), AppMode::Dev);
        assert_eq!(AppMode::parse(Some("PROD")), AppMode::Prod);
        assert_eq!(AppMode::parse(Some(" mock ")), AppMode::Mock);
        assert_eq!(AppMode::parse(Some("staging")), AppMode::Mock);
        assert_eq!(AppMode::parse(Some("")), AppMode::Mock);
        assert_eq!(AppMode::parse(None), AppMode::Mock);
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.mode, AppMode::Mock);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.mock_delay, Duration::from_millis(600));
        assert!(config.debug);
        assert!(!config.simulate_fx_failure);
    }

    #[test]
    fn test_debug_follows_mode() {
        assert!(AppConfig::from_values(Some("dev"), None).debug);
        assert!(!AppConfig::from_values(Some("prod"), None).debug);
    }

    #[test]
    fn test_empty_base_url_uses_default() {
        let config = AppConfig::from_values(Some("dev"), Some("   "));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);

        let config = AppConfig::from_values(Some("dev"), Some("http://localhost:3000/"));
        assert_eq!(config.api_base_url, "http://localhost:3000");
    }

    #[test]
    fn test_builder_setters() {
        let config = AppConfig::mock()
            .with_mock_delay(Duration::ZERO)
            .with_simulated_fx_failure(true)
            .with_api_base_url("http://127.0.0.1:8080/");

        assert_eq!(config.mock_delay, Duration::ZERO);
        assert!(config.simulate_fx_failure);
        assert_eq!(config.api_base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(AppMode::Dev.to_string(), "dev");
        assert!(AppMode::Mock.is_mock());
        assert!(!AppMode::Prod.is_mock());
    }
}
