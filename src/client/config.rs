//! Configuration management for the profile client

use std::{path::PathBuf, time::Duration};

use compact_str::CompactString;

use super::error::{ClientError, Result};
use crate::config::VibeConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Main configuration for the profile client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GitHub API base URL
    pub base_url: CompactString,
    /// Request configuration
    pub request: RequestConfig,
    /// Debug configuration
    pub debug: DebugConfig,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Sent as `User-Agent`, which GitHub requires
    pub user_agent: CompactString,
}

/// Debug and logging configuration
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Write raw HTTP response bodies to disk
    pub log_responses: bool,
    /// Directory for storing response dumps
    pub log_directory: Option<PathBuf>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("vibecheck/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_responses: false,
            log_directory: Some(PathBuf::from("vibecheck-responses")),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<CompactString>) -> Self {
        Self {
            base_url: base_url.into(),
            request: RequestConfig::default(),
            debug: DebugConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ClientError::config_validation(
                "api_url",
                "Base URL cannot be empty",
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::config_validation(
                "api_url",
                "Base URL must start with http:// or https://",
            ));
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(ClientError::InvalidUrl { url: self.base_url.clone() });
        }

        if self.request.timeout.is_zero() {
            return Err(ClientError::config_validation(
                "timeout",
                "Timeout must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Base URL without a trailing slash, ready to have paths appended
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = timeout;
        self
    }

    /// Enable dumping of response bodies
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug.log_responses = enabled;
        self
    }
}

impl From<VibeConfig> for ClientConfig {
    fn from(config: VibeConfig) -> Self {
        Self::new(config.api_url).with_timeout(Duration::from_secs(config.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_root(), "https://api.github.com");
    }

    #[test]
    fn rejects_non_http_urls() {
        let config = ClientConfig::new("ftp://example.com");
        assert!(matches!(
            config.validate(),
            Err(ClientError::ConfigValidation { .. })
        ));
    }

    #[test]
    fn rejects_empty_url_and_zero_timeout() {
        assert!(ClientConfig::new("").validate().is_err());

        let config = ClientConfig::default().with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn api_root_strips_trailing_slash() {
        let config = ClientConfig::new("http://127.0.0.1:8080/");
        assert_eq!(config.api_root(), "http://127.0.0.1:8080");
    }

    #[test]
    fn converts_from_app_config() {
        let app = VibeConfig {
            api_url: "http://localhost:9999".into(),
            timeout_secs: 5,
            ..VibeConfig::default()
        };
        let config = ClientConfig::from(app);
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.request.timeout, Duration::from_secs(5));
    }
}
