//! Client configuration

use crate::{Result, UpayError};
use std::env;
use std::time::Duration;
use url::Url;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.upay-sistema.onrender.com";

/// Default public checkout URL
pub const DEFAULT_CHECKOUT_URL: &str = "https://checkout.upaybr.com";

/// Default API version segment
pub const DEFAULT_API_VERSION: &str = "v1";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration consumed by [`UpayClient`](crate::UpayClient) at construction
#[derive(Clone)]
pub struct UpayConfig {
    /// API key sent as a bearer token
    pub api_key: String,
    /// Base URL of the Upay API, without trailing slash
    pub base_url: String,
    /// API version path segment
    pub version: String,
    /// Timeout for a single request
    pub timeout: Duration,
    /// Base URL of the hosted checkout pages, without trailing slash
    pub checkout_base_url: String,
}

impl std::fmt::Debug for UpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpayConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .field("checkout_base_url", &self.checkout_base_url)
            .finish()
    }
}

impl UpayConfig {
    /// Create a new config with default base URL, version and timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            checkout_base_url: DEFAULT_CHECKOUT_URL.to_string(),
        }
    }

    /// Build a config from `UPAY_*` environment variables
    ///
    /// `UPAY_API_KEY` is required. `UPAY_BASE_URL`, `UPAY_API_VERSION`,
    /// `UPAY_TIMEOUT_SECS` and `UPAY_CHECKOUT_URL` override the defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("UPAY_API_KEY").unwrap_or_default();
        let mut config = Self::new(api_key);

        if let Ok(base_url) = env::var("UPAY_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let Ok(version) = env::var("UPAY_API_VERSION") {
            config = config.with_version(version);
        }
        if let Ok(secs) = env::var("UPAY_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                UpayError::config(format!("UPAY_TIMEOUT_SECS must be a positive integer, got '{}'", secs))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Ok(checkout) = env::var("UPAY_CHECKOUT_URL") {
            config = config.with_checkout_base_url(checkout);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_trailing_slash(base_url.into());
        self
    }

    /// Set the API version segment
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the checkout base URL used by
    /// [`PaymentLinks::checkout_url`](crate::resources::PaymentLinks::checkout_url)
    pub fn with_checkout_base_url(mut self, url: impl Into<String>) -> Self {
        self.checkout_base_url = trim_trailing_slash(url.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(UpayError::config("API key is required"));
        }

        if self.version.trim().is_empty() {
            return Err(UpayError::config("API version cannot be empty"));
        }

        if self.timeout.is_zero() {
            return Err(UpayError::config("Timeout must be positive"));
        }

        validate_http_url("Base URL", &self.base_url)?;
        validate_http_url("Checkout URL", &self.checkout_base_url)?;

        Ok(())
    }
}

fn validate_http_url(name: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| UpayError::config(format!("{} '{}' is not a valid URL: {}", name, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UpayError::config(format!(
            "{} must start with http:// or https://",
            name
        )));
    }

    Ok(())
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UpayConfig::new("key_123");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.version, "v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.checkout_base_url, "https://checkout.upaybr.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = UpayConfig::new("  ").validate().unwrap_err();
        assert!(err.to_string().contains("API key is required"));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = UpayConfig::new("key").with_base_url("not a url");
        assert!(matches!(config.validate(), Err(UpayError::Config { .. })));

        let config = UpayConfig::new("key").with_base_url("ftp://example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = UpayConfig::new("key").with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_version_rejected() {
        let config = UpayConfig::new("key").with_version("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_trailing_slashes_stripped() {
        let config = UpayConfig::new("key")
            .with_base_url("https://api.example.com/")
            .with_checkout_base_url("https://pay.example.com//");
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.checkout_base_url, "https://pay.example.com");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = UpayConfig::new("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
