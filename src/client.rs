//! Top-level Upay client

use crate::config::UpayConfig;
use crate::http::HttpClient;
use crate::resources::{Clients, Coupons, PaymentLinks, Products, Transactions};
use crate::webhook;
use crate::Result;
use http::HeaderMap;

/// Entry point to the Upay API
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct UpayClient {
    http: HttpClient,
    config: UpayConfig,
}

impl UpayClient {
    /// Create a new client from a config
    pub fn new(config: UpayConfig) -> Result<Self> {
        let http = HttpClient::new(&config)?;
        Ok(Self { http, config })
    }

    /// Create a client with the default config for `api_key`
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(UpayConfig::new(api_key))
    }

    /// Create a client configured from `UPAY_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(UpayConfig::from_env()?)
    }

    /// Active configuration
    pub fn config(&self) -> &UpayConfig {
        &self.config
    }

    /// Payment link operations
    pub fn payment_links(&self) -> PaymentLinks<'_> {
        PaymentLinks::new(&self.http, &self.config.checkout_base_url)
    }

    /// Transaction operations
    pub fn transactions(&self) -> Transactions<'_> {
        Transactions::new(&self.http)
    }

    /// Product operations
    pub fn products(&self) -> Products<'_> {
        Products::new(&self.http)
    }

    /// Client operations
    pub fn clients(&self) -> Clients<'_> {
        Clients::new(&self.http)
    }

    /// Coupon operations
    pub fn coupons(&self) -> Coupons<'_> {
        Coupons::new(&self.http)
    }

    /// Verify a webhook signature, see [`webhook::verify_signature`]
    pub fn verify_webhook_signature(&self, payload: &[u8], signature: &str, secret: &str) -> bool {
        webhook::verify_signature(payload, signature, secret)
    }

    /// Find a webhook signature in request headers, see [`webhook::extract_signature`]
    pub fn extract_webhook_signature(&self, headers: &HeaderMap) -> Option<String> {
        webhook::extract_signature(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_creation() {
        let client = UpayClient::new(
            UpayConfig::new("key_123").with_timeout(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(client.config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_config() {
        let err = UpayClient::with_api_key("   ").unwrap_err();
        assert!(matches!(err, crate::UpayError::Config { .. }));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = UpayClient::with_api_key("sk_live_secret").unwrap();
        assert!(!format!("{:?}", client).contains("sk_live_secret"));
    }

    #[test]
    fn test_checkout_url_uses_config() {
        let client = UpayClient::new(
            UpayConfig::new("key").with_checkout_base_url("https://pay.example.com/"),
        )
        .unwrap();
        assert_eq!(
            client.payment_links().checkout_url("plan").unwrap(),
            "https://pay.example.com/plan"
        );
    }
}
