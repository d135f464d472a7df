//! # upay - Rust client for the Upay payments API
//!
//! Typed access to payment links, transactions, products, clients and coupon
//! validation, plus HMAC-SHA256 webhook verification.
//!
//! ```no_run
//! use upay::{CreatePaymentLinkRequest, UpayClient, UpayConfig};
//!
//! # async fn run() -> upay::Result<()> {
//! let client = UpayClient::new(UpayConfig::new("sk_test_..."))?;
//! let link = client
//!     .payment_links()
//!     .create(&CreatePaymentLinkRequest::with_amount("Premium plan", 9_990))
//!     .await?;
//! println!("{}", client.payment_links().checkout_url(&link.slug)?);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod normalize;
pub mod resources;
pub mod types;
pub mod validation;
pub mod webhook;

// Re-exports for convenience
pub use client::UpayClient;
pub use config::UpayConfig;
pub use error::{ApiError, ApiErrorKind, Result, UpayError};
pub use types::*;
pub use webhook::{
    compute_signature, extract_signature, verify_signature, HmacProvider, Sha256Hmac,
    WebhookVerifier,
};

// Feature-gated framework support
#[cfg(feature = "axum")]
pub mod axum;

/// Current version of the upay library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
