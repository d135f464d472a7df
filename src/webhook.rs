//! Webhook signature verification
//!
//! Upay signs every webhook with HMAC-SHA256 over the raw request body, using
//! the API key's webhook secret, and sends the hex digest in a signature header:
//!
//! 1. Extract the signature with [`extract_signature`] (a `sha256=` prefix is
//!    stripped)
//! 2. Recompute HMAC-SHA256 of the body bytes exactly as received
//! 3. Compare in constant time
//!
//! The body must be the original bytes. Re-serializing parsed JSON changes the
//! digest.
//!
//! Verification fails closed: malformed input or an internal error yields
//! `false`, never a panic or an error.

use crate::types::WebhookEvent;
use crate::{Result, UpayError};
use hmac::{Hmac, Mac};
use http::HeaderMap;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

/// Length of a hex-encoded SHA-256 digest
pub const SIGNATURE_HEX_LEN: usize = 64;

/// Header names checked for a signature, in priority order
pub const SIGNATURE_HEADERS: [&str; 4] = [
    "x-upay-signature",
    "x-upay-signature-256",
    "upay-signature",
    "signature",
];

const SCHEME_PREFIX: &str = "sha256=";

/// HMAC-SHA256 capability used by [`WebhookVerifier`]
pub trait HmacProvider: Send + Sync {
    /// Compute HMAC-SHA256 of `message` under `key`
    fn hmac_sha256(&self, key: &[u8], message: &[u8]) -> Result<[u8; 32]>;
}

/// Default provider backed by the `hmac` and `sha2` crates
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hmac;

impl HmacProvider for Sha256Hmac {
    fn hmac_sha256(&self, key: &[u8], message: &[u8]) -> Result<[u8; 32]> {
        let mut mac = Hmac::<Sha256>::new_from_slice(key)
            .map_err(|e| UpayError::invalid_signature(format!("invalid HMAC key: {}", e)))?;
        mac.update(message);
        Ok(mac.finalize().into_bytes().into())
    }
}

/// Verifies webhook signatures with an injected [`HmacProvider`]
#[derive(Debug, Clone, Default)]
pub struct WebhookVerifier<P = Sha256Hmac> {
    provider: P,
}

impl WebhookVerifier<Sha256Hmac> {
    /// Create a verifier using [`Sha256Hmac`]
    pub fn new() -> Self {
        Self {
            provider: Sha256Hmac,
        }
    }
}

impl<P: HmacProvider> WebhookVerifier<P> {
    /// Create a verifier with a custom provider
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Check `signature` against HMAC-SHA256(`secret`, `payload`)
    ///
    /// Returns `false` when any input is empty, when `signature` is not exactly
    /// 64 hex characters, or when anything goes wrong while hashing. The final
    /// comparison takes the same time wherever the first differing byte is.
    pub fn verify(&self, payload: &[u8], signature: &str, secret: &str) -> bool {
        if payload.is_empty() || signature.is_empty() || secret.is_empty() {
            return false;
        }

        if !is_hex_digest(signature) {
            debug!("Webhook signature is not a {}-character hex string", SIGNATURE_HEX_LEN);
            return false;
        }

        let mut provided = [0u8; 32];
        if let Err(e) = hex::decode_to_slice(signature, &mut provided) {
            warn!("Failed to decode webhook signature: {}", e);
            return false;
        }

        let expected = match self.provider.hmac_sha256(secret.as_bytes(), payload) {
            Ok(digest) => digest,
            Err(e) => {
                warn!("Failed to compute webhook signature: {}", e);
                return false;
            }
        };

        expected[..].ct_eq(&provided[..]).into()
    }

    /// Hex-encoded signature for `payload`, as Upay would send it
    pub fn sign(&self, payload: &[u8], secret: &str) -> Result<String> {
        let digest = self.provider.hmac_sha256(secret.as_bytes(), payload)?;
        Ok(hex::encode(digest))
    }

    /// Verify a webhook request and parse its event
    ///
    /// Fails with [`UpayError::InvalidSignature`] when no signature header is
    /// present or the signature does not match.
    pub fn construct_event(
        &self,
        payload: &[u8],
        headers: &HeaderMap,
        secret: &str,
    ) -> Result<WebhookEvent> {
        let signature = extract_signature(headers)
            .ok_or_else(|| UpayError::invalid_signature("missing signature header"))?;

        if !self.verify(payload, &signature, secret) {
            return Err(UpayError::invalid_signature("signature does not match payload"));
        }

        parse_event(payload)
    }
}

fn is_hex_digest(signature: &str) -> bool {
    signature.len() == SIGNATURE_HEX_LEN && signature.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Verify a webhook signature with the default HMAC provider
///
/// See [`WebhookVerifier::verify`].
pub fn verify_signature(payload: &[u8], signature: &str, secret: &str) -> bool {
    WebhookVerifier::new().verify(payload, signature, secret)
}

/// Hex-encoded HMAC-SHA256 of `payload` under `secret`
pub fn compute_signature(payload: &[u8], secret: &str) -> Result<String> {
    WebhookVerifier::new().sign(payload, secret)
}

/// Find the webhook signature in request headers
///
/// Checks [`SIGNATURE_HEADERS`] in order (header names are case-insensitive),
/// takes the first value of a repeated header, and strips a leading `sha256=`.
/// Empty or non-ASCII values are skipped.
pub fn extract_signature(headers: &HeaderMap) -> Option<String> {
    SIGNATURE_HEADERS.iter().find_map(|name| {
        let value = headers.get_all(*name).iter().next()?.to_str().ok()?.trim();
        if value.is_empty() {
            return None;
        }
        let value = value.strip_prefix(SCHEME_PREFIX).unwrap_or(value);
        Some(value.to_string())
    })
}

/// Parse a webhook body without verifying it
pub fn parse_event(payload: &[u8]) -> Result<WebhookEvent> {
    Ok(serde_json::from_slice(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WebhookEventType;
    use http::{HeaderName, HeaderValue};

    const SECRET: &str = "whsec_test";
    const BODY: &[u8] = br#"{"id":"evt_1","type":"transaction.paid","data":{"id":"tx_1"}}"#;

    #[test]
    fn test_known_vector() {
        // RFC 4231 test case 2
        let sig = compute_signature(b"what do ya want for nothing?", "Jefe").unwrap();
        assert_eq!(
            sig,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_verify_roundtrip() {
        let sig = compute_signature(BODY, SECRET).unwrap();
        assert!(verify_signature(BODY, &sig, SECRET));
        assert!(verify_signature(BODY, &sig.to_uppercase(), SECRET));
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let sig = compute_signature(BODY, SECRET).unwrap();
        assert!(!verify_signature(b"{\"id\":\"evt_2\"}", &sig, SECRET));
        assert!(!verify_signature(BODY, &sig, "other_secret"));
    }

    #[test]
    fn test_verify_rejects_empty_inputs() {
        let sig = compute_signature(BODY, SECRET).unwrap();
        assert!(!verify_signature(b"", &sig, SECRET));
        assert!(!verify_signature(BODY, "", SECRET));
        assert!(!verify_signature(BODY, &sig, ""));
    }

    #[test]
    fn test_verify_rejects_malformed_signatures() {
        let sig = compute_signature(BODY, SECRET).unwrap();
        assert!(!verify_signature(BODY, &sig[..63], SECRET));
        assert!(!verify_signature(BODY, &format!("{}0", sig), SECRET));
        assert!(!verify_signature(BODY, &format!("sha256={}", sig), SECRET));
        assert!(!verify_signature(BODY, &"z".repeat(64), SECRET));
        // 64 bytes but not 64 characters of hex
        assert!(!verify_signature(BODY, &"é".repeat(32), SECRET));
    }

    struct FailingProvider;

    impl HmacProvider for FailingProvider {
        fn hmac_sha256(&self, _key: &[u8], _message: &[u8]) -> Result<[u8; 32]> {
            Err(UpayError::invalid_signature("provider unavailable"))
        }
    }

    #[test]
    fn test_provider_failure_fails_closed() {
        let sig = compute_signature(BODY, SECRET).unwrap();
        let verifier = WebhookVerifier::with_provider(FailingProvider);
        assert!(!verifier.verify(BODY, &sig, SECRET));
    }

    #[test]
    fn test_extract_strips_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(b"X-Upay-Signature").unwrap(),
            HeaderValue::from_static("sha256=abcd1234"),
        );
        assert_eq!(extract_signature(&headers).as_deref(), Some("abcd1234"));
    }

    #[test]
    fn test_extract_none_without_candidates() {
        let mut headers = HeaderMap::new();
        headers.insert("x-other", HeaderValue::from_static("abcd"));
        assert_eq!(extract_signature(&headers), None);
        assert_eq!(extract_signature(&HeaderMap::new()), None);
    }

    #[test]
    fn test_extract_priority_order() {
        let mut headers = HeaderMap::new();
        headers.insert("signature", HeaderValue::from_static("fourth"));
        headers.insert("upay-signature", HeaderValue::from_static("third"));
        headers.insert("x-upay-signature-256", HeaderValue::from_static("second"));
        assert_eq!(extract_signature(&headers).as_deref(), Some("second"));

        headers.insert("x-upay-signature", HeaderValue::from_static("first"));
        assert_eq!(extract_signature(&headers).as_deref(), Some("first"));
    }

    #[test]
    fn test_extract_first_of_repeated_header() {
        let mut headers = HeaderMap::new();
        headers.append("x-upay-signature", HeaderValue::from_static("one"));
        headers.append("x-upay-signature", HeaderValue::from_static("two"));
        assert_eq!(extract_signature(&headers).as_deref(), Some("one"));
    }

    #[test]
    fn test_extract_skips_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert("x-upay-signature", HeaderValue::from_static(""));
        headers.insert("signature", HeaderValue::from_static("sha256=ff"));
        assert_eq!(extract_signature(&headers).as_deref(), Some("ff"));
    }

    #[test]
    fn test_construct_event() {
        let sig = compute_signature(BODY, SECRET).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-upay-signature",
            HeaderValue::from_str(&format!("sha256={}", sig)).unwrap(),
        );

        let event = WebhookVerifier::new()
            .construct_event(BODY, &headers, SECRET)
            .unwrap();
        assert_eq!(event.id, "evt_1");
        assert_eq!(event.event_type, WebhookEventType::TransactionPaid);
        assert_eq!(event.data["id"], "tx_1");
    }

    #[test]
    fn test_construct_event_rejects_bad_signature() {
        let mut headers = HeaderMap::new();
        headers.insert("x-upay-signature", HeaderValue::from_static("00"));
        let err = WebhookVerifier::new()
            .construct_event(BODY, &headers, SECRET)
            .unwrap_err();
        assert!(matches!(err, UpayError::InvalidSignature { .. }));

        let err = WebhookVerifier::new()
            .construct_event(BODY, &HeaderMap::new(), SECRET)
            .unwrap_err();
        assert!(err.to_string().contains("missing signature header"));
    }
}
