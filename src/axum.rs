//! Axum integration for Upay webhooks
//!
//! [`verify_webhook`] buffers the request body, checks its signature and passes
//! the request on with the original bytes. Unsigned or tampered requests get
//! `401 Unauthorized` and never reach the handler.

use crate::webhook::{extract_signature, WebhookVerifier};
use axum::{
    body::Body,
    extract::{Request, State},
    handler::Handler,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Largest webhook body accepted by default (1 MiB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Shared state of the webhook middleware
#[derive(Clone)]
pub struct WebhookState {
    secret: Arc<str>,
    body_limit: usize,
    verifier: WebhookVerifier,
}

impl std::fmt::Debug for WebhookState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookState")
            .field("secret", &"<redacted>")
            .field("body_limit", &self.body_limit)
            .finish()
    }
}

impl WebhookState {
    /// Create a new webhook state for `secret`
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
            body_limit: DEFAULT_BODY_LIMIT,
            verifier: WebhookVerifier::new(),
        }
    }

    /// Set the maximum body size in bytes
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }
}

/// Middleware that rejects webhook requests without a valid signature
///
/// Use with [`axum::middleware::from_fn_with_state`].
pub async fn verify_webhook(
    State(state): State<WebhookState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(signature) = extract_signature(request.headers()) else {
        warn!("Rejected webhook without signature header");
        return (StatusCode::UNAUTHORIZED, "Missing signature").into_response();
    };

    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, state.body_limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read webhook body: {}", e);
            return (StatusCode::PAYLOAD_TOO_LARGE, "Invalid body").into_response();
        }
    };

    if !state.verifier.verify(&bytes, &signature, &state.secret) {
        warn!("Rejected webhook with invalid signature");
        return (StatusCode::UNAUTHORIZED, "Invalid signature").into_response();
    }

    debug!("Webhook signature verified");

    let request = Request::from_parts(parts, Body::from(bytes));
    next.run(request).await
}

/// Router serving `handler` on `POST path` behind [`verify_webhook`]
pub fn webhook_router<H, T>(path: &str, handler: H, secret: impl Into<String>) -> Router
where
    H: Handler<T, ()>,
    T: 'static,
{
    let state = WebhookState::new(secret);

    Router::new()
        .route(path, post(handler))
        .layer(middleware::from_fn_with_state(state, verify_webhook))
}
