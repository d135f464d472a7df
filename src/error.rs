//! Error types for the Upay client
//!
//! Errors fall into three groups:
//!
//! - [`UpayError::Api`]: the Upay API answered with a non-2xx status. The
//!   [`ApiError`] carries the upstream message, an optional machine-readable
//!   code, the HTTP status and any structured details.
//! - [`UpayError::InvalidInput`]: a pre-flight check rejected the input. These
//!   never reach the network.
//! - [`UpayError::Timeout`] / [`UpayError::Transport`]: the request never
//!   produced an HTTP response.

use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for Upay operations
pub type Result<T> = std::result::Result<T, UpayError>;

/// Main error type for Upay operations
#[derive(Error, Debug)]
pub enum UpayError {
    /// The API returned a non-success status
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Caller-supplied input failed local validation
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The request did not complete within the configured timeout
    #[error("Request timeout after {timeout:?}")]
    Timeout { timeout: Duration },

    /// Network failure other than a timeout
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Webhook signature missing or not matching
    #[error("Invalid signature: {message}")]
    InvalidSignature { message: String },
}

impl UpayError {
    /// Create an input validation error for `field`
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid signature error
    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::InvalidSignature {
            message: message.into(),
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status),
            _ => None,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api(err) => err.code.as_deref(),
            Self::InvalidInput { .. } => Some("INVALID_INPUT"),
            Self::Config { .. } => Some("CONFIGURATION_ERROR"),
            Self::Timeout { .. } => Some("TIMEOUT"),
            _ => None,
        }
    }

    /// The API error kind, if this is an API error
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api(err) => Some(err.kind),
            _ => None,
        }
    }

    /// Whether the error was raised before any request was sent
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Whether the request timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Category of an API error, keyed by HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// 401
    Authentication,
    /// 400
    Validation,
    /// 404
    NotFound,
    /// 429
    RateLimit,
    /// 500, 502, 503
    Server,
    /// Any other non-success status
    Other,
}

impl ApiErrorKind {
    /// Classify an HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::Validation,
            401 => Self::Authentication,
            404 => Self::NotFound,
            429 => Self::RateLimit,
            500 | 502 | 503 => Self::Server,
            _ => Self::Other,
        }
    }

    /// Code used when the API did not send one
    pub fn default_code(&self) -> Option<&'static str> {
        match self {
            Self::Authentication => Some("AUTHENTICATION_ERROR"),
            Self::Validation => Some("VALIDATION_ERROR"),
            Self::NotFound => Some("NOT_FOUND"),
            Self::RateLimit => Some("RATE_LIMIT_ERROR"),
            Self::Server => Some("SERVER_ERROR"),
            Self::Other => None,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authentication => "Authentication error",
            Self::Validation => "Validation error",
            Self::NotFound => "Not found",
            Self::RateLimit => "Rate limit exceeded",
            Self::Server => "Server error",
            Self::Other => "API error",
        };
        f.write_str(name)
    }
}

/// Error response returned by the Upay API
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} ({status}): {message}")]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// Upstream message, or `HTTP <status>` when none was sent
    pub message: String,
    /// Machine-readable code
    pub code: Option<String>,
    /// HTTP status code
    pub status: u16,
    /// Structured details (validation errors, or the raw body for unknown statuses)
    pub details: Option<Value>,
    /// Identifier of the missing resource, for 404s
    pub resource_id: Option<String>,
}

impl ApiError {
    /// Build an API error from a status code and the decoded response body
    pub fn from_response(status: u16, body: &Value) -> Self {
        let kind = ApiErrorKind::from_status(status);

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));

        let code = body
            .get("code")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| kind.default_code().map(str::to_string));

        let details = match kind {
            ApiErrorKind::Validation => body.get("details").filter(|d| !d.is_null()).cloned(),
            ApiErrorKind::Other if !body.is_null() => Some(body.clone()),
            _ => None,
        };

        let resource_id = match kind {
            ApiErrorKind::NotFound => body.get("id").and_then(|id| match id {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
            _ => None,
        };

        Self {
            kind,
            message,
            code,
            status,
            details,
            resource_id,
        }
    }

    /// Check if this is an authentication error
    pub fn is_authentication_error(&self) -> bool {
        self.kind == ApiErrorKind::Authentication
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limit_error(&self) -> bool {
        self.kind == ApiErrorKind::RateLimit
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}
