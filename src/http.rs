//! HTTP transport for the Upay API

use crate::config::UpayConfig;
use crate::error::ApiError;
use crate::{Result, UpayError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// User agent sent with every request
pub const SDK_USER_AGENT: &str = concat!("upay-rust/", env!("CARGO_PKG_VERSION"));

/// Path of the public coupon validation endpoint (no version segment)
pub const COUPON_VALIDATE_PATH: &str = "/api/coupons/validate";

/// Authenticated JSON transport
///
/// Every call issues exactly one request. Non-2xx responses become
/// [`UpayError::Api`], timeouts become [`UpayError::Timeout`].
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    api_key: String,
    base_url: String,
    version: String,
    timeout: Duration,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpClient {
    /// Create a transport from a validated config
    pub fn new(config: &UpayConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(SDK_USER_AGENT));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| UpayError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            version: config.version.clone(),
            timeout: config.timeout,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of a versioned endpoint
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/api/{}{}", self.base_url, self.version, endpoint)
    }

    /// GET a versioned endpoint
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value> {
        let mut request = self.authed(Method::GET, endpoint);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(request).await
    }

    /// POST a JSON body to a versioned endpoint
    pub async fn post<B>(&self, endpoint: &str, body: Option<&B>) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.authed(Method::POST, endpoint);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request).await
    }

    /// PATCH a JSON body to a versioned endpoint
    pub async fn patch<B>(&self, endpoint: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let request = self.authed(Method::PATCH, endpoint).json(body);
        self.execute(request).await
    }

    /// DELETE a versioned endpoint
    pub async fn delete(&self, endpoint: &str) -> Result<Value> {
        let request = self.authed(Method::DELETE, endpoint);
        self.execute(request).await
    }

    /// POST to an unauthenticated path under the base URL
    pub async fn post_public<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);
        let request = self.client.post(url).json(body);
        self.execute(request).await
    }

    fn authed(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = self.endpoint_url(endpoint);
        debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        let body = parse_body(&text);

        if !status.is_success() {
            debug!("Upay API returned status {}", status);
            return Err(ApiError::from_response(status.as_u16(), &body).into());
        }

        Ok(body)
    }

    fn transport_error(&self, err: reqwest::Error) -> UpayError {
        if err.is_timeout() {
            UpayError::Timeout {
                timeout: self.timeout,
            }
        } else {
            UpayError::Transport(err)
        }
    }
}

/// Decode a response body: empty becomes `{}`, non-JSON text is kept as a string
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(Default::default());
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
