//! REST API gateway for the preorder backend.
//!
//! One method per (resource, operation) pair, each issuing a single HTTP
//! request against the configured base URL and returning the raw JSON body.
//! Mapping to domain models happens in [`conversions`]; callers validate
//! input before anything reaches this layer.
//!
//! # Resources
//!
//! - `/products`, `/categories`, `/orders`: list, get, create, update, delete
//! - `/packages`: the above plus `/packages/track/{code}`
//!
//! No retries and no timeout beyond the transport default. Failures are
//! returned to the caller immediately.

pub mod conversions;
mod resources;

pub use resources::Resource;

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use thiserror::Error;
use tracing::error;
use url::Url;

use crate::config::ApiConfig;

use conversions::WireConvention;

/// Maximum number of body characters included in error logs.
const ERROR_BODY_PREVIEW: usize = 500;

/// Errors that can occur when talking to the REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// REST API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    wire_convention: WireConvention,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                wire_convention: config.wire_convention,
            }),
        })
    }

    /// Naming convention for request bodies.
    #[must_use]
    pub fn wire_convention(&self) -> WireConvention {
        self.inner.wire_convention
    }

    /// Base URL every path is appended to, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{path}", self.inner.base_url);
        Url::parse(&raw).map_err(|e| ApiError::Parse(format!("Invalid URL {raw}: {e}")))
    }

    /// Execute a GET request.
    pub(crate) async fn get(&self, path: &str) -> Result<Value, ApiError> {
        let response = self.inner.client.get(self.url(path)?).send().await?;
        self.handle_response(response).await
    }

    /// Execute a POST request.
    pub(crate) async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self.inner.client.post(self.url(path)?).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Execute a PUT request.
    pub(crate) async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self.inner.client.put(self.url(path)?).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Execute a DELETE request. Any response body is ignored.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.inner.client.delete(self.url(path)?).send().await?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(self.parse_error(response).await)
    }

    /// Handle API response and parse JSON.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value, ApiError> {
        if !response.status().is_success() {
            return Err(self.parse_error(response).await);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")))
    }

    /// Turn a non-2xx response into an error, logging a preview of the body.
    async fn parse_error(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let url = response.url().path().to_string();

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let preview: String = message.chars().take(ERROR_BODY_PREVIEW).collect();

        error!(
            status = %status,
            path = %url,
            body = %preview,
            "REST API returned non-success status"
        );

        if status == 404 {
            return ApiError::NotFound(url);
        }

        ApiError::Api { status, message }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("wire_convention", &self.inner.wire_convention)
            .finish_non_exhaustive()
    }
}
