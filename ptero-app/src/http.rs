//! HTTP transport for the panel's application API.
//!
//! Sends authenticated JSON requests with reqwest, maps response statuses
//! onto [`TransportError`], and retries transient failures with
//! exponential backoff.

use async_trait::async_trait;
use ptero_core::{Query, Transport, TransportError};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::config::{AppConfig, ConfigError};
use crate::retry::{with_retry_if, RetryConfig};

/// Transport that talks to a panel over HTTP.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    /// HTTP client instance.
    client: Client,

    /// Root of the application API, without a trailing slash.
    base_url: String,

    /// Bearer key sent with every request.
    api_key: String,

    /// Retry behaviour for transient failures.
    retry: RetryConfig,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Create a transport from validated configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError` if the configuration is incomplete or the HTTP client
    /// cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "http_client".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.api_url(),
            api_key: config.api_key.clone().unwrap_or_default(),
            retry: config.retry(),
        })
    }

    /// Root of the application API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&Query>,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        with_retry_if(
            &self.retry,
            || self.send_once(method.clone(), path, query, body),
            TransportError::is_transient,
        )
        .await
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        query: Option<&Query>,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        let mut request = self
            .client
            .request(method, self.url(path))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json");

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            request = request.query(&query.pairs());
        }
        if let Some(body) = body.filter(|b| !b.is_null()) {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        handle_response(path, response).await
    }
}

/// Map a response onto parsed JSON or a transport error.
async fn handle_response(path: &str, response: reqwest::Response) -> Result<Value, TransportError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        error!("Panel authentication failed ({})", status.as_u16());
        return Err(TransportError::AuthenticationFailed);
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(TransportError::NotFound(path.to_string()));
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        warn!("Panel API error ({}): {}", status.as_u16(), message);
        return Err(TransportError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| TransportError::Request(e.to_string()))?;

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&text).map_err(|e| TransportError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, query))]
    async fn get(&self, path: &str, query: &Query) -> Result<Value, TransportError> {
        debug!("GET {}", path);
        self.request(Method::GET, path, Some(query), None).await
    }

    #[instrument(skip(self, body))]
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        debug!("POST {}", path);
        self.request(Method::POST, path, None, Some(body)).await
    }

    #[instrument(skip(self, body))]
    async fn patch(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        debug!("PATCH {}", path);
        self.request(Method::PATCH, path, None, Some(body)).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> Result<Value, TransportError> {
        debug!("DELETE {}", path);
        self.request(Method::DELETE, path, None, None).await
    }
}
