//! HTTP Transport
//!
//! The queue talks to the catalog API through the [`Transport`] trait so
//! tests can substitute scripted responses. [`ReqwestTransport`] is the
//! production implementation: a GET against `base_url + endpoint`.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Raw response returned by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, unparsed
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Build a 200 response carrying a JSON document
    pub fn json(value: &serde_json::Value) -> Self {
        Self::new(200, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// Network-level failure reported by a transport
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportFailure {
    pub message: String,
}

impl TransportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_connect() {
            "connection failed"
        } else if err.is_timeout() {
            "timeout"
        } else if err.is_body() || err.is_decode() {
            "body read failed"
        } else {
            "request failed"
        };
        Self::new(format!("{}: {}", kind, err))
    }
}

/// HTTP collaborator used by the fetch queue
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET for a relative endpoint (path + query)
    async fn get(&self, endpoint: &str) -> Result<TransportResponse, TransportFailure>;
}

/// reqwest-backed transport for the catalog API
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport for `base_url`
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        connect_timeout: Duration,
    ) -> Result<Self, TransportFailure> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| TransportFailure::new(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(base_url, client))
    }

    /// Wrap an existing client
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint; the endpoint is appended verbatim
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, endpoint: &str) -> Result<TransportResponse, TransportFailure> {
        let response = self.client.get(self.url_for(endpoint)).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(TransportResponse::new(status, body.to_vec()))
    }
}
