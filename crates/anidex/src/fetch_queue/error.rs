//! Fetch queue error types
//!
//! Every failure is delivered to the caller that enqueued the request;
//! the drain loop itself never fails.

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced through a [`FetchHandle`](super::FetchHandle)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The single retry after an HTTP 429 also failed
    #[error("API rate limit exceeded for {endpoint} (retry returned {status})")]
    RateLimitExceeded { endpoint: String, status: u16 },

    /// Non-2xx response other than 429
    #[error("API error {status} for {endpoint}")]
    HttpStatus { endpoint: String, status: u16 },

    /// Network-level failure (connection refused, DNS, reset, ...)
    #[error("Transport error for {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    /// The transport did not answer within the configured timeout
    #[error("Request to {endpoint} timed out after {timeout:?}")]
    Timeout { endpoint: String, timeout: Duration },

    /// 2xx response whose body is not valid JSON
    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    /// Endpoint is not a relative path
    #[error("Invalid endpoint: {0:?} (must start with '/')")]
    InvalidEndpoint(String),

    /// The queue was torn down before the request completed
    #[error("Fetch queue closed before the request completed")]
    QueueClosed,
}

impl FetchError {
    /// The endpoint this error belongs to, if any
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::RateLimitExceeded { endpoint, .. }
            | Self::HttpStatus { endpoint, .. }
            | Self::Transport { endpoint, .. }
            | Self::Timeout { endpoint, .. }
            | Self::MalformedResponse { endpoint, .. } => Some(endpoint),
            Self::InvalidEndpoint(endpoint) => Some(endpoint),
            Self::QueueClosed => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }

    /// "Server said no" or "server never answered"
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpStatus { .. } | Self::Transport { .. } | Self::Timeout { .. }
        )
    }

    /// "Server said yes but the body is unusable"
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }
}
