//! Error types for the ConnectWise client.
//!
//! This module defines `CwError`, the unified error type used throughout
//! the crate. HTTP failures returned by the API are classified by status
//! code into typed variants, each carrying an [`ApiError`] with the
//! extracted message, the numeric status and the raw response body.
//!
//! A 404 is never represented here for read/update/delete paths; those
//! operations return `None` or `false` instead.
//!
//! # Security
//!
//! Use `sanitize_message()` before logging text that may echo request
//! headers back, so the password and auth token never reach the logs.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Details of an error response returned by the ConnectWise API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// Human-readable message extracted from the response.
    pub message: String,

    /// The HTTP status code.
    pub status: u16,

    /// The parsed JSON body, or `None` if the body was not valid JSON.
    pub body: Option<serde_json::Value>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: u16, message: impl Into<String>, body: Option<serde_json::Value>) -> Self {
        Self {
            message: message.into(),
            status,
            body,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

/// Unified error type for all client operations.
#[derive(Error, Debug)]
pub enum CwError {
    /// Configuration error - missing or invalid credentials or settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {duration:?} ({operation})")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (HTTP 401).
    #[error("{0}")]
    Authentication(ApiError),

    /// The request was rejected as invalid (HTTP 400).
    #[error("{0}")]
    BadRequest(ApiError),

    /// Rate limited by the server (HTTP 429).
    #[error("{error}")]
    RateLimited {
        /// The error response details.
        error: ApiError,
        /// Delay requested by the `Retry-After` header, if present and numeric.
        retry_after: Option<Duration>,
    },

    /// The server failed to handle the request (HTTP 5xx).
    #[error("{0}")]
    Server(ApiError),

    /// Any other non-success status.
    #[error("{0}")]
    Api(ApiError),

    /// Input validation failed before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl CwError {
    /// Creates a configuration error for a missing required value.
    pub fn missing(name: &str) -> Self {
        CwError::Config(format!("{} is required", name))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        CwError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CwError::Validation(message.into())
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        CwError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Classifies a non-success response into a typed error.
    ///
    /// `retry_after` is only kept for 429 responses.
    pub fn from_status(error: ApiError, retry_after: Option<Duration>) -> Self {
        match error.status {
            401 => CwError::Authentication(error),
            400 => CwError::BadRequest(error),
            429 => CwError::RateLimited { error, retry_after },
            s if s >= 500 => CwError::Server(error),
            _ => CwError::Api(error),
        }
    }

    /// Returns the API error details if this error came from an HTTP response.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            CwError::Authentication(e)
            | CwError::BadRequest(e)
            | CwError::Server(e)
            | CwError::Api(e)
            | CwError::RateLimited { error: e, .. } => Some(e),
            _ => None,
        }
    }

    /// Returns the HTTP status code, if this error came from an HTTP response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.api_error().map(|e| e.status)
    }

    /// Returns the delay requested by the server before retrying, if any.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            CwError::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns true if the failure is transient.
    ///
    /// The client never retries on its own; this is for callers that
    /// implement their own retry policy.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            CwError::RateLimited { .. } | CwError::Server(_) | CwError::Timeout { .. } => true,
            CwError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns true if this is an authentication failure.
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(self, CwError::Authentication(_))
    }

    /// Replaces every occurrence of `secret` in `message` with `[REDACTED]`.
    #[must_use]
    pub fn sanitize_message(message: &str, secret: &str) -> String {
        if secret.is_empty() {
            return message.to_string();
        }
        message.replace(secret, "[REDACTED]")
    }
}
