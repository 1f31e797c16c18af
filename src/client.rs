//! HTTP client for the ConnectWise Manage API.
//!
//! This module provides `CwClient`, the request executor. Each operation
//! issues exactly one authenticated HTTP call and classifies the outcome:
//!
//! 1. HTTP 404 is an absence signal (`None` or `false`), except for
//!    [`CwClient::create`] where it is an error.
//! 2. Any other non-2xx status becomes a typed [`CwError`].
//! 3. A 2xx response yields the parsed JSON payload.
//!
//! # Retries
//!
//! The client performs no retries and no backoff, including for rate-limit
//! and server errors. Use [`CwError::is_retryable`] and
//! [`CwError::retry_after`] to build a policy on top.
//!
//! # Security
//!
//! The auth header is never logged.

use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::auth::AuthHeaders;
use crate::config::Config;
use crate::error::{ApiError, CwError};
use crate::models::PatchOperation;
use crate::query::Query;

/// API path appended to a site URL without a release segment.
const RELEASE_API_PATH: &str = "/v4_6_release/apis/3.0";

/// API path appended when the site URL already ends in the release segment.
const API_PATH: &str = "/apis/3.0";

/// Endpoint used for connection tests.
const SYSTEM_INFO_ENDPOINT: &str = "system/info";

/// HTTP client for the ConnectWise Manage API.
///
/// Cloning is cheap and shares the underlying connection pool. The client
/// holds no mutable state.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = CwClient::new(&config)?;
///
/// let open = client
///     .fetch_all("service/tickets", &Query::new().with_conditions("closedFlag=false"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct CwClient {
    /// The underlying HTTP client.
    http: Client,

    /// Site URL with any API path removed.
    base_url: String,

    /// Full API URL (e.g., `https://cw.example.com/v4_6_release/apis/3.0`).
    api_url: String,

    /// Path of the web UI service pages, relative to `base_url`.
    service_path: String,

    /// Authentication headers.
    /// SECURITY: Never log these values!
    auth: AuthHeaders,

    /// Password, kept only to sanitize messages.
    password: String,

    /// Request timeout, reported in timeout errors.
    timeout: Duration,
}

impl CwClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `CwError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, CwError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(CwError::HttpClient)?;

        let (base_url, api_path, service_path) = Self::normalize_base_url(&config.base_url);

        Ok(Self {
            http,
            api_url: format!("{}{}", base_url, api_path),
            base_url,
            service_path,
            auth: AuthHeaders::from_config(config),
            password: config.password().to_string(),
            timeout: config.timeout,
        })
    }

    /// Splits a configured URL into the site URL, the API path and the
    /// web service path.
    ///
    /// Accepts both a bare site URL and a full API URL such as
    /// `https://cw.example.com/v4_6_release/apis/3.0`.
    fn normalize_base_url(url: &str) -> (String, &'static str, String) {
        let mut base = url.trim_end_matches('/');
        if let Some(idx) = base.find("/apis/") {
            base = &base[..idx];
        }

        if base.ends_with("/v4_6_release") {
            (
                base.to_string(),
                API_PATH,
                "/services/system_io/Service".to_string(),
            )
        } else {
            (
                base.to_string(),
                RELEASE_API_PATH,
                "/v4_6_release/services/system_io/Service".to_string(),
            )
        }
    }

    /// Returns the full API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the web URL for viewing a ticket in the ConnectWise UI.
    pub fn ticket_url(&self, ticket_id: u64) -> String {
        format!(
            "{}{}/fv_sr100_request.rails?service_recid={}",
            self.base_url, self.service_path, ticket_id
        )
    }

    /// Strips credentials from a message before it is logged or shown.
    pub fn sanitize(&self, message: &str) -> String {
        let message = CwError::sanitize_message(message, self.auth.authorization());
        CwError::sanitize_message(&message, &self.password)
    }

    /// Tests connectivity and credentials.
    ///
    /// # Errors
    ///
    /// Returns `CwError::ConnectionTest` describing why the check failed.
    pub async fn test_connection(&self) -> Result<(), CwError> {
        tracing::debug!("Testing connection to ConnectWise");

        match self.fetch(SYSTEM_INFO_ENDPOINT, &Query::new()).await {
            Ok(Some(_)) => {
                tracing::info!("Connection test successful");
                Ok(())
            }
            Ok(None) => Err(CwError::connection_test(
                "system/info not found - verify CW_BASE_URL points at a ConnectWise site",
            )),
            Err(CwError::Authentication(e)) => Err(CwError::connection_test(format!(
                "authentication failed ({}) - verify CW_COMPANY, CW_USERNAME and CW_PASSWORD",
                self.sanitize(&e.message)
            ))),
            Err(CwError::Timeout { duration, .. }) => Err(CwError::connection_test(format!(
                "connection timed out after {:?} - verify CW_BASE_URL is reachable",
                duration
            ))),
            Err(e) => Err(CwError::connection_test(self.sanitize(&e.to_string()))),
        }
    }

    /// Performs a GET request.
    ///
    /// Only parameters set on `query` are sent.
    ///
    /// # Returns
    ///
    /// The parsed payload, or `None` if the server answered 404.
    pub async fn fetch(&self, endpoint: &str, query: &Query) -> Result<Option<Value>, CwError> {
        let response = self
            .send(Method::GET, endpoint, &query.to_pairs(), None)
            .await?;
        self.classify(response).await
    }

    /// Performs a POST request to create a record.
    ///
    /// A 404 here is an error like any other non-success status.
    pub async fn create<B>(&self, endpoint: &str, body: &B) -> Result<Value, CwError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::POST, endpoint, &[], Some(&body)).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.handle_http_error(status, response).await);
        }
        Self::parse_body(response).await
    }

    /// Performs a PUT request replacing the record `id`.
    ///
    /// # Returns
    ///
    /// The updated record, or `None` if the server answered 404.
    pub async fn replace<B>(
        &self,
        endpoint: &str,
        id: u64,
        body: &B,
    ) -> Result<Option<Value>, CwError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        let path = Self::record_path(endpoint, id);
        let response = self.send(Method::PUT, &path, &[], Some(&body)).await?;
        self.classify(response).await
    }

    /// Performs a PATCH request applying `operations` to the record `id`.
    ///
    /// The operations are sent as the whole body, in the given order.
    ///
    /// # Returns
    ///
    /// The updated record, or `None` if the server answered 404.
    pub async fn partial_update(
        &self,
        endpoint: &str,
        id: u64,
        operations: &[PatchOperation],
    ) -> Result<Option<Value>, CwError> {
        let body = serde_json::to_value(operations)?;
        let path = Self::record_path(endpoint, id);
        let response = self.send(Method::PATCH, &path, &[], Some(&body)).await?;
        self.classify(response).await
    }

    /// Performs a DELETE request on the record `id`.
    ///
    /// # Returns
    ///
    /// `true` on any success status (204 included), `false` on 404.
    pub async fn remove(&self, endpoint: &str, id: u64) -> Result<bool, CwError> {
        let path = Self::record_path(endpoint, id);
        let response = self.send(Method::DELETE, &path, &[], None).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !status.is_success() {
            return Err(self.handle_http_error(status, response).await);
        }
        Ok(true)
    }

    fn record_path(endpoint: &str, id: u64) -> String {
        format!("{}/{}", endpoint.trim_end_matches('/'), id)
    }

    /// Sends one authenticated request.
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<Response, CwError> {
        let endpoint = endpoint.trim_matches('/');
        if endpoint.is_empty() {
            return Err(CwError::validation("endpoint must not be empty"));
        }
        let url = format!("{}/{}", self.api_url, endpoint);

        tracing::debug!(
            method = %method,
            endpoint = %endpoint,
            params = query.len(),
            "Making ConnectWise API request"
        );

        let mut req = self.auth.apply(self.http.request(method.clone(), &url));
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        req.send().await.map_err(|e| {
            if e.is_timeout() {
                return CwError::Timeout {
                    duration: self.timeout,
                    operation: format!("{} {}", method, endpoint),
                };
            }
            CwError::Http(e)
        })
    }

    /// Applies the shared classification: 404 is absence, other failures
    /// are typed errors, success is the parsed payload.
    async fn classify(&self, response: Response) -> Result<Option<Value>, CwError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Resource not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(self.handle_http_error(status, response).await);
        }

        Self::parse_body(response).await.map(Some)
    }

    /// Parses a success body. An empty body is treated as JSON `null`.
    async fn parse_body(response: Response) -> Result<Value, CwError> {
        let body = response.text().await.map_err(CwError::Http)?;

        tracing::trace!(len = body.len(), "ConnectWise API response");

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Converts a non-success response into a typed error.
    async fn handle_http_error(&self, status: StatusCode, response: Response) -> CwError {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(
                    status = status.as_u16(),
                    error = %e,
                    "Failed to read error body"
                );
                String::new()
            }
        };
        let body = serde_json::from_str::<Value>(&text).ok();
        let message = Self::error_message(status, &text, body.as_ref());

        let code = status.as_u16();
        if code == 429 {
            tracing::warn!(retry_after = ?retry_after, "Rate limited by ConnectWise");
        } else if status.is_server_error() {
            tracing::warn!(status = code, "ConnectWise server error");
        } else {
            tracing::debug!(status = code, "ConnectWise API error");
        }

        CwError::from_status(ApiError::new(code, message, body), retry_after)
    }

    /// Picks the error message: the JSON `message` field, then the raw
    /// text, then a message naming the status code.
    fn error_message(status: StatusCode, text: &str, body: Option<&Value>) -> String {
        let from_json = body
            .and_then(|b| b.get("message"))
            .and_then(|m| match m {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            });

        if let Some(message) = from_json {
            return message;
        }
        if !text.trim().is_empty() {
            return text.to_string();
        }
        format!("HTTP {} error", status.as_u16())
    }
}
