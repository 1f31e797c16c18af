//! Configuration management for the ConnectWise client.
//!
//! Configuration can be built from explicit values with [`Config::new`] or
//! loaded from environment variables with [`Config::from_env`]. Both paths
//! validate eagerly, so a missing credential is reported at construction
//! time rather than on the first request.

use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::CwError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default values applied when creating tickets.
///
/// Any id left unset on a new ticket is taken from here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketDefaults {
    /// Company the ticket is raised for.
    pub company_id: Option<u64>,
    /// Service board.
    pub board_id: Option<u64>,
    /// Priority.
    pub priority_id: Option<u64>,
    /// Initial status.
    pub status_id: Option<u64>,
    /// Ticket type.
    pub type_id: Option<u64>,
    /// Ticket source.
    pub source_id: Option<u64>,
}

/// Configuration for connecting to ConnectWise Manage.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the ConnectWise site (e.g., `https://na.myconnectwise.net`).
    pub base_url: String,

    /// Company identifier used as the login prefix.
    pub company: String,

    /// API member username or public key.
    pub username: String,

    /// API password or private key.
    /// This value must never be logged or included in error messages.
    password: String,

    /// Client ID registered with ConnectWise, sent on every request.
    pub client_id: String,

    /// Timeout applied to every request.
    pub timeout: Duration,

    /// Defaults for ticket creation.
    pub ticket_defaults: TicketDefaults,
}

impl Config {
    /// Builds a configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns `CwError::Config` if any value is empty or the base URL is
    /// not a valid http(s) URL.
    pub fn new(
        base_url: impl Into<String>,
        company: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Result<Self, CwError> {
        let base_url = Self::required("base_url", base_url.into())?;
        let company = Self::required("company", company.into())?;
        let username = Self::required("username", username.into())?;
        let password = Self::required("password", password.into())?;
        let client_id = Self::required("client_id", client_id.into())?;

        Ok(Config {
            base_url: Self::validate_base_url(base_url)?,
            company,
            username,
            password,
            client_id,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ticket_defaults: TicketDefaults::default(),
        })
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `CW_BASE_URL`, `CW_COMPANY`, `CW_USERNAME`, `CW_PASSWORD`, `CW_CLIENT_ID`
    ///
    /// # Optional Environment Variables
    ///
    /// - `CW_TIMEOUT_SECS`: request timeout (default 30)
    /// - `CW_DEFAULT_COMPANY_ID`, `CW_DEFAULT_BOARD_ID`, `CW_DEFAULT_PRIORITY_ID`,
    ///   `CW_DEFAULT_STATUS_ID`, `CW_DEFAULT_TYPE_ID`, `CW_DEFAULT_SOURCE_ID`
    ///
    /// # Errors
    ///
    /// Returns `CwError::Config` if a required variable is missing or any
    /// value fails validation.
    ///
    /// # Example
    ///
    /// ```ignore
    /// dotenvy::dotenv().ok();
    /// let config = Config::from_env()?;
    /// ```
    pub fn from_env() -> Result<Self, CwError> {
        let mut config = Config::new(
            Self::env_value("CW_BASE_URL").unwrap_or_default(),
            Self::env_value("CW_COMPANY").unwrap_or_default(),
            Self::env_value("CW_USERNAME").unwrap_or_default(),
            Self::env_value("CW_PASSWORD").unwrap_or_default(),
            Self::env_value("CW_CLIENT_ID").unwrap_or_default(),
        )
        .map_err(|e| match e {
            CwError::Config(msg) => CwError::Config(format!("{} (check CW_* variables)", msg)),
            other => other,
        })?;

        if let Some(secs) = Self::env_id("CW_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }

        config.ticket_defaults = TicketDefaults {
            company_id: Self::env_id("CW_DEFAULT_COMPANY_ID")?,
            board_id: Self::env_id("CW_DEFAULT_BOARD_ID")?,
            priority_id: Self::env_id("CW_DEFAULT_PRIORITY_ID")?,
            status_id: Self::env_id("CW_DEFAULT_STATUS_ID")?,
            type_id: Self::env_id("CW_DEFAULT_TYPE_ID")?,
            source_id: Self::env_id("CW_DEFAULT_SOURCE_ID")?,
        };

        Ok(config)
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the ticket creation defaults.
    pub fn with_ticket_defaults(mut self, defaults: TicketDefaults) -> Self {
        self.ticket_defaults = defaults;
        self
    }

    /// Returns the API password.
    ///
    /// Only for building the auth header and sanitizing messages.
    pub fn password(&self) -> &str {
        &self.password
    }

    fn required(name: &str, value: String) -> Result<String, CwError> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(CwError::missing(name));
        }
        Ok(value)
    }

    fn env_value(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    fn env_id(name: &str) -> Result<Option<u64>, CwError> {
        Self::env_value(name)
            .map(|v| {
                v.trim().parse::<u64>().map_err(|_| {
                    CwError::invalid_config(format!("{} must be a positive integer", name))
                })
            })
            .transpose()
    }

    /// Validates the base URL and strips trailing slashes.
    fn validate_base_url(url: String) -> Result<String, CwError> {
        let url = url.trim_end_matches('/').to_string();

        let parsed = Url::parse(&url)
            .map_err(|e| CwError::invalid_config(format!("base_url is not a valid URL: {}", e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CwError::invalid_config(
                "base_url must start with http:// or https://",
            ));
        }

        Ok(url)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("company", &self.company)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .field("timeout", &self.timeout)
            .field("ticket_defaults", &self.ticket_defaults)
            .finish()
    }
}
