//! Authentication headers for the ConnectWise API.
//!
//! ConnectWise uses HTTP Basic auth where the login is the company
//! identifier and username joined by `+`, plus a `clientId` header
//! identifying the integration. Both values are built once and attached
//! verbatim to every request.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::Config;

/// Header carrying the registered client ID.
pub const CLIENT_ID_HEADER: &str = "clientId";

/// Pre-built authentication header values.
#[derive(Clone)]
pub struct AuthHeaders {
    authorization: String,
    client_id: String,
}

impl AuthHeaders {
    /// Builds the headers from configuration.
    pub fn from_config(config: &Config) -> Self {
        let credentials = format!(
            "{}+{}:{}",
            config.company,
            config.username,
            config.password()
        );
        Self {
            authorization: format!("Basic {}", STANDARD.encode(credentials)),
            client_id: config.client_id.clone(),
        }
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// Value of the `clientId` header.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Attaches both headers to a request.
    pub fn apply(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header(reqwest::header::AUTHORIZATION, &self.authorization)
            .header(CLIENT_ID_HEADER, &self.client_id)
    }
}

impl fmt::Debug for AuthHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthHeaders")
            .field("authorization", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers() -> AuthHeaders {
        let config =
            Config::new("https://cw.example.com", "acme", "apiuser", "s3cret", "cid-1").unwrap();
        AuthHeaders::from_config(&config)
    }

    #[test]
    fn test_basic_token_joins_company_and_username() {
        let auth = headers();
        let expected = format!("Basic {}", STANDARD.encode("acme+apiuser:s3cret"));
        assert_eq!(auth.authorization(), expected);
        assert_eq!(auth.client_id(), "cid-1");
    }

    #[test]
    fn test_debug_hides_token() {
        let auth = headers();
        let debug = format!("{:?}", auth);
        assert!(!debug.contains(auth.authorization()));
        assert!(debug.contains("cid-1"));
    }
}
