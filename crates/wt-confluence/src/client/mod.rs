//! Confluence REST API client.
//!
//! Provides a sync HTTP client for the Confluence REST API with Basic or
//! Bearer authentication and a configurable TLS verification toggle.

mod pages;
mod search;

use std::time::Duration;

use serde::de::DeserializeOwned;
use ureq::Agent;
use ureq::tls::TlsConfig;
use wt_config::{Credentials, ToolConfig};

use crate::auth::auth_header;
use crate::error::ConfluenceError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
///
/// Request-scoped: tool invocations construct a fresh client and drop it
/// when done. A single failed call surfaces immediately; there are no
/// retries.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
}

impl ConfluenceClient {
    /// Create a client for a Confluence instance.
    ///
    /// `ssl_verify = false` disables TLS certificate verification, for
    /// instances behind self-signed certificates.
    pub fn new(base_url: &str, credentials: &Credentials, ssl_verify: bool) -> Self {
        let mut config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false);

        if !ssl_verify {
            config = config.tls_config(TlsConfig::builder().disable_verification(true).build());
        }

        let agent: Agent = config.build().into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_header: auth_header(credentials),
        }
    }

    /// Create a client from tool configuration (convenience constructor).
    pub fn from_config(config: &ToolConfig, credentials: &Credentials) -> Self {
        Self::new(&config.base_url, credentials, config.ssl_verify)
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }

    /// Get the instance base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue an authenticated GET and parse the JSON response.
    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ConfluenceError> {
        let mut request = self
            .agent
            .get(url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json");
        for (name, value) in params {
            request = request.query(*name, *value);
        }

        let response = request.call().map_err(|e| ConfluenceError::Http {
            status: 0,
            body: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::Http {
                status,
                body: error_body,
            });
        }

        Ok(body_reader.read_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn credentials() -> Credentials {
        Credentials::Basic {
            username: "u".to_owned(),
            secret: "s".to_owned(),
        }
    }

    #[test]
    fn test_trailing_slash_trimmed_from_base_url() {
        let client = ConfluenceClient::new("https://wiki.example.com/", &credentials(), true);
        assert_eq!(client.base_url(), "https://wiki.example.com");
        assert_eq!(client.api_url(), "https://wiki.example.com/rest/api");
    }

    #[test]
    fn test_client_builds_with_tls_verification_disabled() {
        let client = ConfluenceClient::new("https://wiki.example.com", &credentials(), false);
        assert_eq!(client.base_url(), "https://wiki.example.com");
    }
}
