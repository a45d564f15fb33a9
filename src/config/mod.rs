//! Session configuration.
//!
//! The host application obtains these values from its server when it
//! creates a gateway session and passes them in; the toolkit performs no
//! environment or file loading of its own.

use serde::Deserialize;
use thiserror::Error;

/// Errors produced when validating a session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("configuration value '{0}' must not be empty")]
    Empty(&'static str),

    #[error("api_endpoint must be an absolute http(s) URL, got '{0}'")]
    InvalidEndpoint(String),
}

/// Values identifying one gateway session.
///
/// Load from your server's session-creation response and validate before
/// constructing a [`Session`].
///
/// [`Session`]: crate::application::Session
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Base URL of the gateway's client API.
    pub api_endpoint: String,

    /// Bearer credential scoping this session; also sealed into every
    /// encrypted payload.
    pub client_session_id: String,

    /// Opaque identifier of the paying customer.
    pub customer_id: String,

    /// Platform identifier reported in the client metadata blob.
    #[serde(default = "default_platform")]
    pub platform_identifier: String,
}

fn default_platform() -> String {
    std::env::consts::OS.to_string()
}

impl SessionConfig {
    /// Creates a configuration with the default platform identifier.
    pub fn new(
        api_endpoint: impl Into<String>,
        client_session_id: impl Into<String>,
        customer_id: impl Into<String>,
    ) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            client_session_id: client_session_id.into(),
            customer_id: customer_id.into(),
            platform_identifier: default_platform(),
        }
    }

    /// Checks the configuration for values the gateway would reject.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_endpoint.is_empty() {
            return Err(ConfigError::Empty("api_endpoint"));
        }
        if !self.api_endpoint.starts_with("http://") && !self.api_endpoint.starts_with("https://")
        {
            return Err(ConfigError::InvalidEndpoint(self.api_endpoint.clone()));
        }
        if self.client_session_id.is_empty() {
            return Err(ConfigError::Empty("client_session_id"));
        }
        if self.customer_id.is_empty() {
            return Err(ConfigError::Empty("customer_id"));
        }
        Ok(())
    }

    /// The endpoint without a trailing slash, ready for path joining.
    pub fn base_url(&self) -> &str {
        self.api_endpoint.trim_end_matches('/')
    }
}
