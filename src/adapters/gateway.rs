//! HTTP gateway adapter.
//!
//! Thin reqwest client implementing the two collaborator ports. No retry,
//! no caching beyond the session's key memoization; any transport or
//! status failure surfaces as [`PaymentError::Upstream`] unchanged.

use async_trait::async_trait;

use crate::config::SessionConfig;
use crate::crypto::GatewayPublicKey;
use crate::domain::{PaymentError, PaymentProduct};
use crate::ports::{ProductCatalog, PublicKeyProvider};

/// Client for the gateway's session-scoped API.
pub struct GatewayClient {
    config: SessionConfig,
    http: reqwest::Client,
}

impl GatewayClient {
    /// Creates a client after validating the configuration.
    pub fn new(config: SessionConfig) -> Result<Self, PaymentError> {
        config
            .validate()
            .map_err(|err| PaymentError::invalid_argument(err.to_string()))?;
        Ok(Self {
            config,
            http: reqwest::Client::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url(),
            self.config.customer_id,
            path
        )
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, PaymentError> {
        let url = self.url(path);
        tracing::debug!(%url, "gateway request");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.client_session_id)
            .send()
            .await
            .map_err(|err| PaymentError::upstream(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaymentError::upstream(format!(
                "gateway returned {status} for {path}"
            )));
        }

        response
            .json()
            .await
            .map_err(|err| PaymentError::upstream(err.to_string()))
    }
}

#[async_trait]
impl PublicKeyProvider for GatewayClient {
    async fn public_key(&self) -> Result<GatewayPublicKey, PaymentError> {
        let json = self.get_json("crypto/publickey").await?;
        GatewayPublicKey::from_json(&json)
    }
}

#[async_trait]
impl ProductCatalog for GatewayClient {
    async fn payment_product(&self, product_id: u32) -> Result<PaymentProduct, PaymentError> {
        let json = self.get_json(&format!("products/{product_id}")).await?;
        serde_json::from_value(json)
            .map_err(|err| PaymentError::upstream(format!("malformed product response: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_scoped_to_the_customer() {
        let client = GatewayClient::new(SessionConfig::new(
            "https://gateway.example.com/client/v1/",
            "sid-1",
            "cid-1",
        ))
        .expect("config is valid");

        assert_eq!(
            client.url("crypto/publickey"),
            "https://gateway.example.com/client/v1/cid-1/crypto/publickey"
        );
        assert_eq!(
            client.url("products/1"),
            "https://gateway.example.com/client/v1/cid-1/products/1"
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = GatewayClient::new(SessionConfig::new("not-a-url", "sid", "cid"));
        assert!(matches!(result, Err(PaymentError::InvalidArgument { .. })));
    }
}
