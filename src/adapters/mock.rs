//! In-memory gateway for tests and examples.
//!
//! Implements both collaborator ports with pre-configured responses,
//! error injection and fetch counting.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rsa::RsaPrivateKey;

use crate::crypto::GatewayPublicKey;
use crate::domain::{PaymentError, PaymentProduct};
use crate::ports::{ProductCatalog, PublicKeyProvider};

/// Mock gateway with configurable key, products and failures.
///
/// # Example
///
/// ```ignore
/// let gateway = Arc::new(
///     MockGateway::with_generated_key("kid-1").with_product(1, product_json),
/// );
/// let session = Session::new(config, gateway.clone(), gateway)?;
/// ```
pub struct MockGateway {
    key: Result<GatewayPublicKey, String>,
    products: Mutex<HashMap<u32, serde_json::Value>>,
    key_fetches: AtomicUsize,
}

impl MockGateway {
    /// A gateway serving the given public key.
    pub fn with_key(key: GatewayPublicKey) -> Self {
        Self {
            key: Ok(key),
            products: Mutex::new(HashMap::new()),
            key_fetches: AtomicUsize::new(0),
        }
    }

    /// A gateway serving a freshly generated 2048-bit key under the given
    /// key id. Key generation is slow; prefer sharing one mock per test.
    pub fn with_generated_key(key_id: &str) -> Self {
        let private = RsaPrivateKey::new(&mut rand::thread_rng(), 2048)
            .expect("RSA key generation succeeds");
        Self::with_key(GatewayPublicKey::new(key_id, private.to_public_key()))
    }

    /// A gateway whose every fetch fails upstream with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            key: Err(message.to_string()),
            products: Mutex::new(HashMap::new()),
            key_fetches: AtomicUsize::new(0),
        }
    }

    /// Registers a product definition served by `payment_product`.
    pub fn with_product(self, product_id: u32, product_json: serde_json::Value) -> Self {
        self.products
            .lock()
            .expect("mock product map lock")
            .insert(product_id, product_json);
        self
    }

    /// How many times the public key was fetched.
    pub fn key_fetches(&self) -> usize {
        self.key_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PublicKeyProvider for MockGateway {
    async fn public_key(&self) -> Result<GatewayPublicKey, PaymentError> {
        self.key_fetches.fetch_add(1, Ordering::SeqCst);
        self.key
            .clone()
            .map_err(PaymentError::upstream)
    }
}

#[async_trait]
impl ProductCatalog for MockGateway {
    async fn payment_product(&self, product_id: u32) -> Result<PaymentProduct, PaymentError> {
        let json = self
            .products
            .lock()
            .expect("mock product map lock")
            .get(&product_id)
            .cloned()
            .ok_or_else(|| match &self.key {
                Err(message) => PaymentError::upstream(message.clone()),
                Ok(_) => PaymentError::upstream(format!("unknown product {product_id}")),
            })?;
        serde_json::from_value(json)
            .map_err(|err| PaymentError::upstream(format!("malformed mock product: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_registered_products() {
        let gateway = MockGateway::with_generated_key("kid").with_product(
            7,
            serde_json::json!({"id": 7, "fields": []}),
        );
        let product = gateway.payment_product(7).await.expect("product exists");
        assert_eq!(product.id(), 7);
        assert!(gateway.payment_product(8).await.is_err());
    }

    #[tokio::test]
    async fn failing_gateway_fails_everything() {
        let gateway = MockGateway::failing("offline");
        assert!(matches!(
            gateway.public_key().await,
            Err(PaymentError::Upstream { .. })
        ));
        assert!(gateway.payment_product(1).await.is_err());
    }
}
