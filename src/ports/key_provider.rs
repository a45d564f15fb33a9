//! Public-key provider port.

use async_trait::async_trait;

use crate::crypto::GatewayPublicKey;
use crate::domain::PaymentError;

/// Port for fetching the gateway's current wrapping key.
///
/// The session fetches the key at most once and memoizes it; providers do
/// not need to cache. A failed fetch surfaces as [`PaymentError::Upstream`]
/// unchanged, with no internal retry.
#[async_trait]
pub trait PublicKeyProvider: Send + Sync {
    /// Fetches the gateway's current RSA public key.
    async fn public_key(&self) -> Result<GatewayPublicKey, PaymentError>;
}
