//! The gateway's RSA public key.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rsa::pkcs8::DecodePublicKey;
use rsa::RsaPublicKey;
use serde::Deserialize;

use crate::domain::PaymentError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublicKeyWire {
    key_id: String,
    public_key: String,
}

/// The wrapping key a session encrypts against.
///
/// Carries the opaque `kid` the gateway uses to locate its private key,
/// plus the parsed RSA key. Fetched once per session and immutable.
#[derive(Debug, Clone)]
pub struct GatewayPublicKey {
    key_id: String,
    key: RsaPublicKey,
}

impl GatewayPublicKey {
    /// Wraps an already parsed RSA key.
    pub fn new(key_id: impl Into<String>, key: RsaPublicKey) -> Self {
        Self {
            key_id: key_id.into(),
            key,
        }
    }

    /// Parses a key from the gateway representation: an opaque key id and
    /// the base64-encoded DER (SubjectPublicKeyInfo) key bytes.
    pub fn from_base64_der(
        key_id: impl Into<String>,
        base64_der: &str,
    ) -> Result<Self, PaymentError> {
        let der = STANDARD
            .decode(base64_der.trim())
            .map_err(|err| PaymentError::invalid_argument(format!("public key is not valid base64: {err}")))?;
        let key = RsaPublicKey::from_public_key_der(&der)
            .map_err(|err| PaymentError::invalid_argument(format!("public key is not valid DER: {err}")))?;
        Ok(Self {
            key_id: key_id.into(),
            key,
        })
    }

    /// Parses the gateway's `{keyId, publicKey}` JSON.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, PaymentError> {
        let wire: PublicKeyWire = serde_json::from_value(json.clone())
            .map_err(|err| PaymentError::invalid_argument(format!("malformed public key response: {err}")))?;
        Self::from_base64_der(wire.key_id, &wire.public_key)
    }

    /// The opaque identifier placed in the token's protected header.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// The parsed RSA key.
    pub fn rsa_key(&self) -> &RsaPublicKey {
        &self.key
    }
}
