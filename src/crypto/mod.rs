//! Authenticated encryption of validated payment requests.
//!
//! # Module Organization
//!
//! - `public_key` - The gateway's RSA public key (wrapping key)
//! - `metadata` - Collected device information and the client metadata blob
//! - `envelope` - The 5-segment compact token construction

pub mod envelope;
pub mod metadata;
pub mod public_key;

pub use envelope::{encrypt_request, EncryptedRequest};
pub use metadata::{BrowserData, ClientMetaInfo, DeviceInformation};
pub use public_key::GatewayPublicKey;
