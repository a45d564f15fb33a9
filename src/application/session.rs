//! Gateway session facade.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::config::SessionConfig;
use crate::crypto::envelope;
use crate::crypto::{ClientMetaInfo, DeviceInformation, EncryptedRequest, GatewayPublicKey};
use crate::domain::{PaymentError, PaymentProduct, PaymentRequest};
use crate::ports::{ProductCatalog, PublicKeyProvider};

/// One customer's gateway session.
///
/// Holds the session configuration, the two collaborator ports and the
/// memoized public key. The key is fetched at most once; it lives and dies
/// with the session. Sessions are cheap to share behind an `Arc`, and
/// concurrent encryptions over independent requests are safe: nothing is
/// shared but the memoized key.
pub struct Session {
    config: SessionConfig,
    key_provider: Arc<dyn PublicKeyProvider>,
    catalog: Arc<dyn ProductCatalog>,
    public_key: OnceCell<GatewayPublicKey>,
}

impl Session {
    /// Creates a session after validating its configuration.
    pub fn new(
        config: SessionConfig,
        key_provider: Arc<dyn PublicKeyProvider>,
        catalog: Arc<dyn ProductCatalog>,
    ) -> Result<Self, PaymentError> {
        config
            .validate()
            .map_err(|err| PaymentError::invalid_argument(err.to_string()))?;
        Ok(Self {
            config,
            key_provider,
            catalog,
            public_key: OnceCell::new(),
        })
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The gateway's wrapping key, fetched on first use and memoized for
    /// the life of the session.
    pub async fn public_key(&self) -> Result<&GatewayPublicKey, PaymentError> {
        self.public_key
            .get_or_try_init(|| async {
                tracing::debug!("fetching gateway public key");
                self.key_provider.public_key().await
            })
            .await
    }

    /// Fetches a payment product definition from the catalog.
    pub async fn payment_product(
        &self,
        product_id: u32,
    ) -> Result<Arc<PaymentProduct>, PaymentError> {
        let product = self.catalog.payment_product(product_id).await?;
        Ok(Arc::new(product))
    }

    /// Seals a validated payment request into a compact token plus the
    /// client metadata blob.
    ///
    /// Fails with [`PaymentError::Encryption`] when the request has no
    /// payment product or does not validate, and with
    /// [`PaymentError::Upstream`] when the public key cannot be fetched.
    pub async fn encrypt(
        &self,
        request: &PaymentRequest,
        device_information: &DeviceInformation,
    ) -> Result<EncryptedRequest, PaymentError> {
        let public_key = self.public_key().await?;
        let encrypted_payload = envelope::encrypt_request(
            request,
            Some(&self.config.client_session_id),
            device_information,
            public_key,
        )?;
        tracing::debug!(
            product_id = request.payment_product().map(|p| p.id()),
            "sealed payment request"
        );

        let client_meta_info =
            ClientMetaInfo::from_device(&self.config.platform_identifier, device_information)
                .encode();
        Ok(EncryptedRequest {
            encrypted_payload,
            client_meta_info,
        })
    }
}
