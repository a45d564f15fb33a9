//! Product catalog port.

use async_trait::async_trait;

use crate::domain::{PaymentError, PaymentProduct};

/// Port for fetching payment product definitions.
///
/// Implementations return the gateway's full product description: field
/// definitions with their masks and validators, plus any stored instruments
/// for the current customer. Failures surface as
/// [`PaymentError::Upstream`]; the core adds no retry or caching policy.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetches one payment product by gateway id.
    async fn payment_product(&self, product_id: u32) -> Result<PaymentProduct, PaymentError>;
}
