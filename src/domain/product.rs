//! Payment product aggregate.
//!
//! A payment product is the gateway's description of one payment method:
//! the fields the merchant must render, plus any stored instruments the
//! current customer may reuse.

use serde::Deserialize;

use super::account_on_file::AccountOnFile;
use super::field::PaymentProductField;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductWire {
    id: u32,
    #[serde(default)]
    fields: Vec<PaymentProductField>,
    #[serde(default)]
    accounts_on_file: Vec<AccountOnFile>,
}

/// One payment method, its form fields ordered for display.
#[derive(Debug, Deserialize)]
#[serde(from = "ProductWire")]
pub struct PaymentProduct {
    id: u32,
    fields: Vec<PaymentProductField>,
    accounts_on_file: Vec<AccountOnFile>,
}

impl From<ProductWire> for PaymentProduct {
    fn from(wire: ProductWire) -> Self {
        let mut fields = wire.fields;
        // Stable sort: fields without a display order keep gateway order
        // after the ordered ones.
        fields.sort_by_key(|field| field.display_order().unwrap_or(u32::MAX));
        Self {
            id: wire.id,
            fields,
            accounts_on_file: wire.accounts_on_file,
        }
    }
}

impl PaymentProduct {
    /// Gateway identifier of the product.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The product's fields, sorted by display order.
    pub fn fields(&self) -> &[PaymentProductField] {
        &self.fields
    }

    /// Looks a field up by id.
    pub fn field(&self, id: &str) -> Option<&PaymentProductField> {
        self.fields.iter().find(|field| field.id() == id)
    }

    /// Stored instruments usable with this product.
    pub fn accounts_on_file(&self) -> &[AccountOnFile] {
        &self.accounts_on_file
    }

    /// Looks a stored instrument up by id.
    pub fn account_on_file(&self, id: &str) -> Option<&AccountOnFile> {
        self.accounts_on_file.iter().find(|aof| aof.id == id)
    }
}
