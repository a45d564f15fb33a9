//! Stored payment instruments ("accounts on file").
//!
//! An account on file is a previously vaulted instrument whose attributes
//! pre-fill form fields. Each attribute carries a write permission that the
//! request aggregate enforces: read-only attributes lock their field, while
//! must-write attributes narrow validation down to exactly those fields.

use serde::{Deserialize, Serialize};

/// Write permission of one stored attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeStatus {
    /// The stored value is fixed; the field may not be written.
    ReadOnly,

    /// The stored value may be overwritten.
    CanWrite,

    /// The field must be (re-)entered and is always validated.
    MustWrite,
}

/// One stored attribute, keyed by the field id it pre-fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAttribute {
    /// Field id this attribute belongs to.
    pub key: String,

    /// The stored (possibly partially masked) value.
    pub value: String,

    /// Write permission for the field.
    pub status: AttributeStatus,
}

/// A stored payment instrument belonging to one payment product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOnFile {
    /// Gateway identifier of the stored instrument.
    pub id: String,

    /// The payment product this instrument belongs to.
    pub payment_product_id: u32,

    /// Attributes in gateway order.
    pub attributes: Vec<AccountAttribute>,
}

impl AccountOnFile {
    /// Looks an attribute up by its field id.
    pub fn attribute(&self, key: &str) -> Option<&AccountAttribute> {
        self.attributes.iter().find(|attr| attr.key == key)
    }

    /// Whether the given field may be written under this account on file.
    ///
    /// Fields without an attribute are unconstrained.
    pub fn is_writable(&self, key: &str) -> bool {
        self.attribute(key)
            .map(|attr| attr.status != AttributeStatus::ReadOnly)
            .unwrap_or(true)
    }

    /// Field ids of all must-write attributes, in gateway order.
    pub fn must_write_keys(&self) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|attr| attr.status == AttributeStatus::MustWrite)
            .map(|attr| attr.key.as_str())
            .collect()
    }
}
