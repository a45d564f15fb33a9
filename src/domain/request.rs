//! Payment request aggregate.
//!
//! A `PaymentRequest` collects the values a customer enters for one payment
//! product, enforces the write permissions of an attached account on file,
//! and produces the aggregate validation result the encryption module
//! requires before sealing anything.

use std::collections::HashMap;
use std::sync::Arc;

use super::account_on_file::AccountOnFile;
use super::errors::{PaymentError, ValidationErrorEntry};
use super::product::PaymentProduct;

/// Per-field cell: the raw value as entered plus the write permission
/// derived from the governing account on file.
#[derive(Debug, Default)]
struct RequestField {
    value: Option<String>,
    read_only: bool,
}

/// Mutable aggregate of field values for one payment product.
#[derive(Debug, Default)]
pub struct PaymentRequest {
    product: Option<Arc<PaymentProduct>>,
    fields: HashMap<String, RequestField>,
    account_on_file: Option<AccountOnFile>,
    tokenize: bool,
}

impl PaymentRequest {
    /// Creates an empty request; attach a product before writing values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the payment product whose fields govern this request.
    pub fn set_payment_product(&mut self, product: Arc<PaymentProduct>) {
        self.product = Some(product);
    }

    /// The attached payment product.
    pub fn payment_product(&self) -> Option<&Arc<PaymentProduct>> {
        self.product.as_ref()
    }

    /// Attaches an account on file and recomputes every field's write
    /// permission. Values already entered for fields that become
    /// non-writable are discarded, not silently kept.
    pub fn set_account_on_file(&mut self, account_on_file: AccountOnFile) {
        for (id, field) in &mut self.fields {
            field.read_only = !account_on_file.is_writable(id);
            if field.read_only {
                field.value = None;
            }
        }
        self.account_on_file = Some(account_on_file);
    }

    /// Detaches the account on file; every field becomes writable again.
    pub fn clear_account_on_file(&mut self) {
        for field in self.fields.values_mut() {
            field.read_only = false;
        }
        self.account_on_file = None;
    }

    /// The attached account on file.
    pub fn account_on_file(&self) -> Option<&AccountOnFile> {
        self.account_on_file.as_ref()
    }

    /// Whether the sealed request asks the gateway to vault the instrument.
    pub fn tokenize(&self) -> bool {
        self.tokenize
    }

    /// Sets the tokenize flag.
    pub fn set_tokenize(&mut self, tokenize: bool) {
        self.tokenize = tokenize;
    }

    /// Resolves a field id against the attached product, rejecting ids the
    /// product does not define.
    fn known_field(&self, id: &str) -> Result<&super::field::PaymentProductField, PaymentError> {
        let product = self
            .product
            .as_ref()
            .ok_or_else(|| PaymentError::invalid_argument("no payment product attached"))?;
        product.field(id).ok_or_else(|| PaymentError::unknown_field(id))
    }

    /// Stores a field value as entered.
    ///
    /// Fails with `InvalidArgument` for an unknown field id or a field the
    /// governing account on file marks read-only.
    pub fn set_value(
        &mut self,
        id: &str,
        value: impl Into<String>,
    ) -> Result<(), PaymentError> {
        self.known_field(id)?;

        let read_only = self
            .account_on_file
            .as_ref()
            .map(|aof| !aof.is_writable(id))
            .unwrap_or(false);
        if read_only {
            return Err(PaymentError::read_only_field(id));
        }

        let field = self.fields.entry(id.to_string()).or_default();
        field.read_only = false;
        field.value = Some(value.into());
        Ok(())
    }

    /// The stored value, exactly as entered.
    pub fn value(&self, id: &str) -> Result<Option<&str>, PaymentError> {
        self.known_field(id)?;
        Ok(self
            .fields
            .get(id)
            .and_then(|field| field.value.as_deref()))
    }

    /// The stored value with the field's mask stripped; what validation and
    /// encryption consume.
    pub fn unmasked_value(&self, id: &str) -> Result<Option<String>, PaymentError> {
        let field = self.known_field(id)?;
        Ok(self
            .fields
            .get(id)
            .and_then(|cell| cell.value.as_deref())
            .map(|value| field.remove_mask(value)))
    }

    /// The stored value formatted with the field's mask, for display.
    pub fn masked_value(&self, id: &str) -> Result<Option<String>, PaymentError> {
        let field = self.known_field(id)?;
        Ok(self
            .fields
            .get(id)
            .and_then(|cell| cell.value.as_deref())
            .map(|value| field.apply_mask(value)))
    }

    /// Whether the field is locked by the attached account on file.
    pub fn is_read_only(&self, id: &str) -> bool {
        self.account_on_file
            .as_ref()
            .map(|aof| !aof.is_writable(id))
            .unwrap_or(false)
    }

    /// Validates the aggregate.
    ///
    /// With an account on file carrying must-write attributes, only those
    /// fields are validated; otherwise every field the product defines. An
    /// unset required field contributes exactly one `required` entry; unset
    /// optional fields contribute nothing; set fields run all their rules
    /// against the unmasked value. The request is valid iff the returned
    /// list is empty.
    pub fn validate(&self) -> Result<Vec<ValidationErrorEntry>, PaymentError> {
        let product = self
            .product
            .as_ref()
            .ok_or_else(|| PaymentError::invalid_argument("no payment product attached"))?;

        let must_write = self
            .account_on_file
            .as_ref()
            .map(|aof| aof.must_write_keys())
            .unwrap_or_default();

        let fields: Vec<_> = if must_write.is_empty() {
            product.fields().iter().collect()
        } else {
            must_write
                .iter()
                .filter_map(|key| product.field(key))
                .collect()
        };

        let mut errors = Vec::new();
        for field in fields {
            let unmasked = self
                .fields
                .get(field.id())
                .and_then(|cell| cell.value.as_deref())
                .map(|value| field.remove_mask(value))
                .filter(|value| !value.is_empty());

            match unmasked {
                None => {
                    if field.required() {
                        errors.push(ValidationErrorEntry::required(field.id()));
                    }
                }
                Some(value) => errors.extend(field.validate_value(&value)),
            }
        }
        Ok(errors)
    }

    /// Fails with [`PaymentError::ValidationFailed`] unless the aggregate
    /// validates cleanly; the variant carries every entry `validate` would
    /// report.
    pub fn ensure_valid(&self) -> Result<(), PaymentError> {
        let errors = self.validate()?;
        if errors.is_empty() {
            Ok(())
        } else {
            Err(PaymentError::ValidationFailed { errors })
        }
    }

    /// All entered values, unmasked, in the product's display order; the
    /// payload the encryption module seals.
    pub fn unmasked_values(&self) -> Result<Vec<(String, String)>, PaymentError> {
        let product = self
            .product
            .as_ref()
            .ok_or_else(|| PaymentError::invalid_argument("no payment product attached"))?;

        let mut values = Vec::new();
        for field in product.fields() {
            if let Some(value) = self
                .fields
                .get(field.id())
                .and_then(|cell| cell.value.as_deref())
            {
                values.push((field.id().to_string(), field.remove_mask(value)));
            }
        }
        Ok(values)
    }
}
