//! Error types for the domain layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::validation::ValidationRuleType;

/// A single validation failure for one field.
///
/// Entries are accumulated by [`PaymentRequest::validate`] and carried in
/// full on [`PaymentError::Encryption`] when an invalid request is refused.
///
/// [`PaymentRequest::validate`]: crate::domain::request::PaymentRequest::validate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorEntry {
    /// Identifier of the field that failed.
    pub field_id: String,

    /// The rule that rejected the value.
    pub rule_type: ValidationRuleType,

    /// Human-readable reason for the rejection.
    pub message: String,
}

impl ValidationErrorEntry {
    /// Creates an entry for a rule that rejected a value.
    pub fn new(
        field_id: impl Into<String>,
        rule_type: ValidationRuleType,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            rule_type,
            message: message.into(),
        }
    }

    /// Creates the entry reported for a required field with no value.
    pub fn required(field_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            rule_type: ValidationRuleType::Required,
            message: "value is required".to_string(),
        }
    }
}

/// Errors produced by the payment field toolkit.
///
/// Every failure of the encrypt operation surfaces as one of these variants.
/// None of them is retried internally.
#[derive(Debug, Clone, Error)]
pub enum PaymentError {
    /// Caller error: unknown field id, write to a read-only field, or a
    /// malformed mask/configuration input.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The aggregate's `validate()` reported errors.
    #[error("validation failed with {} error(s)", errors.len())]
    ValidationFailed { errors: Vec<ValidationErrorEntry> },

    /// Encryption was refused or failed; carries the validation result that
    /// caused the refusal (empty when the failure was cryptographic).
    #[error("encryption failed: {message}")]
    Encryption {
        message: String,
        errors: Vec<ValidationErrorEntry>,
    },

    /// An external collaborator (public key or product fetch) failed.
    /// Opaque; surfaced to the caller unchanged.
    #[error("upstream failure: {message}")]
    Upstream { message: String },
}

impl PaymentError {
    /// Creates an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        PaymentError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an invalid-argument error for a write to a read-only field.
    pub fn read_only_field(field_id: &str) -> Self {
        PaymentError::InvalidArgument {
            message: format!("field '{field_id}' is read-only"),
        }
    }

    /// Creates an invalid-argument error for a field id the product does
    /// not define.
    pub fn unknown_field(field_id: &str) -> Self {
        PaymentError::InvalidArgument {
            message: format!("field '{field_id}' is not defined by the payment product"),
        }
    }

    /// Creates an encryption error without validation context.
    pub fn encryption(message: impl Into<String>) -> Self {
        PaymentError::Encryption {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Creates an encryption error carrying the validation result.
    pub fn invalid_request(errors: Vec<ValidationErrorEntry>) -> Self {
        PaymentError::Encryption {
            message: "payment request failed validation".to_string(),
            errors,
        }
    }

    /// Creates an upstream failure.
    pub fn upstream(message: impl Into<String>) -> Self {
        PaymentError::Upstream {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_entry_carries_field_and_rule() {
        let entry = ValidationErrorEntry::required("cardNumber");
        assert_eq!(entry.field_id, "cardNumber");
        assert_eq!(entry.rule_type, ValidationRuleType::Required);
        assert!(!entry.message.is_empty());
    }

    #[test]
    fn read_only_error_names_the_field() {
        let err = PaymentError::read_only_field("cardNumber");
        assert!(err.to_string().contains("cardNumber"));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn invalid_request_keeps_all_entries() {
        let errors = vec![
            ValidationErrorEntry::required("cvv"),
            ValidationErrorEntry::new("cardNumber", ValidationRuleType::Luhn, "checksum failed"),
        ];
        match PaymentError::invalid_request(errors.clone()) {
            PaymentError::Encryption { errors: carried, .. } => assert_eq!(carried, errors),
            other => panic!("expected Encryption, got {other:?}"),
        }
    }
}
