//! Payment product field definitions.
//!
//! A field definition combines a display mask, an ordered set of validation
//! rules and required/obfuscate metadata for one named form field. It is
//! deserialized from the gateway's product JSON and immutable afterwards.

use serde::Deserialize;
use serde_json::Value;

use super::errors::ValidationErrorEntry;
use super::masking;
use super::validation::{build_rules, ValidationRule, ValidationRuleType};

/// The data type a field carries, as declared by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Digits only (card number, CVV).
    #[serde(rename = "numericstring")]
    NumericString,

    /// Free-form text (cardholder name).
    #[serde(rename = "string")]
    AlphaNumericString,

    /// Month/year expiry date.
    #[serde(rename = "expirydate", alias = "date")]
    ExpirationDate,

    /// True/false (terms acceptance).
    #[serde(rename = "boolean")]
    Boolean,

    /// Whole number (installment count).
    #[serde(rename = "integer")]
    Integer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DataRestrictionsWire {
    is_required: bool,
    validators: serde_json::Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DisplayHintsWire {
    mask: Option<String>,
    obfuscate: bool,
    display_order: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldWire {
    id: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    data_restrictions: DataRestrictionsWire,
    display_hints: Option<DisplayHintsWire>,
}

/// One named field of a payment product.
#[derive(Debug, Deserialize)]
#[serde(from = "FieldWire")]
pub struct PaymentProductField {
    id: String,
    field_type: FieldType,
    required: bool,
    obfuscate: bool,
    display_order: Option<u32>,
    mask: Option<String>,
    validation_rules: Vec<Box<dyn ValidationRule>>,
}

impl From<FieldWire> for PaymentProductField {
    fn from(wire: FieldWire) -> Self {
        let hints = wire.display_hints.unwrap_or_default();
        Self {
            id: wire.id,
            field_type: wire.field_type,
            required: wire.data_restrictions.is_required,
            obfuscate: hints.obfuscate,
            display_order: hints.display_order,
            mask: hints.mask,
            validation_rules: build_rules(&wire.data_restrictions.validators),
        }
    }
}

impl PaymentProductField {
    /// Unique field identifier within its product.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declared data type.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether a value must be present for the request to validate.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Whether the UI should hide the value while typing.
    pub fn obfuscate(&self) -> bool {
        self.obfuscate
    }

    /// Position of the field in the rendered form.
    pub fn display_order(&self) -> Option<u32> {
        self.display_order
    }

    /// The display mask template, if the gateway supplied one.
    pub fn mask(&self) -> Option<&str> {
        self.mask.as_deref()
    }

    /// The field's validation rules, in definition order.
    pub fn validation_rules(&self) -> &[Box<dyn ValidationRule>] {
        &self.validation_rules
    }

    /// Looks a rule up by its type.
    pub fn rule(&self, rule_type: ValidationRuleType) -> Option<&dyn ValidationRule> {
        self.validation_rules
            .iter()
            .find(|rule| rule.rule_type() == rule_type)
            .map(|rule| rule.as_ref())
    }

    /// Formats a raw value with the field's mask.
    pub fn apply_mask(&self, raw: &str) -> String {
        masking::apply_mask(self.mask(), raw)
    }

    /// Strips the field's mask from a formatted value.
    pub fn remove_mask(&self, formatted: &str) -> String {
        masking::remove_mask(self.mask(), formatted)
    }

    /// Maximum formatted length, -1 when the field has no mask.
    pub fn max_length(&self) -> i32 {
        masking::mask_capacity(self.mask())
    }

    /// Runs every rule against an unmasked value, collecting all failures.
    pub fn validate_value(&self, unmasked: &str) -> Vec<ValidationErrorEntry> {
        self.validation_rules
            .iter()
            .filter_map(|rule| {
                let outcome = rule.validate(unmasked);
                if outcome.valid {
                    None
                } else {
                    Some(ValidationErrorEntry::new(
                        &self.id,
                        rule.rule_type(),
                        outcome.message,
                    ))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn card_number_field() -> PaymentProductField {
        serde_json::from_value(json!({
            "id": "cardNumber",
            "type": "numericstring",
            "dataRestrictions": {
                "isRequired": true,
                "validators": {
                    "length": {"minLength": 12, "maxLength": 19},
                    "luhn": {}
                }
            },
            "displayHints": {
                "mask": "{{9999}} {{9999}} {{9999}} {{9999}} {{999}}",
                "obfuscate": false,
                "displayOrder": 0
            }
        }))
        .expect("field JSON deserializes")
    }

    #[test]
    fn deserializes_gateway_field_json() {
        let field = card_number_field();
        assert_eq!(field.id(), "cardNumber");
        assert_eq!(field.field_type(), FieldType::NumericString);
        assert!(field.required());
        assert!(!field.obfuscate());
        assert_eq!(field.display_order(), Some(0));
        assert_eq!(field.validation_rules().len(), 2);
    }

    #[test]
    fn masks_round_trip_through_the_field() {
        let field = card_number_field();
        let formatted = field.apply_mask("4567350000427977");
        assert_eq!(formatted, "4567 3500 0042 7977");
        assert_eq!(field.remove_mask(&formatted), "4567350000427977");
        assert_eq!(field.max_length(), 23);
    }

    #[test]
    fn validate_value_collects_every_failure() {
        let field = card_number_field();
        // Too short and fails Luhn.
        let errors = field.validate_value("123");
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.rule_type == ValidationRuleType::Length));
        assert!(errors.iter().any(|e| e.rule_type == ValidationRuleType::Luhn));
    }

    #[test]
    fn validate_value_passes_a_good_card_number() {
        let field = card_number_field();
        assert!(field.validate_value("4567350000427977").is_empty());
    }

    #[test]
    fn rule_lookup_by_type() {
        let field = card_number_field();
        assert!(field.rule(ValidationRuleType::Luhn).is_some());
        assert!(field.rule(ValidationRuleType::Iban).is_none());
    }

    #[test]
    fn fields_without_hints_or_restrictions_deserialize() {
        let field: PaymentProductField = serde_json::from_value(json!({
            "id": "comment",
            "type": "string"
        }))
        .expect("minimal field JSON deserializes");
        assert!(!field.required());
        assert_eq!(field.mask(), None);
        assert_eq!(field.max_length(), -1);
        assert!(field.validate_value("anything").is_empty());
    }
}
