//! Validation rules and the rule registry.
//!
//! Each rule is a small stateless struct constructed from the gateway's
//! `{ruleType: attributes}` definitions and implements [`ValidationRule`].
//! The set of rule types is closed; [`build_rules`] is the single factory
//! that maps a rule-type string to its implementation. Unknown rule types
//! are skipped so that newer gateway responses do not break older clients.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

mod email_address;
mod expiration_date;
mod fixed_list;
mod iban;
mod length;
mod luhn;
mod range;
mod regular_expression;
mod terms_and_conditions;

pub use email_address::EmailAddressRule;
pub use expiration_date::ExpirationDateRule;
pub use fixed_list::FixedListRule;
pub use iban::IbanRule;
pub use length::LengthRule;
pub use luhn::LuhnRule;
pub use range::RangeRule;
pub use regular_expression::RegularExpressionRule;
pub use terms_and_conditions::TermsAndConditionsRule;

/// The closed set of validation rule types.
///
/// `Required` never appears in gateway definitions; it tags the synthetic
/// error reported for a required field with no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationRuleType {
    Length,
    Luhn,
    Range,
    RegularExpression,
    FixedList,
    ExpirationDate,
    Iban,
    TermsAndConditions,
    EmailAddress,
    Required,
}

impl fmt::Display for ValidationRuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValidationRuleType::Length => "length",
            ValidationRuleType::Luhn => "luhn",
            ValidationRuleType::Range => "range",
            ValidationRuleType::RegularExpression => "regularExpression",
            ValidationRuleType::FixedList => "fixedList",
            ValidationRuleType::ExpirationDate => "expirationDate",
            ValidationRuleType::Iban => "iban",
            ValidationRuleType::TermsAndConditions => "termsAndConditions",
            ValidationRuleType::EmailAddress => "emailAddress",
            ValidationRuleType::Required => "required",
        };
        write!(f, "{}", s)
    }
}

/// Result of running one rule against one unmasked value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Whether the value passed the rule.
    pub valid: bool,

    /// Reason for rejection; empty when valid.
    pub message: String,
}

impl RuleOutcome {
    /// The value passed.
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    /// The value was rejected for the given reason.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// A predicate over an unmasked field value.
///
/// Rules are pure after construction and safe to share across requests.
pub trait ValidationRule: fmt::Debug + Send + Sync {
    /// The type tag used in error entries.
    fn rule_type(&self) -> ValidationRuleType;

    /// Runs the rule against an unmasked value.
    fn validate(&self, value: &str) -> RuleOutcome;
}

/// Constructs one rule from its gateway type string and attribute object.
///
/// Returns `None` for unknown rule types and for attributes the rule cannot
/// be built from (for example an unparseable regular expression).
pub fn build_rule(rule_type: &str, attributes: &Value) -> Option<Box<dyn ValidationRule>> {
    match rule_type {
        "length" => LengthRule::from_attributes(attributes)
            .map(|r| Box::new(r) as Box<dyn ValidationRule>),
        "luhn" => Some(Box::new(LuhnRule)),
        "range" => RangeRule::from_attributes(attributes)
            .map(|r| Box::new(r) as Box<dyn ValidationRule>),
        "regularExpression" => RegularExpressionRule::from_attributes(attributes)
            .map(|r| Box::new(r) as Box<dyn ValidationRule>),
        "fixedList" => FixedListRule::from_attributes(attributes)
            .map(|r| Box::new(r) as Box<dyn ValidationRule>),
        "expirationDate" => Some(Box::new(ExpirationDateRule)),
        "iban" => Some(Box::new(IbanRule)),
        "termsAndConditions" => Some(Box::new(TermsAndConditionsRule)),
        "emailAddress" => Some(Box::new(EmailAddressRule)),
        other => {
            tracing::debug!(rule_type = other, "skipping unknown validation rule type");
            None
        }
    }
}

/// Constructs the ordered rule list for one field from its `validators`
/// object.
pub fn build_rules(validators: &serde_json::Map<String, Value>) -> Vec<Box<dyn ValidationRule>> {
    validators
        .iter()
        .filter_map(|(rule_type, attributes)| build_rule(rule_type, attributes))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn build_rule_constructs_every_known_type() {
        let cases = [
            ("length", json!({"minLength": 2, "maxLength": 4})),
            ("luhn", json!({})),
            ("range", json!({"minValue": 1, "maxValue": 12})),
            ("regularExpression", json!({"regularExpression": "[0-9]+"})),
            ("fixedList", json!({"allowedValues": ["a", "b"]})),
            ("expirationDate", json!({})),
            ("iban", json!({})),
            ("termsAndConditions", json!({})),
            ("emailAddress", json!({})),
        ];
        for (rule_type, attributes) in cases {
            assert!(
                build_rule(rule_type, &attributes).is_some(),
                "failed to build rule '{rule_type}'"
            );
        }
    }

    #[test]
    fn build_rule_skips_unknown_types() {
        assert!(build_rule("residentIdNumber", &json!({})).is_none());
    }

    #[test]
    fn build_rules_collects_from_validators_object() {
        let validators = json!({
            "length": {"minLength": 12, "maxLength": 19},
            "luhn": {},
            "someFutureRule": {"x": 1}
        });
        let rules = build_rules(validators.as_object().unwrap());
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn rule_type_display_matches_gateway_keys() {
        assert_eq!(ValidationRuleType::RegularExpression.to_string(), "regularExpression");
        assert_eq!(ValidationRuleType::Luhn.to_string(), "luhn");
    }
}
