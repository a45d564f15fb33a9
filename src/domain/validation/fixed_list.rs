//! Fixed-list validation rule.

use serde::Deserialize;
use serde_json::Value;

use super::{RuleOutcome, ValidationRule, ValidationRuleType};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixedListAttributes {
    allowed_values: Vec<String>,
}

/// Valid iff the value is an exact member of the allowed list.
#[derive(Debug, Clone)]
pub struct FixedListRule {
    allowed: Vec<String>,
}

impl FixedListRule {
    /// Creates a rule over the given allowed values.
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    /// Builds the rule from gateway attributes `{allowedValues}`.
    pub fn from_attributes(attributes: &Value) -> Option<Self> {
        let attrs: FixedListAttributes = serde_json::from_value(attributes.clone()).ok()?;
        Some(Self::new(attrs.allowed_values))
    }
}

impl ValidationRule for FixedListRule {
    fn rule_type(&self) -> ValidationRuleType {
        ValidationRuleType::FixedList
    }

    fn validate(&self, value: &str) -> RuleOutcome {
        if self.allowed.iter().any(|allowed| allowed == value) {
            RuleOutcome::ok()
        } else {
            RuleOutcome::rejected("value is not one of the allowed values")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> FixedListRule {
        FixedListRule::new(vec!["4".to_string(), "8".to_string(), "15".to_string()])
    }

    #[test]
    fn accepts_listed_values() {
        assert!(rule().validate("4").valid);
        assert!(rule().validate("15").valid);
    }

    #[test]
    fn rejects_unlisted_values() {
        assert!(!rule().validate("16").valid);
        assert!(!rule().validate("").valid);
    }

    #[test]
    fn match_is_exact_not_prefix() {
        assert!(!rule().validate("1").valid);
        assert!(!rule().validate("155").valid);
    }

    #[test]
    fn builds_from_gateway_attributes() {
        let rule =
            FixedListRule::from_attributes(&serde_json::json!({"allowedValues": ["a", "b"]}))
                .unwrap();
        assert!(rule.validate("a").valid);
        assert!(!rule.validate("c").valid);
    }
}
