//! Length validation rule.

use serde::Deserialize;
use serde_json::Value;

use super::{RuleOutcome, ValidationRule, ValidationRuleType};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LengthAttributes {
    min_length: usize,
    max_length: usize,
}

/// Valid iff `min <= len(value) <= max`. An absent value has length 0.
#[derive(Debug, Clone)]
pub struct LengthRule {
    min: usize,
    max: usize,
}

impl LengthRule {
    /// Creates a rule with an inclusive length range.
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Builds the rule from gateway attributes `{minLength, maxLength}`.
    pub fn from_attributes(attributes: &Value) -> Option<Self> {
        let attrs: LengthAttributes = serde_json::from_value(attributes.clone()).ok()?;
        Some(Self::new(attrs.min_length, attrs.max_length))
    }
}

impl ValidationRule for LengthRule {
    fn rule_type(&self) -> ValidationRuleType {
        ValidationRuleType::Length
    }

    fn validate(&self, value: &str) -> RuleOutcome {
        let len = value.chars().count();
        if len >= self.min && len <= self.max {
            RuleOutcome::ok()
        } else {
            RuleOutcome::rejected(format!(
                "length must be between {} and {}, got {}",
                self.min, self.max, len
            ))
        }
    }
}
