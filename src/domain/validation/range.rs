//! Numeric range validation rule.

use serde::Deserialize;
use serde_json::Value;

use super::{RuleOutcome, ValidationRule, ValidationRuleType};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeAttributes {
    min_value: i64,
    max_value: i64,
}

/// Valid iff the value parses as an integer within `min..=max`.
#[derive(Debug, Clone)]
pub struct RangeRule {
    min: i64,
    max: i64,
}

impl RangeRule {
    /// Creates a rule with an inclusive numeric range.
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Builds the rule from gateway attributes `{minValue, maxValue}`.
    pub fn from_attributes(attributes: &Value) -> Option<Self> {
        let attrs: RangeAttributes = serde_json::from_value(attributes.clone()).ok()?;
        Some(Self::new(attrs.min_value, attrs.max_value))
    }
}

impl ValidationRule for RangeRule {
    fn rule_type(&self) -> ValidationRuleType {
        ValidationRuleType::Range
    }

    fn validate(&self, value: &str) -> RuleOutcome {
        let Ok(n) = value.trim().parse::<i64>() else {
            return RuleOutcome::rejected("value is not a number");
        };
        if n >= self.min && n <= self.max {
            RuleOutcome::ok()
        } else {
            RuleOutcome::rejected(format!(
                "value must be between {} and {}, got {}",
                self.min, self.max, n
            ))
        }
    }
}
