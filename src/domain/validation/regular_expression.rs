//! Regular-expression validation rule.

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::{RuleOutcome, ValidationRule, ValidationRuleType};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegularExpressionAttributes {
    regular_expression: String,
}

/// Valid iff the full value matches the gateway-supplied pattern.
#[derive(Debug, Clone)]
pub struct RegularExpressionRule {
    pattern: Regex,
}

impl RegularExpressionRule {
    /// Compiles the rule, anchoring the pattern so it must match the whole
    /// value.
    pub fn new(pattern: &str) -> Option<Self> {
        let anchored = format!("^(?:{pattern})$");
        match Regex::new(&anchored) {
            Ok(pattern) => Some(Self { pattern }),
            Err(err) => {
                tracing::debug!(%err, "rejecting unparseable validation pattern");
                None
            }
        }
    }

    /// Builds the rule from gateway attributes `{regularExpression}`.
    pub fn from_attributes(attributes: &Value) -> Option<Self> {
        let attrs: RegularExpressionAttributes =
            serde_json::from_value(attributes.clone()).ok()?;
        Self::new(&attrs.regular_expression)
    }
}

impl ValidationRule for RegularExpressionRule {
    fn rule_type(&self) -> ValidationRuleType {
        ValidationRuleType::RegularExpression
    }

    fn validate(&self, value: &str) -> RuleOutcome {
        if self.pattern.is_match(value) {
            RuleOutcome::ok()
        } else {
            RuleOutcome::rejected("value does not match the expected format")
        }
    }
}
