//! Email-address validation rule.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{RuleOutcome, ValidationRule, ValidationRuleType};

/// Conventional local@domain shape with at least one dot in the domain.
/// Deliverability is the gateway's problem, not the form's.
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern is valid")
});

/// Valid iff the value looks like a conventional email address.
#[derive(Debug, Clone, Copy)]
pub struct EmailAddressRule;

impl ValidationRule for EmailAddressRule {
    fn rule_type(&self) -> ValidationRuleType {
        ValidationRuleType::EmailAddress
    }

    fn validate(&self, value: &str) -> RuleOutcome {
        if EMAIL_SHAPE.is_match(value) {
            RuleOutcome::ok()
        } else {
            RuleOutcome::rejected("value is not a valid email address")
        }
    }
}
