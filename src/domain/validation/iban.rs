//! IBAN validation rule.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{RuleOutcome, ValidationRule, ValidationRuleType};

/// Country code, check digits, bank code, then account number.
static IBAN_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[A-Z]{2}[0-9]{2}[A-Z0-9]{4}[0-9]{7}([A-Z0-9]{0,16})?$")
        .expect("IBAN shape pattern is valid")
});

/// ISO 13616 check: shape, rearrangement, letter substitution, mod 97 == 1.
#[derive(Debug, Clone, Copy)]
pub struct IbanRule;

impl IbanRule {
    /// Uppercases and keeps only alphanumerics, so `de44 5001...` and
    /// grouped display forms are accepted.
    fn sanitize(value: &str) -> String {
        value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect()
    }

    /// Reduces the substituted numeric string mod 97 in chunks, so the
    /// check never needs big-integer arithmetic.
    fn mod97(numeric: &str) -> u64 {
        let mut remainder: u64 = 0;
        let mut rest = numeric;
        while !rest.is_empty() {
            let take = rest.len().min(9);
            let (chunk, tail) = rest.split_at(take);
            let combined = format!("{remainder}{chunk}");
            remainder = combined.parse::<u64>().expect("digits only") % 97;
            rest = tail;
        }
        remainder
    }
}

impl ValidationRule for IbanRule {
    fn rule_type(&self) -> ValidationRuleType {
        ValidationRuleType::Iban
    }

    fn validate(&self, value: &str) -> RuleOutcome {
        let sanitized = Self::sanitize(value);
        if !IBAN_SHAPE.is_match(&sanitized) {
            return RuleOutcome::rejected("IBAN has an invalid format");
        }

        // Move the country code and check digits to the end, then replace
        // every letter with its alphabet position + 9 (A=10 .. Z=35).
        let (head, tail) = sanitized.split_at(4);
        let rearranged = format!("{tail}{head}");
        let numeric: String = rearranged
            .chars()
            .map(|c| {
                if c.is_ascii_digit() {
                    c.to_string()
                } else {
                    (c as u32 - 55).to_string()
                }
            })
            .collect();

        if Self::mod97(&numeric) == 1 {
            RuleOutcome::ok()
        } else {
            RuleOutcome::rejected("IBAN check digits are wrong")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_valid_ibans() {
        assert!(IbanRule.validate("GB82WEST12345698765432").valid);
        assert!(IbanRule.validate("DE89370400440532013000").valid);
    }

    #[test]
    fn accepts_grouped_and_lowercase_input() {
        assert!(IbanRule.validate("gb82 west 1234 5698 7654 32").valid);
    }

    #[test]
    fn any_single_digit_change_fails() {
        let valid = "GB82WEST12345698765432";
        for (i, c) in valid.char_indices() {
            if !c.is_ascii_digit() {
                continue;
            }
            let replacement = if c == '9' { '0' } else { ((c as u8) + 1) as char };
            let mut altered: Vec<char> = valid.chars().collect();
            altered[i] = replacement;
            let altered: String = altered.into_iter().collect();
            assert!(
                !IbanRule.validate(&altered).valid,
                "altered IBAN {altered} unexpectedly passed"
            );
        }
    }

    #[test]
    fn rejects_malformed_shapes() {
        assert!(!IbanRule.validate("").valid);
        assert!(!IbanRule.validate("GB82").valid);
        assert!(!IbanRule.validate("1282WEST12345698765432").valid);
    }
}
