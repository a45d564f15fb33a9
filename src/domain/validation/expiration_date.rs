//! Expiration-date validation rule.

use chrono::{Datelike, Utc};

use super::{RuleOutcome, ValidationRule, ValidationRuleType};

/// How far in the future an expiry date may lie: up to December of the
/// current year plus this many years.
const MAX_YEARS_AHEAD: i32 = 25;

/// Valid iff the value is an `MMYY` or `MMYYYY` date no earlier than the
/// current month and no later than December of the current year + 25.
///
/// Separators are stripped first, so masked input like `12/26` is accepted.
/// A card expiring in the current month is still valid.
#[derive(Debug, Clone, Copy)]
pub struct ExpirationDateRule;

impl ExpirationDateRule {
    fn validate_at(value: &str, now_year: i32, now_month: u32) -> RuleOutcome {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

        let (month_part, year_part) = match digits.len() {
            4 | 6 => digits.split_at(2),
            _ => return RuleOutcome::rejected("expiration date must be MMYY or MMYYYY"),
        };

        let Ok(month) = month_part.parse::<u32>() else {
            return RuleOutcome::rejected("expiration month is not a number");
        };
        if !(1..=12).contains(&month) {
            return RuleOutcome::rejected("expiration month must be between 01 and 12");
        }

        let Ok(mut year) = year_part.parse::<i32>() else {
            return RuleOutcome::rejected("expiration year is not a number");
        };
        if year_part.len() == 2 {
            year += 2000;
        }

        if (year, month) < (now_year, now_month) {
            return RuleOutcome::rejected("card has expired");
        }
        if year > now_year + MAX_YEARS_AHEAD {
            return RuleOutcome::rejected("expiration date is too far in the future");
        }

        RuleOutcome::ok()
    }
}

impl ValidationRule for ExpirationDateRule {
    fn rule_type(&self) -> ValidationRuleType {
        ValidationRuleType::ExpirationDate
    }

    fn validate(&self, value: &str) -> RuleOutcome {
        let now = Utc::now().date_naive();
        Self::validate_at(value, now.year(), now.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW_YEAR: i32 = 2026;
    const NOW_MONTH: u32 = 8;

    fn check(value: &str) -> RuleOutcome {
        ExpirationDateRule::validate_at(value, NOW_YEAR, NOW_MONTH)
    }

    #[test]
    fn current_month_is_still_valid() {
        assert!(check("0826").valid);
        assert!(check("082026").valid);
    }

    #[test]
    fn previous_month_is_expired() {
        assert!(!check("0726").valid);
    }

    #[test]
    fn far_future_is_capped_at_25_years() {
        // December of the 25th year ahead is the last valid month.
        assert!(check("1251").valid);
        assert!(!check("0152").valid);
    }

    #[test]
    fn separators_are_stripped() {
        assert!(check("08/26").valid);
        assert!(check("08-2026").valid);
    }

    #[test]
    fn malformed_lengths_are_rejected() {
        assert!(!check("08261").valid); // 5 digits
        assert!(!check("826").valid);
        assert!(!check("").valid);
    }

    #[test]
    fn month_bounds_are_enforced() {
        assert!(!check("0027").valid);
        assert!(!check("1327").valid);
    }

    #[test]
    fn four_digit_years_are_accepted_verbatim() {
        assert!(check("122051").valid);
        assert!(!check("012052").valid);
    }

    #[test]
    fn live_validate_agrees_with_clock() {
        // Anything in year 9999 is beyond any 25-year window.
        assert!(!ExpirationDateRule.validate("129999").valid);
    }
}
