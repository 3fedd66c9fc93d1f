//! Equality, date ordering and membership checks

use super::date::parse_date;
use crate::utils::error_messages::*;
use crate::utils::validation::rules::{DateComparison, EnumOptions};
use crate::utils::validation::types::{FieldValue, ValidationResult};

/// Compares two strings, optionally ignoring letter case
pub fn equals_text(value: &str, other: &str, case_sensitive: bool) -> ValidationResult {
    let same = if case_sensitive {
        value == other
    } else {
        value.to_lowercase() == other.to_lowercase()
    };
    ValidationResult::check(same, VALUES_MISMATCH)
}

/// Compares two field values. Only text honours `case_sensitive`; other
/// kinds must be strictly equal.
pub fn equals(value: &FieldValue, other: &FieldValue, case_sensitive: bool) -> ValidationResult {
    match (value, other) {
        (FieldValue::Text(a), FieldValue::Text(b)) => equals_text(a, b, case_sensitive),
        (a, b) => ValidationResult::check(a == b, VALUES_MISMATCH),
    }
}

/// Checks how `value` relates to `other`, both read as calendar dates
pub fn compare_dates(value: &str, other: &str, comparison: DateComparison) -> ValidationResult {
    let (Some(first), Some(second)) = (parse_date(value), parse_date(other)) else {
        return ValidationResult::invalid(INVALID_DATES);
    };

    let (holds, message) = match comparison {
        DateComparison::Before => (first < second, "The date must be before the other date."),
        DateComparison::After => (first > second, "The date must be after the other date."),
        DateComparison::Equal => (first == second, "The dates must be the same."),
        DateComparison::BeforeOrEqual => (
            first <= second,
            "The date must be on or before the other date.",
        ),
        DateComparison::AfterOrEqual => (
            first >= second,
            "The date must be on or after the other date.",
        ),
    };

    ValidationResult::check(holds, message)
}

/// Membership in the allowed values, case-insensitive unless told otherwise
pub fn one_of(value: &str, options: &EnumOptions) -> ValidationResult {
    if options.allowed_values.is_empty() {
        return ValidationResult::invalid(MISSING_ALLOWED_VALUES);
    }

    let member = if options.case_sensitive {
        options.allowed_values.iter().any(|allowed| allowed == value)
    } else {
        let needle = value.to_lowercase();
        options
            .allowed_values
            .iter()
            .any(|allowed| allowed.to_lowercase() == needle)
    };

    ValidationResult::check(
        member,
        format!("Allowed values: {}.", options.allowed_values.join(", ")),
    )
}
