//! Integer, decimal and grade checks

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::validation::rules::{DecimalOptions, GradeOptions, IntegerOptions};
use crate::utils::validation::types::ValidationResult;

static UNSIGNED_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("Failed to compile integer regex"));
static SIGNED_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+$").expect("Failed to compile integer regex"));
static UNSIGNED_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("Failed to compile decimal regex"));
static SIGNED_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("Failed to compile decimal regex"));

fn below_min(min: impl std::fmt::Display) -> ValidationResult {
    ValidationResult::invalid(format!("The minimum value is {}.", min))
}

fn above_max(max: impl std::fmt::Display) -> ValidationResult {
    ValidationResult::invalid(format!("The maximum value is {}.", max))
}

/// Whole number with inclusive bounds
pub fn integer(value: &str, options: &IntegerOptions) -> ValidationResult {
    let trimmed = value.trim();
    let shape = if options.allow_negative {
        &SIGNED_INTEGER
    } else {
        &UNSIGNED_INTEGER
    };

    let not_integer = || {
        ValidationResult::invalid(if options.allow_negative {
            "Must be a whole number."
        } else {
            "Must be a positive whole number."
        })
    };

    if !shape.is_match(trimmed) {
        return not_integer();
    }

    // Digits that overflow i64 are not a usable number either
    let Ok(number) = trimmed.parse::<i64>() else {
        return not_integer();
    };

    match (options.min, options.max) {
        (Some(min), _) if number < min => below_min(min),
        (_, Some(max)) if number > max => above_max(max),
        _ => ValidationResult::valid(),
    }
}

/// Decimal number with bounded precision and inclusive bounds
pub fn decimal(value: &str, options: &DecimalOptions) -> ValidationResult {
    let trimmed = value.trim();
    let shape = if options.allow_negative {
        &SIGNED_DECIMAL
    } else {
        &UNSIGNED_DECIMAL
    };

    let not_decimal = || {
        ValidationResult::invalid(if options.allow_negative {
            "Must be a decimal number."
        } else {
            "Must be a positive decimal number."
        })
    };

    if !shape.is_match(trimmed) {
        return not_decimal();
    }

    let Ok(number) = trimmed.parse::<f64>() else {
        return not_decimal();
    };

    if let Some(decimals) = options.decimals {
        let fraction_digits = trimmed.split_once('.').map(|(_, f)| f.len()).unwrap_or(0);
        if fraction_digits > decimals as usize {
            return ValidationResult::invalid(format!(
                "At most {} decimal places are allowed.",
                decimals
            ));
        }
    }

    match (options.min, options.max) {
        (Some(min), _) if number < min => below_min(min),
        (_, Some(max)) if number > max => above_max(max),
        _ => ValidationResult::valid(),
    }
}

/// Grade on the school scale: never negative, bounded precision
pub fn grade(value: &str, options: &GradeOptions) -> ValidationResult {
    decimal(
        value,
        &DecimalOptions {
            min: Some(options.min),
            max: Some(options.max),
            decimals: Some(options.decimals),
            allow_negative: false,
        },
    )
}
