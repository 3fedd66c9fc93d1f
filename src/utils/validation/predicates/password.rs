//! Password strength checks

use zxcvbn::{zxcvbn, Score};

use crate::utils::validation::rules::PasswordOptions;
use crate::utils::validation::types::ValidationResult;

const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

fn score_from(level: u8) -> Score {
    match level {
        0 => Score::Zero,
        1 => Score::One,
        2 => Score::Two,
        3 => Score::Three,
        _ => Score::Four,
    }
}

/// Composite password check.
///
/// Every unmet requirement is listed, in a fixed order (length, upper case,
/// lower case, digit, special character), so the first one named is the
/// first one the user should fix. The entropy estimate only runs once the
/// composition requirements hold.
pub fn password(value: &str, options: &PasswordOptions) -> ValidationResult {
    let mut missing: Vec<String> = Vec::new();

    if value.chars().count() < options.min_length {
        missing.push(format!("at least {} characters", options.min_length));
    }
    if options.require_uppercase && !value.chars().any(|c| c.is_ascii_uppercase()) {
        missing.push("an upper case letter".to_string());
    }
    if options.require_lowercase && !value.chars().any(|c| c.is_ascii_lowercase()) {
        missing.push("a lower case letter".to_string());
    }
    if options.require_number && !value.chars().any(|c| c.is_ascii_digit()) {
        missing.push("a number".to_string());
    }
    if options.require_special && !value.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        missing.push("a special character".to_string());
    }

    if !missing.is_empty() {
        return ValidationResult::invalid(format!("Password must have {}.", missing.join(", ")));
    }

    if let Some(level) = options.min_strength {
        let estimate = zxcvbn(value, &[]);
        if estimate.score() < score_from(level) {
            return ValidationResult::invalid("Password is too easy to guess.");
        }
    }

    ValidationResult::valid()
}
