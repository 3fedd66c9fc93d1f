//! Text-specific validation functions

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use ::uuid::{Uuid, Variant};

use crate::utils::error_messages::*;
use crate::utils::validation::constants::ACCENTED_LETTERS;
use crate::utils::validation::rules::{
    AlphanumericOptions, BooleanOptions, FormatOptions, FormatType, LengthOptions,
    RequiredOptions, TextOptions,
};
use crate::utils::validation::types::{FieldValue, ValidationResult};

pub(super) static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Failed to compile email regex")
});

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[0-9\s()-]{10,}$").expect("Failed to compile phone regex"));

static DUI_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{8}-[0-9]$").expect("Failed to compile DUI regex"));

static NIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{6}-[0-9]{3}-[0-9]$").expect("Failed to compile NIT regex"));

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/a-zA-Z0-9_ .-]*)*/?$")
        .expect("Failed to compile URL regex")
});

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]{3,20}$").expect("Failed to compile username regex")
});

/// Message reported when a value is shorter than `min` characters
pub(super) fn too_short(min: usize) -> String {
    format!("Must be at least {} characters long.", min)
}

/// Message reported when a value is longer than `max` characters
pub(super) fn too_long(max: usize) -> String {
    format!("Must not exceed {} characters.", max)
}

/// Checks optional length bounds against a character count
fn check_bounds(count: usize, min: Option<usize>, max: Option<usize>) -> Option<ValidationResult> {
    if let Some(min) = min {
        if count < min {
            return Some(ValidationResult::invalid(too_short(min)));
        }
    }
    if let Some(max) = max {
        if count > max {
            return Some(ValidationResult::invalid(too_long(max)));
        }
    }
    None
}

/// Fails when the value is empty for its input kind: blank text, unchecked
/// checkbox or no selected file.
pub fn required(value: &FieldValue, options: &RequiredOptions) -> ValidationResult {
    let present = match value {
        FieldValue::Text(text) if options.trim => !text.trim().is_empty(),
        other => !other.is_empty(),
    };
    ValidationResult::check(present, REQUIRED)
}

/// Letters and digits, plus the configured extra characters and spaces
pub fn alphanumeric(value: &str, options: &AlphanumericOptions) -> ValidationResult {
    if let Some(failure) = check_bounds(value.chars().count(), options.min_length, options.max_length) {
        return failure;
    }

    let accepted = |c: char| {
        c.is_ascii_alphanumeric()
            || options.allowed_chars.contains(c)
            || (options.allow_spaces && c.is_whitespace())
    };

    let mut message = String::from("Only letters, numbers");
    if !options.allowed_chars.is_empty() {
        message.push_str(" and ");
        message.push_str(&options.allowed_chars);
    }
    if options.allow_spaces {
        message.push_str(" and spaces");
    }
    message.push_str(" are allowed.");

    ValidationResult::check(!value.is_empty() && value.chars().all(accepted), message)
}

/// Letters only, optionally accented, optionally separated by spaces.
///
/// The value is NFC-normalised first so that a decomposed `é` counts as the
/// single accented letter it displays as.
pub fn text(value: &str, options: &TextOptions) -> ValidationResult {
    let normalized: String = value.nfc().collect();

    if let Some(failure) =
        check_bounds(normalized.chars().count(), options.min_length, options.max_length)
    {
        return failure;
    }

    let accepted = |c: char| {
        c.is_ascii_alphabetic()
            || (options.allow_accents && ACCENTED_LETTERS.contains(c))
            || (options.allow_spaces && c.is_whitespace())
    };

    let message = if options.allow_spaces {
        "Only letters and spaces are allowed."
    } else {
        "Only letters are allowed."
    };

    ValidationResult::check(!normalized.is_empty() && normalized.chars().all(accepted), message)
}

/// Accepts checkbox states and the configured true/false spellings
pub fn boolean(value: &FieldValue, options: &BooleanOptions) -> ValidationResult {
    if let FieldValue::Checked(_) = value {
        return ValidationResult::valid();
    }

    let normalized = value.as_text().trim().to_lowercase();
    let known = options
        .true_values
        .iter()
        .chain(options.false_values.iter())
        .any(|candidate| candidate.to_lowercase() == normalized);

    ValidationResult::check(known, INVALID_BOOLEAN)
}

/// Raw character-count bounds, regardless of content
pub fn length(value: &str, options: &LengthOptions) -> ValidationResult {
    let count = value.chars().count();

    if let Some(exact) = options.exact_length {
        return ValidationResult::check(
            count == exact,
            format!("Must be exactly {} characters long.", exact),
        );
    }

    check_bounds(count, options.min_length, options.max_length).unwrap_or_else(ValidationResult::valid)
}

/// Matches a built-in pattern or the caller-supplied one
pub fn format(value: &str, options: &FormatOptions) -> ValidationResult {
    let trimmed = value.trim();

    let (matched, message) = match options.format_type {
        FormatType::Email => (EMAIL_REGEX.is_match(trimmed), INVALID_EMAIL),
        FormatType::Phone => (PHONE_REGEX.is_match(trimmed), "Invalid phone format."),
        FormatType::Dui => (
            DUI_REGEX.is_match(trimmed),
            "Invalid DUI format. Use: 12345678-9",
        ),
        FormatType::Nit => (
            NIT_REGEX.is_match(trimmed),
            "Invalid NIT format. Use: 1234-567890-123-4",
        ),
        FormatType::Url => (URL_REGEX.is_match(trimmed), "Invalid URL format."),
        FormatType::Username => (
            USERNAME_REGEX.is_match(trimmed),
            "Invalid username. 3-20 letters, numbers, dots, dashes or underscores.",
        ),
        FormatType::Password => (
            trimmed.chars().count() >= 8
                && trimmed.chars().any(|c| c.is_ascii_lowercase())
                && trimmed.chars().any(|c| c.is_ascii_uppercase())
                && trimmed.chars().any(|c| c.is_ascii_digit()),
            "Password needs at least 8 characters, an upper case letter, a lower case letter and a number.",
        ),
        FormatType::Custom => {
            let Some(pattern) = options.pattern.as_deref() else {
                return ValidationResult::invalid(MISSING_PATTERN);
            };
            match Regex::new(pattern) {
                Ok(regex) => (regex.is_match(trimmed), INVALID_FORMAT),
                Err(e) => {
                    warn!("Rejecting value, pattern {:?} does not compile: {}", pattern, e);
                    return ValidationResult::invalid(INVALID_PATTERN);
                }
            }
        }
    };

    ValidationResult::check(matched, message)
}

/// Canonical hyphenated version 4 UUID, any letter case
pub fn uuid(value: &str) -> ValidationResult {
    let trimmed = value.trim();
    // try_parse also accepts simple, braced and URN forms; only the
    // hyphenated one is 36 characters long
    let is_valid = trimmed.len() == 36
        && Uuid::try_parse(trimmed)
            .map(|id| id.get_version_num() == 4 && id.get_variant() == Variant::RFC4122)
            .unwrap_or(false);

    ValidationResult::check(is_valid, INVALID_UUID)
}
