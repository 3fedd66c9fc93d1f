//! Email and phone checks

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

use super::text::EMAIL_REGEX;
use crate::utils::error_messages::INVALID_EMAIL;
use crate::utils::validation::rules::{EmailOptions, PhoneOptions};
use crate::utils::validation::types::ValidationResult;

static SV_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[267][0-9]{3}-?[0-9]{4}$").expect("Failed to compile SV phone regex"));

static SV_PHONE_WITH_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+503\s?)?[267][0-9]{3}-?[0-9]{4}$").expect("Failed to compile SV phone regex")
});

static US_PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+1\s?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}$")
        .expect("Failed to compile US phone regex")
});

static MX_PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+52\s?)?[1-9][0-9]{9}$").expect("Failed to compile MX phone regex")
});

static GENERIC_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[0-9\s()-]{10,}$").expect("Failed to compile phone regex"));

/// Email shape, then the domain allow-list and block-list
pub fn email(value: &str, options: &EmailOptions) -> ValidationResult {
    let trimmed = value.trim();

    if !EMAIL_REGEX.is_match(trimmed) || !trimmed.validate_email() {
        return ValidationResult::invalid(INVALID_EMAIL);
    }

    let normalized = trimmed.to_lowercase();
    let domain = normalized.rsplit_once('@').map(|(_, d)| d).unwrap_or_default();

    if let Some(allowed) = &options.allowed_domains {
        if !allowed.iter().any(|d| d.to_lowercase() == domain) {
            return ValidationResult::invalid(format!(
                "Only addresses from {} are allowed.",
                allowed.join(", ")
            ));
        }
    }

    if let Some(blocked) = &options.blocked_domains {
        if blocked.iter().any(|d| d.to_lowercase() == domain) {
            return ValidationResult::invalid(format!(
                "Addresses from {} are not allowed.",
                blocked.join(", ")
            ));
        }
    }

    ValidationResult::valid()
}

/// Country-specific phone number layout
pub fn phone(value: &str, options: &PhoneOptions) -> ValidationResult {
    let trimmed = value.trim();

    let (regex, message): (&Regex, &str) = match options.country.to_uppercase().as_str() {
        "SV" if options.require_country_code => {
            (&*SV_PHONE_WITH_CODE, "Format: +503 7890-1234 or 7890-1234")
        }
        "SV" => (&*SV_PHONE, "Format: 7890-1234"),
        "US" => (&*US_PHONE, "Format: (555) 123-4567 or +1 555-123-4567"),
        "MX" => (&*MX_PHONE, "Format: +52 1234567890"),
        _ => (&*GENERIC_PHONE, "Invalid phone format."),
    };

    ValidationResult::check(regex.is_match(trimmed), message)
}
