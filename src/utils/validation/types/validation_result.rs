//! Outcome of a single predicate or of a whole field.

use serde::Serialize;
use std::fmt;

/// Verdict returned by every predicate.
///
/// Validation failures are ordinary values, never errors: a predicate always
/// answers, and the message is empty whenever `is_valid` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
}

impl ValidationResult {
    /// A passing verdict with an empty message
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    /// A failing verdict carrying the message shown next to the field
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }

    /// Builds a verdict from a boolean, using `message` only on failure
    pub fn check(is_valid: bool, message: impl Into<String>) -> Self {
        if is_valid {
            Self::valid()
        } else {
            Self::invalid(message)
        }
    }

    /// Replaces the failure message when the rule declares its own
    pub fn with_message(self, message: Option<&str>) -> Self {
        match message {
            Some(custom) if !self.is_valid => Self::invalid(custom),
            _ => self,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            write!(f, "valid")
        } else {
            write!(f, "invalid: {}", self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_has_empty_message() {
        let result = ValidationResult::valid();
        assert!(result.is_valid());
        assert!(result.message.is_empty());
    }

    #[test]
    fn test_check_only_keeps_message_on_failure() {
        assert_eq!(ValidationResult::check(true, "nope"), ValidationResult::valid());
        assert_eq!(ValidationResult::check(false, "nope").message, "nope");
    }

    #[test]
    fn test_message_override_ignored_when_valid() {
        let passed = ValidationResult::valid().with_message(Some("custom"));
        assert!(passed.message.is_empty());

        let failed = ValidationResult::invalid("default").with_message(Some("custom"));
        assert_eq!(failed.message, "custom");

        let untouched = ValidationResult::invalid("default").with_message(None);
        assert_eq!(untouched.message, "default");
    }
}
