//! Pure validation functions, one per rule kind.
//!
//! Every predicate is total: malformed input or options produce a failing
//! [`ValidationResult`], never a panic or an error.

mod compare;
mod contact;
mod date;
mod file;
mod numeric;
mod password;
mod text;

pub use compare::{compare_dates, equals, equals_text, one_of};
pub use contact::{email, phone};
pub use date::{date, date_on, parse_date};
pub use file::{document, file, image};
pub use numeric::{decimal, grade, integer};
pub use password::password;
pub use text::{alphanumeric, boolean, format, length, required, text, uuid};

use super::types::{FieldValue, FormValues, ValidationResult};

/// Capability implemented by custom validators.
///
/// A predicate receives the value of the field being validated and a snapshot
/// of every field of the form, and answers with a verdict.
pub trait Predicate: Send + Sync {
    fn check(&self, value: &FieldValue, form: &FormValues) -> ValidationResult;
}

impl<F> Predicate for F
where
    F: Fn(&FieldValue, &FormValues) -> ValidationResult + Send + Sync,
{
    fn check(&self, value: &FieldValue, form: &FormValues) -> ValidationResult {
        self(value, form)
    }
}

/// Runs every check without stopping at the first failure.
///
/// Returns whether all of them passed, with the messages of those that did not.
pub fn validate_multiple<F>(value: &str, checks: &[F]) -> (bool, Vec<String>)
where
    F: Fn(&str) -> ValidationResult,
{
    let messages: Vec<String> = checks
        .iter()
        .map(|check| check(value))
        .filter(|result| !result.is_valid)
        .map(|result| result.message)
        .collect();

    (messages.is_empty(), messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::rules::{EmailOptions, LengthOptions};

    #[test]
    fn test_closures_are_predicates() {
        let not_admin = |value: &FieldValue, _: &FormValues| {
            ValidationResult::check(value.as_text() != "admin", "Reserved name.")
        };
        let form = FormValues::new();

        assert!(not_admin.check(&FieldValue::from("alice"), &form).is_valid);
        assert_eq!(not_admin.check(&FieldValue::from("admin"), &form).message, "Reserved name.");
    }

    #[test]
    fn test_validate_multiple_collects_every_failure() {
        let checks: Vec<Box<dyn Fn(&str) -> ValidationResult>> = vec![
            Box::new(|v: &str| email(v, &EmailOptions::default())),
            Box::new(|v: &str| {
                length(
                    v,
                    &LengthOptions {
                        max_length: Some(5),
                        ..Default::default()
                    },
                )
            }),
        ];

        let (all_valid, messages) = validate_multiple("not-an-email", &checks);
        assert!(!all_valid);
        assert_eq!(messages.len(), 2);

        let (all_valid, messages) = validate_multiple("a@b.co", &checks[..1]);
        assert!(all_valid);
        assert!(messages.is_empty());
    }
}
