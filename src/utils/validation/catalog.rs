//! Ready-made rules for the fields that keep showing up in school forms.
//!
//! Every constructor returns a plain [`FieldRule`], so catalog rules and rules
//! declared in YAML or JSON go through the same engine.

use super::constants::*;
use crate::utils::error_messages::PASSWORDS_MISMATCH;
use super::predicates::Predicate;
use super::rules::*;
use std::sync::Arc;

pub struct Rules;

impl Rules {
    pub fn required() -> FieldRule {
        RuleKind::Required(RequiredOptions::default()).into()
    }

    pub fn required_with(message: impl Into<String>) -> FieldRule {
        Self::required().with_message(message)
    }

    /// Letters, digits and `._-`, between 3 and 100 characters
    pub fn username() -> FieldRule {
        Self::username_between(MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH)
    }

    pub fn username_between(min_length: usize, max_length: usize) -> FieldRule {
        RuleKind::Alphanumeric(AlphanumericOptions {
            min_length: Some(min_length),
            max_length: Some(max_length),
            allowed_chars: USERNAME_EXTRA_CHARS.to_string(),
            allow_spaces: false,
        })
        .into()
    }

    /// Letters, spaces and accents, between 2 and 120 characters
    pub fn full_name() -> FieldRule {
        Self::full_name_between(MIN_FULL_NAME_LENGTH, MAX_FULL_NAME_LENGTH)
    }

    pub fn full_name_between(min_length: usize, max_length: usize) -> FieldRule {
        Self::text(Some(min_length), Some(max_length))
    }

    pub fn email() -> FieldRule {
        RuleKind::Email(EmailOptions::default()).into()
    }

    pub fn email_from(domains: &[&str]) -> FieldRule {
        RuleKind::Email(EmailOptions {
            allowed_domains: Some(domains.iter().map(|d| d.to_string()).collect()),
            blocked_domains: None,
        })
        .into()
    }

    pub fn phone(country: &str, require_country_code: bool) -> FieldRule {
        RuleKind::Phone(PhoneOptions {
            country: country.to_string(),
            require_country_code,
        })
        .into()
    }

    pub fn password(options: PasswordOptions) -> FieldRule {
        RuleKind::Password(options).into()
    }

    /// At least 8 characters with upper case, lower case and a digit
    pub fn strong_password() -> FieldRule {
        Self::password(PasswordOptions::strong())
    }

    /// Must repeat the value of `field`
    pub fn confirm_password(field: &str) -> FieldRule {
        FieldRule::new(RuleKind::Equals(EqualsOptions {
            field: field.to_string(),
            case_sensitive: true,
        }))
        .with_message(PASSWORDS_MISMATCH)
    }

    pub fn date() -> FieldRule {
        RuleKind::Date(DateOptions::default()).into()
    }

    pub fn date_with(options: DateOptions) -> FieldRule {
        RuleKind::Date(options).into()
    }

    /// ISO date that is not in the future
    pub fn birth_date() -> FieldRule {
        Self::date_with(DateOptions {
            allow_future: false,
            ..Default::default()
        })
    }

    pub fn integer(min: Option<i64>, max: Option<i64>) -> FieldRule {
        RuleKind::Integer(IntegerOptions {
            min,
            max,
            allow_negative: false,
        })
        .into()
    }

    pub fn decimal(min: Option<f64>, max: Option<f64>, decimals: u32) -> FieldRule {
        RuleKind::Decimal(DecimalOptions {
            min,
            max,
            decimals: Some(decimals),
            allow_negative: false,
        })
        .into()
    }

    /// 0 to 10 with at most two decimals
    pub fn grade() -> FieldRule {
        RuleKind::Grade(GradeOptions::default()).into()
    }

    pub fn grade_between(min: f64, max: f64, decimals: u32) -> FieldRule {
        RuleKind::Grade(GradeOptions { min, max, decimals }).into()
    }

    pub fn one_of(values: &[&str]) -> FieldRule {
        RuleKind::Enum(EnumOptions {
            allowed_values: values.iter().map(|v| v.to_string()).collect(),
            case_sensitive: false,
        })
        .into()
    }

    pub fn boolean() -> FieldRule {
        RuleKind::Boolean(BooleanOptions::default()).into()
    }

    pub fn uuid() -> FieldRule {
        RuleKind::Uuid.into()
    }

    pub fn length(min_length: Option<usize>, max_length: Option<usize>) -> FieldRule {
        RuleKind::Length(LengthOptions {
            min_length,
            max_length,
            exact_length: None,
        })
        .into()
    }

    pub fn exact_length(length: usize) -> FieldRule {
        RuleKind::Length(LengthOptions {
            exact_length: Some(length),
            ..Default::default()
        })
        .into()
    }

    pub fn alphanumeric(
        min_length: Option<usize>,
        max_length: Option<usize>,
        allowed_chars: &str,
    ) -> FieldRule {
        RuleKind::Alphanumeric(AlphanumericOptions {
            min_length,
            max_length,
            allowed_chars: allowed_chars.to_string(),
            allow_spaces: false,
        })
        .into()
    }

    pub fn text(min_length: Option<usize>, max_length: Option<usize>) -> FieldRule {
        RuleKind::Text(TextOptions {
            min_length,
            max_length,
            ..Default::default()
        })
        .into()
    }

    pub fn format(format_type: FormatType, pattern: Option<&str>, message: Option<&str>) -> FieldRule {
        let rule = FieldRule::new(RuleKind::Format(FormatOptions {
            format_type,
            pattern: pattern.map(str::to_string),
        }));
        match message {
            Some(message) => rule.with_message(message),
            None => rule,
        }
    }

    /// Compares this field's date against the date in `field`
    pub fn date_comparison(
        field: &str,
        comparison: DateComparison,
        message: Option<&str>,
    ) -> FieldRule {
        let rule = FieldRule::new(RuleKind::CompareDate(CompareDateOptions {
            field: field.to_string(),
            comparison,
        }));
        match message {
            Some(message) => rule.with_message(message),
            None => rule,
        }
    }

    /// Delegates to a validator registered on the form under `name`
    pub fn custom(name: &str) -> FieldRule {
        RuleKind::Custom(CustomRule {
            name: Some(name.to_string()),
            inline: None,
        })
        .into()
    }

    /// Delegates to the given predicate
    pub fn custom_fn(predicate: impl Predicate + 'static, message: Option<&str>) -> FieldRule {
        let rule = FieldRule::new(RuleKind::Custom(CustomRule {
            name: None,
            inline: Some(InlinePredicate(Arc::new(predicate))),
        }));
        match message {
            Some(message) => rule.with_message(message),
            None => rule,
        }
    }

    pub fn file(options: FileOptions) -> FieldRule {
        RuleKind::File(options).into()
    }

    pub fn image(max_size_mb: f64, required: bool) -> FieldRule {
        RuleKind::Image(MediaOptions {
            max_size_mb,
            required,
        })
        .into()
    }

    pub fn document(max_size_mb: f64, required: bool) -> FieldRule {
        RuleKind::Document(MediaOptions {
            max_size_mb,
            required,
        })
        .into()
    }
}
