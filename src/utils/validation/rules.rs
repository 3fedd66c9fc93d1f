//! Typed description of the constraints attached to a field.
//!
//! A rule is declared as `{ type: "...", ...parameters }`. Each `type` maps to
//! exactly one [`RuleKind`] variant carrying only the parameters that kind
//! understands, so dispatching a rule to its predicate is an exhaustive match.

use super::constants::*;
use super::predicates::Predicate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use strum_macros::{EnumDiscriminants, EnumIter};

/// One constraint of a field, with an optional replacement failure message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(flatten)]
    pub kind: RuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldRule {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Replaces the message the predicate would report on failure
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_required(&self) -> bool {
        matches!(self.kind, RuleKind::Required(_))
    }

    pub fn rule_type(&self) -> RuleType {
        RuleType::from(&self.kind)
    }
}

impl From<RuleKind> for FieldRule {
    fn from(kind: RuleKind) -> Self {
        Self::new(kind)
    }
}

/// The closed set of rule kinds and their parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, EnumDiscriminants)]
#[serde(tag = "type", rename_all = "camelCase")]
#[strum_discriminants(name(RuleType), derive(EnumIter, Hash))]
pub enum RuleKind {
    Required(RequiredOptions),
    Alphanumeric(AlphanumericOptions),
    Text(TextOptions),
    Integer(IntegerOptions),
    Decimal(DecimalOptions),
    Date(DateOptions),
    Boolean(BooleanOptions),
    Length(LengthOptions),
    Format(FormatOptions),
    Email(EmailOptions),
    Phone(PhoneOptions),
    Equals(EqualsOptions),
    CompareDate(CompareDateOptions),
    Enum(EnumOptions),
    Grade(GradeOptions),
    Uuid,
    Password(PasswordOptions),
    Custom(CustomRule),
    File(FileOptions),
    Image(MediaOptions),
    Document(MediaOptions),
}

impl RuleType {
    /// Tag used in declarations for this kind
    pub fn tag(&self) -> &'static str {
        match self {
            RuleType::Required => "required",
            RuleType::Alphanumeric => "alphanumeric",
            RuleType::Text => "text",
            RuleType::Integer => "integer",
            RuleType::Decimal => "decimal",
            RuleType::Date => "date",
            RuleType::Boolean => "boolean",
            RuleType::Length => "length",
            RuleType::Format => "format",
            RuleType::Email => "email",
            RuleType::Phone => "phone",
            RuleType::Equals => "equals",
            RuleType::CompareDate => "compareDate",
            RuleType::Enum => "enum",
            RuleType::Grade => "grade",
            RuleType::Uuid => "uuid",
            RuleType::Password => "password",
            RuleType::Custom => "custom",
            RuleType::File => "file",
            RuleType::Image => "image",
            RuleType::Document => "document",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequiredOptions {
    /// Ignore surrounding whitespace when testing for emptiness
    pub trim: bool,
}

impl Default for RequiredOptions {
    fn default() -> Self {
        Self { trim: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlphanumericOptions {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Extra characters accepted besides `[A-Za-z0-9]`
    pub allowed_chars: String,
    pub allow_spaces: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextOptions {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub allow_spaces: bool,
    pub allow_accents: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            min_length: None,
            max_length: None,
            allow_spaces: true,
            allow_accents: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntegerOptions {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub allow_negative: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecimalOptions {
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Maximum number of fractional digits
    pub decimals: Option<u32>,
    pub allow_negative: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateOptions {
    /// `YYYY-MM-DD` or `DD/MM/YYYY`
    pub format: String,
    /// Inclusive lower bound, `YYYY-MM-DD`
    pub min_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`
    pub max_date: Option<String>,
    pub allow_future: bool,
    pub allow_past: bool,
}

impl Default for DateOptions {
    fn default() -> Self {
        Self {
            format: ISO_DATE_FORMAT.to_string(),
            min_date: None,
            max_date: None,
            allow_future: true,
            allow_past: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BooleanOptions {
    pub true_values: Vec<String>,
    pub false_values: Vec<String>,
}

impl Default for BooleanOptions {
    fn default() -> Self {
        Self {
            true_values: TRUE_VALUES.iter().map(|v| v.to_string()).collect(),
            false_values: FALSE_VALUES.iter().map(|v| v.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LengthOptions {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Takes precedence over the bounds when set
    pub exact_length: Option<usize>,
}

/// Built-in patterns understood by the format rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatType {
    Email,
    Phone,
    /// Salvadoran identity document, `12345678-9`
    Dui,
    /// Salvadoran tax number, `1234-567890-123-4`
    Nit,
    Url,
    Username,
    Password,
    #[default]
    Custom,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    pub format_type: FormatType,
    /// Regular expression, required when `format_type` is `custom`
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailOptions {
    pub allowed_domains: Option<Vec<String>>,
    pub blocked_domains: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhoneOptions {
    /// ISO country code: `SV`, `US`, `MX`, anything else gets a generic check
    pub country: String,
    pub require_country_code: bool,
}

impl Default for PhoneOptions {
    fn default() -> Self {
        Self {
            country: DEFAULT_PHONE_COUNTRY.to_string(),
            require_country_code: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EqualsOptions {
    /// Name of the field whose value must match
    pub field: String,
    pub case_sensitive: bool,
}

impl Default for EqualsOptions {
    fn default() -> Self {
        Self {
            field: String::new(),
            case_sensitive: true,
        }
    }
}

/// Relation expected between a date field and the referenced one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateComparison {
    #[default]
    Before,
    After,
    #[serde(alias = "same")]
    Equal,
    BeforeOrEqual,
    AfterOrEqual,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompareDateOptions {
    pub field: String,
    pub comparison: DateComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnumOptions {
    pub allowed_values: Vec<String>,
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GradeOptions {
    pub min: f64,
    pub max: f64,
    pub decimals: u32,
}

impl Default for GradeOptions {
    fn default() -> Self {
        Self {
            min: MIN_GRADE,
            max: MAX_GRADE,
            decimals: GRADE_DECIMALS,
        }
    }
}

/// Composite password requirements. Requirements left unset are not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PasswordOptions {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_number: bool,
    pub require_special: bool,
    /// Minimum zxcvbn score, 0 to 4
    pub min_strength: Option<u8>,
}

impl PasswordOptions {
    /// Upper case, lower case and a digit, at least 8 characters
    pub fn strong() -> Self {
        Self {
            require_uppercase: true,
            require_lowercase: true,
            require_number: true,
            ..Self::default()
        }
    }
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            require_uppercase: false,
            require_lowercase: false,
            require_number: false,
            require_special: false,
            min_strength: None,
        }
    }
}

/// Predicate attached directly to a rule instead of being looked up by name.
#[derive(Clone)]
pub struct InlinePredicate(pub Arc<dyn Predicate>);

impl fmt::Debug for InlinePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InlinePredicate(..)")
    }
}

impl PartialEq for InlinePredicate {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A rule delegating to a caller-supplied predicate.
///
/// The inline predicate wins when both are present; otherwise `name` is
/// resolved against the validators registered on the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomRule {
    pub name: Option<String>,
    #[serde(skip)]
    pub inline: Option<InlinePredicate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileOptions {
    /// Extensions without the dot, compared case-insensitively
    pub allowed_extensions: Option<Vec<String>>,
    pub allowed_types: Option<Vec<String>>,
    #[serde(rename = "maxSizeMB")]
    pub max_size_mb: Option<f64>,
    #[serde(rename = "minSizeMB")]
    pub min_size_mb: Option<f64>,
    pub required: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            allowed_extensions: None,
            allowed_types: None,
            max_size_mb: Some(DEFAULT_MAX_FILE_SIZE_MB),
            min_size_mb: None,
            required: false,
        }
    }
}

/// Size limit and presence for the image and document presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaOptions {
    #[serde(rename = "maxSizeMB")]
    pub max_size_mb: f64,
    pub required: bool,
}

impl Default for MediaOptions {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            required: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_yaml_declaration() {
        let yaml = r#"
- type: required
- type: alphanumeric
  minLength: 3
  maxLength: 100
  allowedChars: "._-"
- type: equals
  field: password
  message: Passwords do not match.
- type: uuid
- type: image
  maxSizeMB: 5
"#;
        let rules: Vec<FieldRule> = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(rules.len(), 5);
        assert!(rules[0].is_required());
        assert_eq!(
            rules[1].kind,
            RuleKind::Alphanumeric(AlphanumericOptions {
                min_length: Some(3),
                max_length: Some(100),
                allowed_chars: "._-".to_string(),
                allow_spaces: false,
            })
        );
        assert_eq!(rules[2].message.as_deref(), Some("Passwords do not match."));
        assert_eq!(rules[3].kind, RuleKind::Uuid);
        assert_eq!(
            rules[4].kind,
            RuleKind::Image(MediaOptions {
                max_size_mb: 5.0,
                required: false
            })
        );
    }

    #[test]
    fn test_unset_parameters_take_defaults() {
        let rule: FieldRule = serde_json::from_str(r#"{"type": "grade"}"#).unwrap();
        assert_eq!(rule.kind, RuleKind::Grade(GradeOptions::default()));

        let rule: FieldRule =
            serde_json::from_str(r#"{"type": "compareDate", "field": "start", "comparison": "same"}"#)
                .unwrap();
        assert_eq!(
            rule.kind,
            RuleKind::CompareDate(CompareDateOptions {
                field: "start".to_string(),
                comparison: DateComparison::Equal,
            })
        );
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: Result<FieldRule, _> = serde_json::from_str(r#"{"type": "telepathy"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_tags_match_serialized_type() {
        let rule = FieldRule::new(RuleKind::CompareDate(CompareDateOptions::default()));
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["type"], rule.rule_type().tag());

        let tags: std::collections::HashSet<_> = RuleType::iter().map(|t| t.tag()).collect();
        assert_eq!(tags.len(), RuleType::iter().count(), "Duplicate rule tag");
    }
}
