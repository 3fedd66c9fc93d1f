//! Form-wide options and whole-form declarations

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::field::FieldConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read form declaration {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid YAML form declaration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid JSON form declaration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Defaults applied to every field of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormOptions {
    pub validate_on_blur: bool,
    pub validate_on_input: bool,
    pub show_errors_on_submit: bool,
    pub focus_first_error: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            validate_on_blur: true,
            validate_on_input: true,
            show_errors_on_submit: true,
            focus_first_error: true,
        }
    }
}

/// A whole form: options plus its fields in declaration order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormConfig {
    #[serde(flatten)]
    pub options: FormOptions,
    #[serde(default, deserialize_with = "ordered_fields")]
    pub fields: Vec<(String, FieldConfig)>,
}

impl FormConfig {
    pub fn new(options: FormOptions) -> Self {
        Self {
            options,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, field: FieldConfig) -> Self {
        self.fields.push((name.into(), field));
        self
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads a declaration, as JSON when the file says so and YAML otherwise
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }
}

/// Keeps the fields map in the order it was written
fn ordered_fields<'de, D>(deserializer: D) -> Result<Vec<(String, FieldConfig)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FieldsVisitor;

    impl<'de> Visitor<'de> for FieldsVisitor {
        type Value = Vec<(String, FieldConfig)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of field names to field declarations")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, field)) = map.next_entry::<String, FieldConfig>()? {
                fields.push((name, field));
            }
            Ok(fields)
        }
    }

    deserializer.deserialize_map(FieldsVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::{RuleKind, Rules};

    const DECLARATION: &str = r##"
validateOnInput: false
fields:
  username:
    input: "#username"
    error: "#usernameError"
    rules:
      - type: required
      - type: alphanumeric
        minLength: 3
        maxLength: 100
        allowedChars: "._-"
  password:
    input: "#password"
    rules:
      - type: required
      - type: password
        minLength: 8
        requireUppercase: true
        requireLowercase: true
        requireNumber: true
  confirm:
    input: "#confirm"
    rules:
      - type: equals
        field: password
        message: "Passwords do not match."
"##;

    #[test]
    fn test_yaml_keeps_declaration_order() {
        let config = FormConfig::from_yaml_str(DECLARATION).expect("valid declaration");
        let names: Vec<&str> = config.fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["username", "password", "confirm"]);
    }

    #[test]
    fn test_yaml_options_and_defaults() {
        let config = FormConfig::from_yaml_str(DECLARATION).expect("valid declaration");
        assert!(!config.options.validate_on_input);
        assert!(config.options.validate_on_blur);
        assert!(config.options.show_errors_on_submit);
        assert!(config.options.focus_first_error);
    }

    #[test]
    fn test_yaml_matches_catalog() {
        let config = FormConfig::from_yaml_str(DECLARATION).expect("valid declaration");

        assert_eq!(config.fields[0].1.rules, vec![Rules::required(), Rules::username()]);
        assert_eq!(config.fields[1].1.rules[1], Rules::strong_password());
        assert_eq!(
            config.fields[2].1.rules[0],
            Rules::confirm_password("password").with_message("Passwords do not match.")
        );
    }

    #[test]
    fn test_json_declaration() {
        let config = FormConfig::from_json_str(
            r##"{ "fields": { "grade": { "input": "#grade", "rules": [{ "type": "grade" }] } } }"##,
        )
        .expect("valid declaration");

        assert_eq!(config.options, FormOptions::default());
        assert!(matches!(config.fields[0].1.rules[0].kind, RuleKind::Grade(_)));
    }

    #[test]
    fn test_unknown_rule_type_is_rejected() {
        let result = FormConfig::from_yaml_str(
            r##"
fields:
  name:
    input: "#name"
    rules:
      - type: telepathy
"##,
        );
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = FormConfig::from_file("./does/not/exist.yaml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
