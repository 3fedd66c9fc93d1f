//! Per-field declarations and their registered form

use serde::Deserialize;

use super::document::{ElementId, ElementRef};
use crate::utils::validation::FieldRule;

/// Declaration of one field, as written by the page or loaded from a file.
///
/// `validate_on_input` and `validate_on_blur` fall back to the form-wide
/// options when left unset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub input: ElementRef,
    #[serde(default)]
    pub error: Option<ElementRef>,
    #[serde(default)]
    pub rules: Vec<FieldRule>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub validate_on_input: Option<bool>,
    #[serde(default)]
    pub validate_on_blur: Option<bool>,
}

impl FieldConfig {
    pub fn new(input: impl Into<ElementRef>) -> Self {
        Self {
            input: input.into(),
            error: None,
            rules: Vec::new(),
            label: None,
            validate_on_input: None,
            validate_on_blur: None,
        }
    }

    pub fn error(mut self, error: impl Into<ElementRef>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn rule(mut self, rule: impl Into<FieldRule>) -> Self {
        self.rules.push(rule.into());
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = FieldRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn validate_on_input(mut self, enabled: bool) -> Self {
        self.validate_on_input = Some(enabled);
        self
    }

    pub fn validate_on_blur(mut self, enabled: bool) -> Self {
        self.validate_on_blur = Some(enabled);
        self
    }
}

/// A field once its elements are resolved. Re-registering a field replaces
/// its spec as a whole.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub input: ElementId,
    pub error: Option<ElementId>,
    pub rules: Vec<FieldRule>,
    pub label: String,
    pub validate_on_input: bool,
    pub validate_on_blur: bool,
}

impl FieldSpec {
    pub fn has_required_rule(&self) -> bool {
        self.rules.iter().any(FieldRule::is_required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Rules;

    #[test]
    fn test_builder() {
        let field = FieldConfig::new("#email")
            .error("#emailError")
            .rule(Rules::required())
            .rule(Rules::email())
            .label("Email")
            .validate_on_input(false);

        assert_eq!(field.input, ElementRef::ById("#email".to_string()));
        assert_eq!(field.error, Some(ElementRef::ById("#emailError".to_string())));
        assert_eq!(field.rules.len(), 2);
        assert_eq!(field.label.as_deref(), Some("Email"));
        assert_eq!(field.validate_on_input, Some(false));
        assert_eq!(field.validate_on_blur, None);
    }

    #[test]
    fn test_deserialize() {
        let field: FieldConfig = serde_json::from_str(
            r##"{
                "input": "#grade",
                "rules": [{ "type": "required" }, { "type": "grade", "max": 10 }],
                "validateOnBlur": false
            }"##,
        )
        .expect("valid field declaration");

        assert_eq!(field.input, ElementRef::ById("#grade".to_string()));
        assert_eq!(field.rules, vec![Rules::required(), Rules::grade()]);
        assert_eq!(field.validate_on_blur, Some(false));
    }
}
