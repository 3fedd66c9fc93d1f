//! Declarative validation of a whole form.
//!
//! A [`FormValidator`] owns the page surface, keeps the registered fields in
//! declaration order and evaluates their rules on demand or in response to
//! the `input` and `blur` events forwarded by the host.

use log::{debug, info, warn};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use super::binding::{clear_value, extract_value};
use super::config::{FormConfig, FormOptions};
use super::document::{Document, ElementId, FieldEvent};
use super::field::{FieldConfig, FieldSpec};
use crate::utils::error_messages::CUSTOM_VALIDATOR_NOT_FOUND;
use crate::utils::validation::predicates::{self, Predicate};
use crate::utils::validation::{
    CustomRule, FieldRule, FieldValue, FormValues, RuleKind, ValidationResult,
};

/// Classes set on an input while it holds an error
const INPUT_ERROR_CLASSES: [&str; 2] = ["error", "invalid"];
/// Classes set on an error element while it shows a message
const MESSAGE_CLASSES: [&str; 2] = ["error-message", "show"];

pub struct FormValidator<D: Document> {
    document: D,
    options: FormOptions,
    fields: Vec<FieldSpec>,
    errors: BTreeMap<String, Option<String>>,
    custom_validators: HashMap<String, Arc<dyn Predicate>>,
    /// Fields whose error element currently shows a message
    shown: HashSet<String>,
}

impl<D: Document> FormValidator<D> {
    /// Registers every declared field, in order. Fields whose input cannot
    /// be found are skipped with a warning.
    pub fn new(document: D, config: FormConfig) -> Self {
        let mut validator = Self {
            document,
            options: config.options,
            fields: Vec::with_capacity(config.fields.len()),
            errors: BTreeMap::new(),
            custom_validators: HashMap::new(),
            shown: HashSet::new(),
        };

        for (name, field) in config.fields {
            validator.add_field(name, field);
        }

        validator
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Registered field names, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|spec| spec.name.as_str())
    }

    /// Registers a field, replacing any field of the same name.
    ///
    /// Returns `false` when the input element cannot be resolved, in which
    /// case nothing is registered.
    pub fn add_field(&mut self, name: impl Into<String>, config: FieldConfig) -> bool {
        let name = name.into();

        let Some(input) = config.input.resolve(&self.document) else {
            warn!("Field \"{}\" not found, it will not be validated", name);
            return false;
        };

        let error = config.error.as_ref().and_then(|reference| {
            let resolved = reference.resolve(&self.document);
            if resolved.is_none() {
                warn!("Error element of field \"{}\" not found, errors will not be shown", name);
            }
            resolved
        });

        let spec = FieldSpec {
            label: config.label.unwrap_or_else(|| name.clone()),
            name,
            input,
            error,
            rules: config.rules,
            validate_on_input: config.validate_on_input.unwrap_or(self.options.validate_on_input),
            validate_on_blur: config.validate_on_blur.unwrap_or(self.options.validate_on_blur),
        };

        if spec.validate_on_input {
            self.document.listen(input, FieldEvent::Input);
        }
        if spec.validate_on_blur {
            self.document.listen(input, FieldEvent::Blur);
        }

        debug!("Registered field \"{}\" with {} rules", spec.name, spec.rules.len());

        match self.fields.iter().position(|f| f.name == spec.name) {
            Some(index) => {
                // Nothing recorded or shown for the old declaration survives
                self.errors.remove(&spec.name);
                self.render(index, "", true);
                self.fields[index] = spec;
            }
            None => self.fields.push(spec),
        }
        true
    }

    pub fn remove_field(&mut self, name: &str) {
        self.fields.retain(|spec| spec.name != name);
        self.errors.remove(name);
        self.shown.remove(name);
    }

    /// Makes `predicate` available to `custom` rules naming it
    pub fn add_custom_validator(&mut self, name: impl Into<String>, predicate: impl Predicate + 'static) {
        self.custom_validators.insert(name.into(), Arc::new(predicate));
    }

    /// Turns validation on `input` and `blur` on or off for every field,
    /// including the ones added later.
    pub fn set_realtime_validation(&mut self, enabled: bool) {
        self.options.validate_on_input = enabled;
        self.options.validate_on_blur = enabled;

        for spec in self.fields.iter_mut() {
            spec.validate_on_input = enabled;
            spec.validate_on_blur = enabled;
            if enabled {
                self.document.listen(spec.input, FieldEvent::Input);
                self.document.listen(spec.input, FieldEvent::Blur);
            }
        }
    }

    /// Reacts to an event the host observed on an input.
    ///
    /// Input events validate without revealing new errors; blur events always
    /// show the outcome. Returns the verdict, or `None` when no field with
    /// that trigger enabled owns the element.
    pub fn handle_event(&mut self, element: ElementId, event: FieldEvent) -> Option<bool> {
        let index = self.fields.iter().position(|spec| spec.input == element)?;
        let spec = &self.fields[index];

        let show_errors = match event {
            FieldEvent::Input if spec.validate_on_input => false,
            FieldEvent::Blur if spec.validate_on_blur => true,
            _ => return None,
        };

        Some(self.validate_at(index, show_errors))
    }

    /// Validates one field, records its error and, when `show_errors` is set,
    /// renders it. Unknown fields are valid.
    pub fn validate_field(&mut self, name: &str, show_errors: bool) -> bool {
        match self.fields.iter().position(|spec| spec.name == name) {
            Some(index) => self.validate_at(index, show_errors),
            None => true,
        }
    }

    /// Verdict for one field, without recording or rendering anything
    pub fn check_field(&self, name: &str) -> ValidationResult {
        self.field(name)
            .map(|spec| self.evaluate(spec))
            .unwrap_or_default()
    }

    /// Validates every field without stopping at the first failure, then
    /// focuses the first invalid one if the form asks for it.
    pub fn validate_all(&mut self) -> bool {
        let show_errors = self.options.show_errors_on_submit;
        let mut all_valid = true;

        for index in 0..self.fields.len() {
            if !self.validate_at(index, show_errors) {
                all_valid = false;
            }
        }

        if !all_valid && self.options.focus_first_error {
            let first_invalid = self
                .fields
                .iter()
                .find(|spec| matches!(self.errors.get(&spec.name), Some(Some(_))))
                .map(|spec| spec.input);
            if let Some(input) = first_invalid {
                self.document.focus(input);
            }
        }

        info!(
            "Form validated: {} of {} fields valid",
            self.fields.len() - self.invalid_count(),
            self.fields.len()
        );
        all_valid
    }

    /// Current value of every registered field
    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|spec| (spec.name.clone(), extract_value(&self.document, spec.input)))
            .collect()
    }

    /// Last recorded error of each validated field, `None` when it passed
    pub fn errors(&self) -> &BTreeMap<String, Option<String>> {
        &self.errors
    }

    pub fn clear_errors(&mut self) {
        for index in 0..self.fields.len() {
            self.errors.insert(self.fields[index].name.clone(), None);
            self.render(index, "", true);
        }
    }

    /// Empties every input and every error
    pub fn reset(&mut self) {
        for spec in &self.fields {
            clear_value(&mut self.document, spec.input);
        }
        self.clear_errors();
    }

    fn invalid_count(&self) -> usize {
        self.errors.values().filter(|error| error.is_some()).count()
    }

    fn validate_at(&mut self, index: usize, show_errors: bool) -> bool {
        let result = self.evaluate(&self.fields[index]);
        let name = self.fields[index].name.clone();

        if result.is_valid {
            debug!("Field \"{}\" is valid", name);
            self.errors.insert(name, None);
        } else {
            debug!("Field \"{}\" is invalid: {}", name, result.message);
            self.errors.insert(name, Some(result.message.clone()));
        }

        self.render(index, &result.message, show_errors);
        result.is_valid
    }

    /// Runs the rules of a field in order and stops at the first failure
    fn evaluate(&self, spec: &FieldSpec) -> ValidationResult {
        let value = extract_value(&self.document, spec.input);

        if value.is_empty() && !spec.has_required_rule() {
            return ValidationResult::valid();
        }

        spec.rules
            .iter()
            .map(|rule| {
                self.apply_rule(&value, rule, spec)
                    .with_message(rule.message.as_deref())
            })
            .find(|result| !result.is_valid)
            .unwrap_or_default()
    }

    fn apply_rule(&self, value: &FieldValue, rule: &FieldRule, spec: &FieldSpec) -> ValidationResult {
        let text = value.as_text();

        match &rule.kind {
            RuleKind::Required(options) => predicates::required(value, options),
            RuleKind::Alphanumeric(options) => predicates::alphanumeric(&text, options),
            RuleKind::Text(options) => predicates::text(&text, options),
            RuleKind::Integer(options) => predicates::integer(&text, options),
            RuleKind::Decimal(options) => predicates::decimal(&text, options),
            RuleKind::Date(options) => predicates::date(&text, options),
            RuleKind::Boolean(options) => predicates::boolean(value, options),
            RuleKind::Length(options) => predicates::length(&text, options),
            RuleKind::Format(options) => predicates::format(&text, options),
            RuleKind::Email(options) => predicates::email(&text, options),
            RuleKind::Phone(options) => predicates::phone(&text, options),
            RuleKind::Equals(options) => match self.referenced_value(&options.field, spec) {
                Ok(other) => predicates::equals(value, &other, options.case_sensitive),
                Err(missing) => missing,
            },
            RuleKind::CompareDate(options) => match self.referenced_value(&options.field, spec) {
                Ok(other) => predicates::compare_dates(&text, &other.as_text(), options.comparison),
                Err(missing) => missing,
            },
            RuleKind::Enum(options) => predicates::one_of(&text, options),
            RuleKind::Grade(options) => predicates::grade(&text, options),
            RuleKind::Uuid => predicates::uuid(&text),
            RuleKind::Password(options) => predicates::password(&text, options),
            RuleKind::Custom(custom) => self.apply_custom(value, custom, spec),
            RuleKind::File(options) => predicates::file(value.as_file(), options),
            RuleKind::Image(options) => predicates::image(value.as_file(), options),
            RuleKind::Document(options) => predicates::document(value.as_file(), options),
        }
    }

    /// Value of the field a cross-field rule points at
    fn referenced_value(&self, field: &str, spec: &FieldSpec) -> Result<FieldValue, ValidationResult> {
        match self.field(field) {
            Some(other) => Ok(extract_value(&self.document, other.input)),
            None => {
                warn!("Field \"{}\" refers to unknown field \"{}\"", spec.name, field);
                Err(ValidationResult::invalid(format!("Field \"{}\" not found.", field)))
            }
        }
    }

    fn apply_custom(&self, value: &FieldValue, custom: &CustomRule, spec: &FieldSpec) -> ValidationResult {
        let predicate = match (&custom.inline, &custom.name) {
            (Some(inline), _) => Some(&inline.0),
            (None, Some(name)) => self.custom_validators.get(name),
            (None, None) => None,
        };

        match predicate {
            Some(predicate) => predicate.check(value, &self.values()),
            None => {
                warn!(
                    "Custom validator {:?} of field \"{}\" is not registered",
                    custom.name, spec.name
                );
                ValidationResult::invalid(CUSTOM_VALIDATOR_NOT_FOUND)
            }
        }
    }

    /// Renders the outcome of a field into its error element.
    ///
    /// A failure is rendered when `show` is set or when the field already
    /// shows a message, which is then replaced. Clearing always happens.
    fn render(&mut self, index: usize, message: &str, show: bool) {
        let spec = &self.fields[index];
        let Some(error) = spec.error else {
            return;
        };
        let input = spec.input;

        if message.is_empty() {
            self.shown.remove(&spec.name);
            self.document.set_error_text(error, "");
            self.document.remove_classes(input, &INPUT_ERROR_CLASSES);
            self.document.remove_classes(error, &MESSAGE_CLASSES);
        } else if show || self.shown.contains(&spec.name) {
            self.shown.insert(spec.name.clone());
            self.document.set_error_text(error, message);
            self.document.add_classes(input, &INPUT_ERROR_CLASSES);
            self.document.add_classes(error, &MESSAGE_CLASSES);
        }
    }
}
