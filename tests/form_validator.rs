use std::path::PathBuf;

use formguard::form::{Document, FieldEvent};
use formguard::{FieldConfig, FieldRule, FieldValue, FormConfig, FormOptions, FormValidator, MemoryDocument, Rules};

fn single_field(value: &str, rules: Vec<FieldRule>) -> FormValidator<MemoryDocument> {
    let mut document = MemoryDocument::new();
    document.add_text("#campo", value);
    document.add_error_slot("#campoError");

    let config = FormConfig::new(FormOptions::default())
        .field("campo", FieldConfig::new("#campo").error("#campoError").rules(rules));
    FormValidator::new(document, config)
}

fn error_text(validator: &FormValidator<MemoryDocument>, selector: &str) -> String {
    let document = validator.document();
    let element = document.query(selector).expect("error element exists");
    document.error_text(element).to_string()
}

fn registration() -> FormValidator<MemoryDocument> {
    let mut document = MemoryDocument::new();
    document.add_text("#email", "not-an-email");
    document.add_text("#nombre", "Ana");
    document.add_text("#promedio", "11");
    for error in ["#emailError", "#nombreError", "#promedioError"] {
        document.add_error_slot(error);
    }

    let config = FormConfig::new(FormOptions::default())
        .field(
            "email",
            FieldConfig::new("#email")
                .error("#emailError")
                .rules([Rules::required(), Rules::email()]),
        )
        .field(
            "nombre",
            FieldConfig::new("#nombre")
                .error("#nombreError")
                .rules([Rules::required(), Rules::full_name()]),
        )
        .field(
            "promedio",
            FieldConfig::new("#promedio")
                .error("#promedioError")
                .rule(Rules::grade()),
        );
    FormValidator::new(document, config)
}

#[test]
fn test_empty_optional_field_is_valid() {
    let cases = vec![
        vec![Rules::email()],
        vec![Rules::integer(Some(1), Some(5))],
        vec![Rules::date()],
        vec![Rules::one_of(&["M", "F"])],
        vec![Rules::length(Some(5), None), Rules::uuid()],
        vec![Rules::confirm_password("password")],
    ];

    for rules in cases {
        let description = format!("{:?}", rules);
        let mut validator = single_field("", rules);
        assert!(
            validator.validate_field("campo", true),
            "Empty value should pass optional rules {}",
            description
        );
    }
}

#[test]
fn test_empty_required_field_is_invalid() {
    let cases = vec![
        vec![Rules::required()],
        vec![Rules::email(), Rules::required()],
        vec![Rules::required_with("Fill this in.")],
    ];

    for rules in cases {
        let description = format!("{:?}", rules);
        let mut validator = single_field("   ", rules);
        assert!(
            !validator.validate_field("campo", true),
            "Blank value should fail {}",
            description
        );
        assert!(!error_text(&validator, "#campoError").is_empty());
    }
}

#[test]
fn test_rule_order_decides_the_message() {
    let mut length_first = single_field("ab", vec![Rules::length(Some(5), None), Rules::integer(None, None)]);
    let mut integer_first = single_field("ab", vec![Rules::integer(None, None), Rules::length(Some(5), None)]);

    assert!(!length_first.validate_field("campo", true));
    assert!(!integer_first.validate_field("campo", true));
    assert_eq!(error_text(&length_first, "#campoError"), "Must be at least 5 characters long.");
    assert_eq!(error_text(&integer_first, "#campoError"), "Must be a positive whole number.");
}

#[test]
fn test_validate_all_reports_every_invalid_field() {
    let mut validator = registration();

    assert!(!validator.validate_all());

    assert!(!error_text(&validator, "#emailError").is_empty());
    assert!(error_text(&validator, "#nombreError").is_empty());
    assert!(!error_text(&validator, "#promedioError").is_empty());

    let document = validator.document();
    let email = document.query("#email").expect("email input");
    assert_eq!(document.focused(), Some(email), "First invalid field should get focus");
    assert!(document.has_class(email, "invalid"));

    let invalid: Vec<&str> = validator
        .errors()
        .iter()
        .filter(|(_, error)| error.is_some())
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(invalid, vec!["email", "promedio"]);
}

#[test]
fn test_validation_is_idempotent() {
    let mut validator = registration();

    let first = validator.validate_all();
    let first_errors = validator.errors().clone();
    let second = validator.validate_all();

    assert_eq!(first, second);
    assert_eq!(&first_errors, validator.errors());
}

#[test]
fn test_reset_clears_values_and_errors() {
    let mut validator = registration();
    validator.validate_all();

    validator.reset();

    assert!(validator.values().values().all(FieldValue::is_empty));
    assert!(validator.errors().values().all(Option::is_none));
    for selector in ["#emailError", "#nombreError", "#promedioError"] {
        assert_eq!(error_text(&validator, selector), "", "{} should be cleared", selector);
    }
    let email = validator.document().query("#email").expect("email input");
    assert!(!validator.document().has_class(email, "invalid"));
}

#[test]
fn test_equals_follows_the_other_field() {
    let mut document = MemoryDocument::new();
    document.add_text("#password", "Secret123");
    let confirm = document.add_text("#confirm", "Secret123");

    let config = FormConfig::new(FormOptions::default())
        .field("password", FieldConfig::new("#password").rule(Rules::required()))
        .field(
            "confirmPassword",
            FieldConfig::new("#confirm").rules([Rules::required(), Rules::confirm_password("password")]),
        );
    let mut validator = FormValidator::new(document, config);

    assert!(validator.validate_field("confirmPassword", true));

    validator.document_mut().set_text(confirm, "secret123");
    assert_eq!(validator.handle_event(confirm, FieldEvent::Blur), Some(false));
    assert_eq!(
        validator.errors().get("confirmPassword"),
        Some(&Some("Passwords do not match.".to_string()))
    );
}

#[test]
fn test_declared_form_against_submission() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let config = FormConfig::from_file(root.join("data/form.yaml")).expect("form declaration loads");
    let raw = std::fs::read_to_string(root.join("data/values.json")).expect("values exist");
    let values: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&raw).expect("values are a JSON object");

    let document = MemoryDocument::from_submission(&config, &values);
    let mut validator = FormValidator::new(document, config);

    assert!(!validator.validate_all());

    let invalid: Vec<&str> = validator
        .errors()
        .iter()
        .filter(|(_, error)| error.is_some())
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(invalid, vec!["confirmPassword", "promedio", "terminos"]);
    assert_eq!(
        validator.errors().get("terminos"),
        Some(&Some("You must accept the terms.".to_string()))
    );

    let first = validator.document().query("#confirmPassword").expect("confirm input");
    assert_eq!(validator.document().focused(), Some(first));
}
