//! Checks submitted form values against a form declaration, the way the
//! server side re-validates what the pages already checked.
//!
//! Usage: `formguard [form.yaml] [values.json]`. Paths default to the
//! environment (`FORMGUARD_FORM`, `FORMGUARD_VALUES`) and then to `./data`.

use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use log::info;
use serde_json::Value;
use std::{env, fs};

use formguard::consts::{DEFAULT_FORM_PATH, DEFAULT_VALUES_PATH, FORM_SPEC_ENV, FORM_VALUES_ENV};
use formguard::notify::{LogNotifier, Notifier, NotifyKind};
use formguard::{FormConfig, FormValidator, MemoryDocument};

fn path_from(arg: Option<String>, var: &str, default: &str) -> String {
    arg.or_else(|| env::var(var).ok())
        .unwrap_or_else(|| default.to_string())
}

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = env::args().skip(1);
    let form_path = path_from(args.next(), FORM_SPEC_ENV, DEFAULT_FORM_PATH);
    let values_path = path_from(args.next(), FORM_VALUES_ENV, DEFAULT_VALUES_PATH);

    let config = FormConfig::from_file(&form_path)
        .with_context(|| format!("Failed to load form declaration {}", form_path))?;

    let raw = fs::read_to_string(&values_path)
        .with_context(|| format!("Failed to read submitted values {}", values_path))?;
    let Value::Object(values) = serde_json::from_str::<Value>(&raw)
        .with_context(|| format!("Submitted values {} are not valid JSON", values_path))?
    else {
        bail!("Submitted values {} must be a JSON object", values_path);
    };

    info!("Validating {} against {}", values_path, form_path);

    let document = MemoryDocument::from_submission(&config, &values);
    let mut validator = FormValidator::new(document, config);
    let valid = validator.validate_all();

    let mut notifier = LogNotifier::default();
    if valid {
        notifier.notify(NotifyKind::Success, "All fields are valid.", true, None);
    } else {
        notifier.notify(NotifyKind::Error, "Some fields are invalid.", false, None);
    }

    let errors: serde_json::Map<String, Value> = validator
        .errors()
        .iter()
        .filter_map(|(name, error)| {
            error
                .as_ref()
                .map(|message| (name.clone(), Value::String(message.clone())))
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&errors)?);

    if !valid {
        std::process::exit(1);
    }
    Ok(())
}
