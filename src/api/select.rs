//! Option lists for `<select>` elements built from API data

use log::error;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("Invalid data format for an option list")]
    InvalidData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
    pub selected: bool,
    /// `data-*` attributes, keyed without the prefix
    pub data: BTreeMap<String, String>,
}

impl SelectOption {
    fn placeholder(value: &str, text: &str) -> Self {
        Self {
            value: value.to_string(),
            text: text.to_string(),
            selected: false,
            data: BTreeMap::new(),
        }
    }
}

type ItemFilter = Box<dyn Fn(&Value) -> bool>;
type TextFormatter = Box<dyn Fn(&Value) -> String>;

/// How items map to options
pub struct SelectConfig {
    pub value_key: String,
    pub text_key: String,
    /// Placeholder option put first, as `(value, text)`
    pub default_option: Option<(String, String)>,
    pub selected_value: Option<String>,
    /// Attribute name to item property
    pub data_attributes: BTreeMap<String, String>,
    pub filter: Option<ItemFilter>,
    pub text_formatter: Option<TextFormatter>,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            value_key: "id".to_string(),
            text_key: "nombre".to_string(),
            default_option: Some((String::new(), "Select...".to_string())),
            selected_value: None,
            data_attributes: BTreeMap::new(),
            filter: None,
            text_formatter: None,
        }
    }
}

impl SelectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(mut self, value_key: &str, text_key: &str) -> Self {
        self.value_key = value_key.to_string();
        self.text_key = text_key.to_string();
        self
    }

    pub fn default_option(mut self, value: &str, text: &str) -> Self {
        self.default_option = Some((value.to_string(), text.to_string()));
        self
    }

    pub fn without_default(mut self) -> Self {
        self.default_option = None;
        self
    }

    pub fn selected(mut self, value: impl Into<String>) -> Self {
        self.selected_value = Some(value.into());
        self
    }

    pub fn data_attribute(mut self, name: &str, property: &str) -> Self {
        self.data_attributes.insert(name.to_string(), property.to_string());
        self
    }

    pub fn filter(mut self, filter: impl Fn(&Value) -> bool + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn text_formatter(mut self, formatter: impl Fn(&Value) -> String + 'static) -> Self {
        self.text_formatter = Some(Box::new(formatter));
        self
    }
}

/// Text of a scalar property; missing and null properties are empty
fn scalar_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Builds the options for `data`, which may be a list of items, a paginated
/// answer (`{"content": [...]}`) or a single item.
pub fn fill_options(data: &Value, config: &SelectConfig) -> Result<Vec<SelectOption>, SelectError> {
    let items: Vec<&Value> = match data {
        Value::Array(items) => items.iter().collect(),
        Value::Object(object) => match object.get("content") {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => vec![data],
        },
        _ => {
            error!("Cannot build options from {}", data);
            return Err(SelectError::InvalidData);
        }
    };

    let mut options: Vec<SelectOption> = config
        .default_option
        .iter()
        .map(|(value, text)| SelectOption::placeholder(value, text))
        .collect();

    for item in items {
        if let Some(filter) = &config.filter {
            if !filter(item) {
                continue;
            }
        }

        let value = scalar_text(item.get(&config.value_key));
        let text = match &config.text_formatter {
            Some(formatter) => formatter(item),
            None => scalar_text(item.get(&config.text_key)),
        };

        let data = config
            .data_attributes
            .iter()
            .filter_map(|(name, property)| {
                item.get(property)
                    .map(|v| (name.clone(), scalar_text(Some(v))))
            })
            .collect();

        let selected = config
            .selected_value
            .as_deref()
            .is_some_and(|wanted| !wanted.is_empty() && wanted == value);

        options.push(SelectOption {
            value,
            text,
            selected,
            data,
        });
    }

    Ok(options)
}
