//! In-memory page, used for headless validation of submitted data and in tests.

use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use super::config::FormConfig;
use super::document::{Document, ElementId, ElementRef, FieldEvent, InputKind};
use crate::utils::validation::FileHandle;

#[derive(Debug, Clone, Default)]
struct Element {
    selector: String,
    kind: InputKind,
    value: String,
    checked: bool,
    group: Option<String>,
    files: Vec<FileHandle>,
    classes: BTreeSet<String>,
    listeners: Vec<FieldEvent>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<Element>,
    focused: Option<ElementId>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    fn get(&self, element: ElementId) -> Option<&Element> {
        self.elements.get(element.0)
    }

    fn get_mut(&mut self, element: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(element.0)
    }

    pub fn add_text(&mut self, selector: &str, value: &str) -> ElementId {
        self.push(Element {
            selector: selector.to_string(),
            value: value.to_string(),
            ..Default::default()
        })
    }

    pub fn add_checkbox(&mut self, selector: &str, checked: bool) -> ElementId {
        self.push(Element {
            selector: selector.to_string(),
            kind: InputKind::Checkbox,
            checked,
            ..Default::default()
        })
    }

    pub fn add_radio(&mut self, selector: &str, group: &str, value: &str, checked: bool) -> ElementId {
        self.push(Element {
            selector: selector.to_string(),
            kind: InputKind::Radio,
            value: value.to_string(),
            checked,
            group: Some(group.to_string()),
            ..Default::default()
        })
    }

    pub fn add_file(&mut self, selector: &str, files: Vec<FileHandle>) -> ElementId {
        self.push(Element {
            selector: selector.to_string(),
            kind: InputKind::File,
            files,
            ..Default::default()
        })
    }

    /// Element holding the error message of a field
    pub fn add_error_slot(&mut self, selector: &str) -> ElementId {
        self.add_text(selector, "")
    }

    /// Builds the inputs of a declared form from submitted values.
    ///
    /// Each field gets an input matching its selector, filled from the value
    /// stored under the field name: booleans become checkboxes, objects and
    /// arrays file inputs, anything else text. Missing values leave the input
    /// empty. Error elements are created for the fields that declare one.
    pub fn from_submission(config: &FormConfig, values: &Map<String, Value>) -> Self {
        let mut document = Self::new();

        for (name, field) in &config.fields {
            let ElementRef::ById(selector) = &field.input else {
                warn!("Field \"{}\" points at a live element, skipping", name);
                continue;
            };

            match values.get(name) {
                Some(Value::Bool(checked)) => {
                    document.add_checkbox(selector, *checked);
                }
                Some(value @ (Value::Object(_) | Value::Array(_))) => {
                    document.add_file(selector, files_from(name, value));
                }
                Some(Value::String(text)) => {
                    document.add_text(selector, text);
                }
                Some(Value::Number(number)) => {
                    document.add_text(selector, &number.to_string());
                }
                Some(Value::Null) | None => {
                    debug!("No value submitted for \"{}\"", name);
                    document.add_text(selector, "");
                }
            }

            if let Some(ElementRef::ById(error)) = &field.error {
                document.add_error_slot(error);
            }
        }

        document
    }

    /// Text shown by an error element
    pub fn error_text(&self, element: ElementId) -> &str {
        self.get(element).map(|e| e.value.as_str()).unwrap_or_default()
    }

    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.get(element).is_some_and(|e| e.classes.contains(class))
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    pub fn listeners(&self, element: ElementId) -> &[FieldEvent] {
        self.get(element).map(|e| e.listeners.as_slice()).unwrap_or_default()
    }

    pub fn set_files(&mut self, element: ElementId, files: Vec<FileHandle>) {
        if let Some(e) = self.get_mut(element) {
            e.files = files;
        }
    }
}

fn files_from(name: &str, value: &Value) -> Vec<FileHandle> {
    let items = match value {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<FileHandle>(item) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("Ignoring malformed file submitted for \"{}\": {}", name, e);
                None
            }
        })
        .collect()
}

impl Document for MemoryDocument {
    fn query(&self, selector: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.selector == selector)
            .map(ElementId)
    }

    fn contains(&self, element: ElementId) -> bool {
        element.0 < self.elements.len()
    }

    fn kind(&self, element: ElementId) -> InputKind {
        self.get(element).map(|e| e.kind).unwrap_or_default()
    }

    fn text(&self, element: ElementId) -> String {
        self.get(element).map(|e| e.value.clone()).unwrap_or_default()
    }

    fn checked(&self, element: ElementId) -> bool {
        self.get(element).is_some_and(|e| e.checked)
    }

    fn group_name(&self, element: ElementId) -> Option<String> {
        self.get(element).and_then(|e| e.group.clone())
    }

    fn checked_in_group(&self, group: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.kind == InputKind::Radio && e.checked && e.group.as_deref() == Some(group))
            .map(ElementId)
    }

    fn files(&self, element: ElementId) -> Vec<FileHandle> {
        self.get(element).map(|e| e.files.clone()).unwrap_or_default()
    }

    fn set_text(&mut self, element: ElementId, value: &str) {
        if let Some(e) = self.get_mut(element) {
            e.value = value.to_string();
        }
    }

    fn set_checked(&mut self, element: ElementId, checked: bool) {
        // Checking a radio button unchecks the rest of its group
        if checked {
            if let Some(group) = self.group_name(element) {
                for e in self.elements.iter_mut() {
                    if e.group.as_deref() == Some(group.as_str()) {
                        e.checked = false;
                    }
                }
            }
        }
        if let Some(e) = self.get_mut(element) {
            e.checked = checked;
        }
    }

    fn clear_files(&mut self, element: ElementId) {
        self.set_files(element, Vec::new());
    }

    fn set_error_text(&mut self, element: ElementId, message: &str) {
        self.set_text(element, message);
    }

    fn add_classes(&mut self, element: ElementId, classes: &[&str]) {
        if let Some(e) = self.get_mut(element) {
            e.classes.extend(classes.iter().map(|c| c.to_string()));
        }
    }

    fn remove_classes(&mut self, element: ElementId, classes: &[&str]) {
        if let Some(e) = self.get_mut(element) {
            for class in classes {
                e.classes.remove(*class);
            }
        }
    }

    fn focus(&mut self, element: ElementId) {
        self.focused = Some(element);
    }

    fn listen(&mut self, element: ElementId, event: FieldEvent) {
        if let Some(e) = self.get_mut(element) {
            if !e.listeners.contains(&event) {
                e.listeners.push(event);
            }
        }
    }
}
