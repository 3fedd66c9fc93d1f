//! The page surface a form validator reads values from and renders errors into.

use derive_more::Display;
use serde::Deserialize;

use crate::utils::validation::FileHandle;

/// Opaque handle to an element, obtained once when a field is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("element {_0}")]
pub struct ElementId(pub usize);

/// How a field declaration points at its element.
///
/// Declarations loaded from YAML or JSON always use a selector; code building
/// a form by hand can hand over an element it already holds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ElementRef {
    ById(String),
    Direct(ElementId),
}

impl ElementRef {
    pub fn resolve<D: Document + ?Sized>(&self, document: &D) -> Option<ElementId> {
        match self {
            ElementRef::ById(selector) => document.query(selector),
            ElementRef::Direct(element) => document.contains(*element).then_some(*element),
        }
    }
}

impl From<String> for ElementRef {
    fn from(selector: String) -> Self {
        ElementRef::ById(selector)
    }
}

impl From<&str> for ElementRef {
    fn from(selector: &str) -> Self {
        ElementRef::ById(selector.to_string())
    }
}

impl From<ElementId> for ElementRef {
    fn from(element: ElementId) -> Self {
        ElementRef::Direct(element)
    }
}

/// Kind of input, which decides how its value is read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputKind {
    #[default]
    Text,
    Checkbox,
    Radio,
    File,
}

/// Events a field can be validated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FieldEvent {
    #[display("input")]
    Input,
    #[display("blur")]
    Blur,
}

/// Operations the validator needs from the page.
///
/// Implementations are expected to be cheap to query: values are read again
/// on every validation, never cached by the validator.
pub trait Document {
    /// Looks an element up by selector
    fn query(&self, selector: &str) -> Option<ElementId>;

    fn contains(&self, element: ElementId) -> bool;

    fn kind(&self, element: ElementId) -> InputKind;

    /// Current text value
    fn text(&self, element: ElementId) -> String;

    fn checked(&self, element: ElementId) -> bool;

    /// Name shared by the radio buttons of a group
    fn group_name(&self, element: ElementId) -> Option<String>;

    fn checked_in_group(&self, group: &str) -> Option<ElementId>;

    /// Files currently selected in a file input
    fn files(&self, element: ElementId) -> Vec<FileHandle>;

    fn set_text(&mut self, element: ElementId, value: &str);

    fn set_checked(&mut self, element: ElementId, checked: bool);

    fn clear_files(&mut self, element: ElementId);

    /// Text content of an error element
    fn set_error_text(&mut self, element: ElementId, message: &str);

    fn add_classes(&mut self, element: ElementId, classes: &[&str]);

    fn remove_classes(&mut self, element: ElementId, classes: &[&str]);

    fn focus(&mut self, element: ElementId);

    /// Subscribes the validator to an event of the element. The host is in
    /// charge of forwarding it to [`crate::form::FormValidator::handle_event`].
    ///
    /// Must be idempotent: the validator subscribes again when a field is
    /// replaced or realtime validation is switched back on, and the event
    /// must still be forwarded once.
    fn listen(&mut self, element: ElementId, event: FieldEvent);
}
