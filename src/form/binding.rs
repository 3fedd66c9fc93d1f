//! Reading and clearing field values according to the input kind

use super::document::{Document, ElementId, InputKind};
use crate::utils::validation::FieldValue;

/// Current value of an input.
///
/// Text inputs give their text, checkboxes their checked state, radio buttons
/// the value of the checked member of their group (empty when none is), and
/// file inputs their first selected file.
pub fn extract_value<D: Document + ?Sized>(document: &D, element: ElementId) -> FieldValue {
    match document.kind(element) {
        InputKind::Text => FieldValue::Text(document.text(element)),
        InputKind::Checkbox => FieldValue::Checked(document.checked(element)),
        InputKind::Radio => {
            let selected = document
                .group_name(element)
                .and_then(|group| document.checked_in_group(&group));
            FieldValue::Text(selected.map(|el| document.text(el)).unwrap_or_default())
        }
        InputKind::File => FieldValue::File(document.files(element).into_iter().next()),
    }
}

/// Empties an input the way a form reset would
pub fn clear_value<D: Document + ?Sized>(document: &mut D, element: ElementId) {
    match document.kind(element) {
        InputKind::Text => document.set_text(element, ""),
        InputKind::Checkbox => document.set_checked(element, false),
        InputKind::Radio => {
            let selected = document
                .group_name(element)
                .and_then(|group| document.checked_in_group(&group));
            if let Some(selected) = selected {
                document.set_checked(selected, false);
            }
        }
        InputKind::File => document.clear_files(element),
    }
}
