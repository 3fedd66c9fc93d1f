//! Current value of a form field, extracted according to its input kind.

use super::FileHandle;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Snapshot of every registered field, keyed by field name.
pub type FormValues = BTreeMap<String, FieldValue>;

/// The value held by a field at validation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text-like inputs, selects and the checked member of a radio group
    Text(String),
    /// Checkbox state
    Checked(bool),
    /// First selected file of a file input, if any
    File(Option<FileHandle>),
}

impl FieldValue {
    /// An empty string, an unchecked checkbox or a missing file.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Checked(checked) => !checked,
            FieldValue::File(file) => file.is_none(),
        }
    }

    /// Textual view of the value, as text predicates see it
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(text) => Cow::Borrowed(text),
            FieldValue::Checked(checked) => Cow::Owned(checked.to_string()),
            FieldValue::File(Some(file)) => Cow::Borrowed(&file.name),
            FieldValue::File(None) => Cow::Borrowed(""),
        }
    }

    pub fn as_file(&self) -> Option<&FileHandle> {
        match self {
            FieldValue::File(file) => file.as_ref(),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<bool> for FieldValue {
    fn from(checked: bool) -> Self {
        FieldValue::Checked(checked)
    }
}

impl From<FileHandle> for FieldValue {
    fn from(file: FileHandle) -> Self {
        FieldValue::File(Some(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness_per_kind() {
        let cases = vec![
            (FieldValue::from(""), true),
            (FieldValue::from(" "), false),
            (FieldValue::from("0"), false),
            (FieldValue::Checked(false), true),
            (FieldValue::Checked(true), false),
            (FieldValue::File(None), true),
            (FieldValue::from(FileHandle::new("a.pdf", 1, "application/pdf")), false),
        ];

        for (value, expected) in cases {
            assert_eq!(value.is_empty(), expected, "Unexpected emptiness for {:?}", value);
        }
    }

    #[test]
    fn test_text_view() {
        assert_eq!(FieldValue::Checked(true).as_text(), "true");
        assert_eq!(FieldValue::File(None).as_text(), "");
        assert_eq!(FieldValue::from(FileHandle::new("cv.pdf", 1, "")).as_text(), "cv.pdf");
    }
}
