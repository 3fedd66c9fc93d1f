//! Metadata of a file selected in a file input.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A file picked by the user, as seen by the validation system.
///
/// Only metadata is mandatory. The raw bytes are optional: browsers rarely
/// hand them over before upload, but headless callers can supply them so the
/// content itself gets checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHandle {
    pub name: String,
    /// Size in bytes
    pub size: u64,
    #[serde(default, rename = "type")]
    pub mime_type: String,
    #[serde(default, skip_serializing)]
    pub content: Option<Vec<u8>>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            content: None,
        }
    }

    /// Attaches the file bytes and updates the size accordingly
    pub fn with_content(mut self, content: Vec<u8>) -> Self {
        self.size = content.len() as u64;
        self.content = Some(content);
        self
    }

    /// Lowercased extension, without any directory component
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase())
    }

    /// Size expressed in mebibytes, the unit used by size rules
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }
}
