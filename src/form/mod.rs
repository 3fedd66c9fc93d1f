//! Binding of validation rules to the fields of a page

pub mod binding;
pub mod config;
pub mod document;
pub mod field;
pub mod memory;
pub mod validator;

pub use config::{ConfigError, FormConfig, FormOptions};
pub use document::{Document, ElementId, ElementRef, FieldEvent, InputKind};
pub use field::{FieldConfig, FieldSpec};
pub use memory::MemoryDocument;
pub use validator::FormValidator;
