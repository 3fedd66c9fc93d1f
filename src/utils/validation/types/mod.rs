//! Type definitions for the validation system

mod field_value;
mod file_handle;
mod validation_result;

// Re-export commonly used types
pub use field_value::{FieldValue, FormValues};
pub use file_handle::FileHandle;
pub use validation_result::ValidationResult;
