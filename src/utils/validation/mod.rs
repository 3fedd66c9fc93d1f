//! Root module for the validation system.
//! Exposes the predicates, the typed rules and the rule catalog.

mod constants;
mod types;
pub mod catalog;
pub mod predicates;
pub mod rules;

// Re-export commonly used types and functions
pub use catalog::Rules;
pub use constants::*;
pub use predicates::Predicate;
pub use rules::*;
pub use types::{FieldValue, FileHandle, FormValues, ValidationResult};
