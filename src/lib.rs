//! Declarative form validation for the school management front end.
//!
//! Fields declare ordered [`utils::validation::FieldRule`]s, either through the
//! [`Rules`] catalog or loaded from YAML/JSON. A [`FormValidator`] binds them to
//! a [`form::Document`] and validates on input, on blur and on submit.

pub mod api;
pub mod consts;
pub mod form;
pub mod notify;
pub mod utils;

pub use form::{FieldConfig, FormConfig, FormOptions, FormValidator, MemoryDocument};
pub use utils::validation::{predicates, FieldRule, FieldValue, RuleKind, Rules, ValidationResult};
