//! Shared utilities: the validation system and its messages

pub mod error_messages;
pub mod validation;
