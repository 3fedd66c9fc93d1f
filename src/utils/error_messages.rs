//! Fixed messages reported by predicates and by the form engine

pub const REQUIRED: &str = "This field is required.";

pub const INVALID_UUID: &str = "Invalid UUID.";

pub const INVALID_BOOLEAN: &str = "Invalid boolean value.";

pub const INVALID_EMAIL: &str = "Invalid email format.";

pub const INVALID_DATE: &str = "Invalid date.";

pub const INVALID_DATE_BOUND: &str = "Invalid date bound in field configuration.";

pub const INVALID_DATES: &str = "One or both dates are invalid.";

pub const UNSUPPORTED_DATE_FORMAT: &str = "Unsupported date format.";

pub const FUTURE_DATE: &str = "Future dates are not allowed.";

pub const PAST_DATE: &str = "Past dates are not allowed.";

pub const VALUES_MISMATCH: &str = "Values do not match.";

pub const MISSING_ALLOWED_VALUES: &str = "No allowed values were provided.";

pub const MISSING_PATTERN: &str = "Custom pattern not provided.";

pub const INVALID_PATTERN: &str = "Custom pattern could not be compiled.";

pub const INVALID_FORMAT: &str = "Invalid format.";

pub const FILE_REQUIRED: &str = "A file is required.";

pub const FILE_TYPE_NOT_ALLOWED: &str = "File type not allowed.";

pub const FILE_NOT_AN_IMAGE: &str = "File content is not a recognised image.";

pub const CUSTOM_VALIDATOR_NOT_FOUND: &str = "Custom validator not found.";

pub const PASSWORDS_MISMATCH: &str = "Passwords do not match.";
