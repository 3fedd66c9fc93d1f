//! Constants used throughout the validation system

/// Letters accepted on top of ASCII by text rules that allow accents
pub const ACCENTED_LETTERS: &str = "áéíóúÁÉÍÓÚñÑ";

/// Strings read as `true` by the boolean rule
pub const TRUE_VALUES: [&str; 4] = ["true", "1", "yes", "si"];
/// Strings read as `false` by the boolean rule
pub const FALSE_VALUES: [&str; 3] = ["false", "0", "no"];

/// Default date layout
pub const ISO_DATE_FORMAT: &str = "YYYY-MM-DD";
/// Day-first layout used on printed school forms
pub const DAY_FIRST_DATE_FORMAT: &str = "DD/MM/YYYY";

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 100;
/// Characters accepted in usernames besides letters and digits
pub const USERNAME_EXTRA_CHARS: &str = "._-";

pub const MIN_FULL_NAME_LENGTH: usize = 2;
pub const MAX_FULL_NAME_LENGTH: usize = 120;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Grading scale used by the school: 0 to 10 with two decimals
pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 10.0;
pub const GRADE_DECIMALS: u32 = 2;

pub const DEFAULT_DECIMALS: u32 = 2;

/// Default upload limit, in MB
pub const DEFAULT_MAX_FILE_SIZE_MB: f64 = 10.0;

pub const DEFAULT_PHONE_COUNTRY: &str = "SV";

pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "avif"];
pub const IMAGE_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/avif",
];

pub const DOCUMENT_EXTENSIONS: [&str; 7] = ["pdf", "doc", "docx", "xls", "xlsx", "csv", "txt"];
pub const DOCUMENT_MIME_TYPES: [&str; 7] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/csv",
    "text/plain",
];
