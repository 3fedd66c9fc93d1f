//! Global constants of the application.

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api"; // Local development server.
pub const API_URL_ENV: &str = "FORMGUARD_API_URL"; // Overrides the API base URL.

pub const FORM_SPEC_ENV: &str = "FORMGUARD_FORM"; // Form declaration checked by the binary.
pub const FORM_VALUES_ENV: &str = "FORMGUARD_VALUES"; // Submitted values checked by the binary.
pub const DEFAULT_FORM_PATH: &str = "./data/form.yaml";
pub const DEFAULT_VALUES_PATH: &str = "./data/values.json";

pub const LOGIN_PAGE: &str = "../vista/index.html"; // Where unauthenticated users are sent.
pub const MENU_PAGE: &str = "../vista/menu.html"; // Where users without the right role are sent.
