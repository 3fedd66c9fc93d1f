//! Logged-in user session and page guards

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{self, ErrorKind::NotFound};
use std::path::Path;

use super::{crud_method, ApiError, Client, CredentialProvider, Payload, RequestPayload, Transport};
use crate::consts::{LOGIN_PAGE, MENU_PAGE};
use crate::notify::{Notifier, NotifyKind};

const LOGIN_ENDPOINT: &str = "/auth/login";

/// Token and profile of the current user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStore {
    token: Option<String>,
    user: Option<Value>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a saved session. A missing file is an empty session.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        match File::open(path.as_ref()) {
            Ok(file) => Ok(serde_json::from_reader(file)?),
            Err(not_found) if not_found.kind() == NotFound => Ok(Self::default()),
            Err(other) => Err(other),
        }
    }

    pub fn persist(&self, path: impl AsRef<Path>) -> Result<(), io::Error> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn save(&mut self, token: impl Into<String>, user: Value) {
        self.token = Some(token.into());
        self.user = Some(user);
    }

    pub fn user(&self) -> Option<&Value> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Name of the user's role, found under `rol.nombre` of the profile
    pub fn user_role(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        let profile = user.get("usuario").unwrap_or(user);
        profile
            .get("rol")
            .and_then(|rol| rol.get("nombre"))
            .and_then(Value::as_str)
            .filter(|role| !role.is_empty())
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.user_role() == Some(role)
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
    }
}

impl CredentialProvider for SessionStore {
    fn token(&self) -> Option<String> {
        self.token.clone().filter(|t| !t.is_empty())
    }
}

/// Logs in and keeps the returned token and profile in the client's session
pub fn login<T: Transport>(
    client: &mut Client<T, SessionStore>,
    username: &str,
    password: &str,
) -> Result<(), ApiError> {
    let credentials = RequestPayload::new()
        .field("username", username)
        .field("password", password);

    let response = client.request(LOGIN_ENDPOINT, crud_method('C')?, &credentials, &[])?;

    let Payload::Json(mut data) = response else {
        return Err(ApiError::UnexpectedResponse("login answer is not JSON".to_string()));
    };
    let Some(token) = data.get("token").and_then(Value::as_str).map(str::to_string) else {
        return Err(ApiError::UnexpectedResponse("login answer has no token".to_string()));
    };
    let user = data.get_mut("usuario").map(Value::take).unwrap_or(Value::Null);

    info!("User \"{}\" logged in", username);
    client.credentials_mut().save(token, user);
    Ok(())
}

/// Lets the page load only for a logged-in user holding one of
/// `allowed_roles` (any role when empty). Otherwise notifies and sends the
/// user to the login page or back to the menu.
pub fn require_auth<N: Notifier + ?Sized>(
    session: &SessionStore,
    notifier: &mut N,
    allowed_roles: &[&str],
) -> bool {
    if !session.is_authenticated() {
        notifier.notify(
            NotifyKind::Warning,
            "You must log in to access this page.",
            false,
            Some(LOGIN_PAGE),
        );
        return false;
    }

    if !allowed_roles.is_empty() {
        let allowed = session
            .user_role()
            .is_some_and(|role| allowed_roles.contains(&role));
        if !allowed {
            notifier.notify(
                NotifyKind::Error,
                "You do not have permission to access this page.",
                false,
                Some(MENU_PAGE),
            );
            return false;
        }
    }

    true
}

/// Logs out after confirmation. Returns whether the user logged out.
pub fn handle_logout<N: Notifier + ?Sized>(session: &mut SessionStore, notifier: &mut N) -> bool {
    if !notifier.confirm("Are you sure you want to log out?") {
        return false;
    }

    session.logout();
    notifier.notify(
        NotifyKind::Success,
        "You have logged out.",
        true,
        Some(LOGIN_PAGE),
    );
    true
}
