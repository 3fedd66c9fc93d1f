//! User notifications and confirmations.
//!
//! Pages show these as modal alerts; headless callers log them.

use derive_more::Display;
use log::{error, info, warn};
use strum_macros::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum NotifyKind {
    #[display("Success")]
    Success,
    #[display("Error")]
    Error,
    #[display("Warning")]
    Warning,
    #[display("Notice")]
    Info,
}

impl NotifyKind {
    /// Numeric codes used by page scripts: 1 success, 2 error, 3 warning,
    /// 4 notice. Anything else is a notice.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => NotifyKind::Success,
            2 => NotifyKind::Error,
            3 => NotifyKind::Warning,
            _ => NotifyKind::Info,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            NotifyKind::Success => 1,
            NotifyKind::Error => 2,
            NotifyKind::Warning => 3,
            NotifyKind::Info => 4,
        }
    }
}

impl From<u8> for NotifyKind {
    fn from(code: u8) -> Self {
        Self::from_code(code)
    }
}

pub trait Notifier {
    /// Shows a message, then navigates to `redirect` when given.
    /// `auto_dismiss` closes the message after a short delay instead of
    /// waiting for the user.
    fn notify(&mut self, kind: NotifyKind, message: &str, auto_dismiss: bool, redirect: Option<&str>);

    /// Asks a yes/no question
    fn confirm(&mut self, message: &str) -> bool;
}

/// Notifier writing to the log, answering confirmations with a fixed choice
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier {
    pub confirm_answer: bool,
}

impl LogNotifier {
    pub fn new(confirm_answer: bool) -> Self {
        Self { confirm_answer }
    }
}

impl Notifier for LogNotifier {
    fn notify(&mut self, kind: NotifyKind, message: &str, _auto_dismiss: bool, redirect: Option<&str>) {
        match kind {
            NotifyKind::Error => error!("{}: {}", kind, message),
            NotifyKind::Warning => warn!("{}: {}", kind, message),
            NotifyKind::Success | NotifyKind::Info => info!("{}: {}", kind, message),
        }
        if let Some(target) = redirect {
            info!("Redirecting to {}", target);
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        info!("{} -> {}", message, if self.confirm_answer { "yes" } else { "no" });
        self.confirm_answer
    }
}
