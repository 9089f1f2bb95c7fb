//! Notifications shown to the operator (the dashboard's dialogs)

use std::fmt;
use std::sync::Mutex;

use tracing::{error, info, warn};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub text: String,
}

impl Notice {
    pub fn success(title: &str, text: &str) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    pub fn warning(title: &str, text: &str) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    pub fn error(title: &str, text: &str) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    /// Error dialog for a failed action.
    ///
    /// Uses the server's message when it sent one, `fallback` otherwise.
    pub fn from_error(err: &Error, fallback: &str) -> Self {
        let text = err.message_or(fallback);
        let title = match err {
            Error::Validation(_) => "Incomplete information",
            _ => "Error",
        };
        Self::error(title, &text)
    }
}

/// Receives notices raised by pages and forms
pub trait Notifier: Send + Sync + fmt::Debug {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => info!(title = %notice.title, "{}", notice.text),
            NoticeKind::Warning => warn!(title = %notice.title, "{}", notice.text),
            NoticeKind::Error => error!(title = %notice.title, "{}", notice.text),
        }
    }
}

/// Collects notices so a renderer can drain and display them
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything collected so far
    pub fn take(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        match self.notices.lock() {
            Ok(mut guard) => guard.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}
