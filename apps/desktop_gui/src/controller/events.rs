//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{DashboardSummary, EntryForm, FetchError, LoadTicket};
use shared::{domain::Entry, protocol::RemoteUser};

pub enum UiEvent {
    Info(String),
    BackendReady,
    DashboardLoaded(DashboardSummary),
    DirectoryLocalLoaded {
        ticket: LoadTicket,
        entries: Vec<Entry>,
    },
    DirectoryRemoteResolved {
        ticket: LoadTicket,
        result: Result<Vec<RemoteUser>, FetchError>,
    },
    /// The form as it stands after a submit that reached a verdict, whether
    /// saved or rejected by validation.
    EntrySubmitted {
        form: EntryForm,
    },
    EntrySubmitFailed {
        form: EntryForm,
        error: UiError,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Storage,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    SubmitEntry,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("sqlite")
            || message_lower.contains("database")
            || message_lower.contains("disk")
            || message_lower.contains("student collection")
        {
            UiErrorCategory::Storage
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("http error")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn label(&self) -> &'static str {
        match self.category {
            UiErrorCategory::Storage => "Storage",
            UiErrorCategory::Transport => "Transport",
            UiErrorCategory::Validation => "Validation",
            UiErrorCategory::Unknown => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_write_failure_as_storage() {
        let err = UiError::from_message(
            UiErrorContext::SubmitEntry,
            "failed to write student collection: database is locked",
        );
        assert_eq!(err.category(), UiErrorCategory::Storage);
        assert_eq!(err.context(), UiErrorContext::SubmitEntry);
        assert_eq!(err.label(), "Storage");
    }

    #[test]
    fn classifies_queue_disconnect_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "Backend command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn unclassified_message_is_kept_verbatim() {
        let err = UiError::from_message(UiErrorContext::BackendStartup, "something odd");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.message(), "something odd");
    }
}
