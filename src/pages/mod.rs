//! Pages - the user-facing workflows
//!
//! Each page is a set of async functions over the services. A page either
//! returns its view data or a `Notice` carrying a short generic message;
//! the underlying error is logged, never shown. Pages keep no state
//! between calls, so a failed action leaves whatever the caller holds
//! untouched.

pub mod auth;
pub mod dashboard;
pub mod layout;
pub mod preview;
pub mod settings;
pub mod upload;

pub use layout::{Resolution, Route, NAV_ITEMS};

/// Message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Log `error` and turn it into a generic error notice
pub(crate) fn failure(message: &str, error: impl std::fmt::Display) -> Notice {
    tracing::error!("{}: {}", message, error);
    Notice::error(message)
}
