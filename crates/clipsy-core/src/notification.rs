//! User-facing notifications.
//!
//! Every failure of a triggering operation ends up as a [`Notice`] so that
//! nothing is silently swallowed except shares that are not relevant.

use crate::error::ClipsyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A blocking notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn processing() -> Self {
        Self::info("Processing", "Extracting content from shared link...")
    }

    /// Maps a failure to the text the user sees.
    pub fn from_error(error: &ClipsyError) -> Self {
        match error {
            ClipsyError::SessionExpired => Self::error("Session expired", "Please sign in again."),
            ClipsyError::NotAuthenticated => {
                Self::error("Sign in required", "Please sign in to save shared links.")
            }
            ClipsyError::Network(_) => Self::error(
                "Network error",
                "Check your internet connection and try again.",
            ),
            ClipsyError::Server { message, .. } if !message.is_empty() => {
                Self::error("Error", message.clone())
            }
            ClipsyError::Server { .. } => {
                Self::error("Error", "Failed to extract content. Please try again.")
            }
            ClipsyError::Configuration(detail) => Self::error("Configuration error", detail.clone()),
            other => Self::error("Error", other.to_string()),
        }
    }
}

/// Presents notices to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
