//! User-facing notices
//!
//! The message and severity a toast would show. Rendering belongs to the
//! page; this crate only decides what to say.

use serde::{Deserialize, Serialize};

/// Severity, serialised to match the page's `alert-<level>` classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Danger,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl Default for NoticeLevel {
    fn default() -> Self {
        Self::Info
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Danger, message)
    }

    /// Shown when a same-origin request fails for any reason.
    ///
    /// The cause is logged, never shown.
    pub fn request_failed() -> Self {
        Self::danger("An error occurred. Please try again.")
    }

    /// CSS class for the alert block, e.g. `alert-warning`
    pub fn css_class(&self) -> String {
        format!("alert-{}", self.level.as_str())
    }
}
