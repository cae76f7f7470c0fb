//! Error banner content.

use crate::error::CoreError;

/// Navigation target of the banner's reload action.
pub const RELOAD_TARGET: &str = "/#reload";

/// How severe an error shown in the banner is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Auto-dismissed after a delay, no reload action
    Recoverable,
    /// Stays until the user reloads; the application has no state to recover into
    Fatal,
}

/// Content of the error banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerMessage {
    pub text: String,
    /// `HTTP <status>: <text> (Trace ID: ...)` for model errors
    pub details: Option<String>,
    pub severity: Severity,
    /// Where the reload action navigates to; only set for fatal errors
    pub reload_target: Option<String>,
}

impl BannerMessage {
    pub fn from_error(error: &CoreError, severity: Severity) -> Self {
        Self {
            text: error.to_string(),
            details: error.as_model_error().map(crate::error::ModelError::details),
            severity,
            reload_target: (severity == Severity::Fatal).then(|| RELOAD_TARGET.to_string()),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}
