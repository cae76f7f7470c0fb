//! Unified error type definition

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A duration or timestamp string that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{input}' is not a ISO 8601-formatted duration")]
pub struct FormatError {
    /// The offending input
    pub input: String,
}

impl FormatError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Failed call to the backend model.
///
/// Carries the HTTP status of the failed request and, if the server
/// provided one, the trace id for correlating server-side logs.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ModelError {
    /// Human-readable error message
    pub message: String,
    /// HTTP status code
    pub http_status: u16,
    /// HTTP status text
    pub http_status_text: String,
    /// Server trace id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// JSON body of a failed backend response.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ModelError {
    /// Build a `ModelError` from a failed HTTP response.
    ///
    /// The message is taken from a JSON `{"message": ...}` body when the
    /// server sent one, otherwise from the status line.
    pub fn from_response(
        http_status: u16,
        http_status_text: impl Into<String>,
        trace_id: Option<String>,
        body: &str,
    ) -> Self {
        let http_status_text = http_status_text.into();
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("The server returned an error: {http_status_text}"));

        Self {
            message,
            http_status,
            http_status_text,
            trace_id,
        }
    }

    /// Status line and trace id, e.g. `HTTP 503: Service Unavailable (Trace ID: abc)`.
    pub fn details(&self) -> String {
        let mut details = format!("HTTP {}: {}", self.http_status, self.http_status_text);
        if let Some(trace_id) = &self.trace_id {
            details.push_str(&format!(" (Trace ID: {trace_id})"));
        }
        details
    }
}

/// Core layer error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed duration or timestamp
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Backend model call failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The model returned no environments to choose from
    #[error("There are currently no environments available")]
    EmptyScope,

    /// The user dismissed a dialog
    #[error("The dialog was cancelled")]
    Cancelled,

    /// A dialog was opened while its previous outcome was still pending
    #[error("The dialog is already open")]
    DialogBusy,

    /// Settings storage error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Network error (no HTTP response)
    #[error("Network error: {0}")]
    NetworkError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, dismissed dialog, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Format(_) | Self::EmptyScope | Self::Cancelled)
    }

    /// The model error behind this error, if any.
    pub fn as_model_error(&self) -> Option<&ModelError> {
        match self {
            Self::Model(e) => Some(e),
            _ => None,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
