// Client-side error types
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure talking to the finance API, as seen at the response boundary
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("API returned {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl CollaboratorError {
    /// Build a status failure from the raw response body
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        CollaboratorError::Status {
            status,
            message: body_message(body),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CollaboratorError::Status { status, .. } => Some(*status),
            CollaboratorError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Human-readable message supplied by the API, if it sent one
    pub fn message(&self) -> Option<&str> {
        match self {
            CollaboratorError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Pull a non-empty string `message` out of an API error body shaped like
/// `{"error": "...", "message": "..."}`. Only a JSON object counts; anything
/// else (HTML, arrays, empty body, non-string message) yields None.
fn body_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    match parsed.as_object()?.get("message")? {
        Value::String(msg) if !msg.trim().is_empty() => Some(msg.clone()),
        _ => None,
    }
}

/// User-displayable failure of a resource operation. Carries only the message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct OperationError {
    message: String,
}

impl OperationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Keep the API's own message when present, otherwise use the fallback.
    /// Status codes and transport detail stop here.
    pub fn normalize(err: CollaboratorError, fallback: &str) -> Self {
        match err.message() {
            Some(msg) => Self::new(msg),
            None => {
                tracing::debug!("Using fallback message '{}' for: {}", fallback, err);
                Self::new(fallback)
            }
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
