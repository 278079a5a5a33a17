//! inFakt client error types.

use thiserror::Error;

/// Result type for inFakt client operations.
pub type InfaktResult<T> = Result<T, InfaktError>;

/// Errors that can occur while talking to the inFakt API.
#[derive(Debug, Error)]
pub enum InfaktError {
    /// A monetary field could not be parsed as a number.
    #[error("Invalid amount for '{field}': {value}")]
    InvalidAmount { field: String, value: String },

    /// The API answered with a non-2xx status.
    #[error("inFakt API error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Network failure with no structured API response.
    #[error("inFakt API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body is not the expected JSON.
    #[error("inFakt API returned an unreadable response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The client could not be constructed from its configuration.
    #[error("Client configuration error: {0}")]
    Config(String),
}

impl InfaktError {
    /// Create an "invalid amount" error.
    pub fn invalid_amount(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidAmount {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a backend error from a status code and message.
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }

    /// Build a backend error from a failed response body.
    ///
    /// Looks for `error`, then `message`, then `errors` in a JSON body and
    /// falls back to a generic status line when none is present.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|data| {
                data.get("error")
                    .and_then(|v| v.as_str())
                    .or_else(|| data.get("message").and_then(|v| v.as_str()))
                    .map(str::to_string)
                    .or_else(|| data.get("errors").map(|v| v.to_string()))
            })
            .unwrap_or_else(|| format!("Request failed with status code {}", status));

        Self::backend(status, message)
    }

    /// Status code reported by the backend, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
