// src/error.rs

use std::fmt;

/// Global client error enum.
/// Centralizes failure modes of talking to the assessment backend.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout).
    Transport(String),

    /// The backend answered with a non-success status.
    /// Carries the status code and the message extracted from the
    /// `{"error": ...}` / `{"detail": ...}` body, when present.
    Rejected { status: u16, message: String },

    /// The response body could not be decoded into the expected shape.
    Decode(String),
}

impl ApiError {
    /// The user-facing message, matching what the backend put in the body
    /// (or a generic fallback for transport/decode failures).
    pub fn message(&self) -> &str {
        match self {
            ApiError::Transport(msg) => msg,
            ApiError::Rejected { message, .. } => message,
            ApiError::Decode(msg) => msg,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {}", msg),
            ApiError::Rejected { status, message } => {
                write!(f, "request failed ({}): {}", status, message)
            }
            ApiError::Decode(msg) => write!(f, "decode error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Converts `reqwest::Error` into the matching `ApiError` variant.
/// Allows using the `?` operator on client calls.
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
