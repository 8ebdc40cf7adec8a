//! Error classification for API calls.

use thiserror::Error;

/// Failure of a single API call.
///
/// Messages are kept as strings so the error is `Clone` and one result
/// can be handed to every caller waiting on a shared request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Could not reach the server
    #[error("Connection failed: {message}")]
    Transport { message: String },

    /// Request exceeded the configured timeout
    #[error("Request timed out after {duration}s")]
    Timeout { duration: u64 },

    /// Server answered with an application error (e.g. "user not found")
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Response body was not what we expected
    #[error("Unexpected response: {message}")]
    Decode { message: String },

    /// Request could not be built (bad base URL or username)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Get error type string for log fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Transport { .. } => "transport",
            ApiError::Timeout { .. } => "timeout",
            ApiError::Server { .. } => "server",
            ApiError::Decode { .. } => "decode",
            ApiError::InvalidRequest(_) => "invalid_request",
        }
    }

    /// Network-level failures, as opposed to the server saying no.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. } | ApiError::Timeout { .. })
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            ApiError::Timeout {
                duration: timeout_secs,
            }
        } else if err.is_decode() {
            ApiError::Decode {
                message: err.to_string(),
            }
        } else {
            ApiError::Transport {
                message: err.to_string(),
            }
        }
    }
}
