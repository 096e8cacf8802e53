//! Backend API errors.

use thiserror::Error;

/// Errors that can occur when talking to the Salones backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never completed (connection refused, timeout, bad URL).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("server returned {status}: {}", message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        /// The `error` field of the response body, if any.
        message: Option<String>,
    },

    /// The response body could not be read.
    #[error("unreadable response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message the backend attached to a failure, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
