//! Unified error handling for controller operations.
//!
//! Every operation shows its own failure on the page before returning
//! `Err`, so callers only need to log. The three kinds of failure are:
//! - client-side validation ([`ClientError::Validation`], [`ClientError::AdminRequired`]),
//!   which never reaches the network
//! - server-reported failure ([`ApiError::Server`])
//! - transport failure ([`ApiError::Transport`], [`ApiError::Decode`])

use salones_core::DomIdError;
use thiserror::Error;

use crate::api::ApiError;
use crate::events::EventError;

/// Error returned by controller operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input rejected before any request was sent.
    #[error("Validation failed: {0}")]
    Validation(&'static str),

    /// The operation is reserved to admin mode.
    #[error("Admin session required")]
    AdminRequired,

    /// The backend call failed.
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// A fragment failed to render.
    #[error("Template error: {0}")]
    Render(#[from] askama::Error),

    /// An element id did not carry the expected identifier.
    #[error("Invalid element id: {0}")]
    InvalidId(#[from] DomIdError),

    /// A click could not be decoded into an event.
    #[error("Invalid event: {0}")]
    Event(#[from] EventError),
}

impl ClientError {
    /// Whether the request never left the client.
    #[must_use]
    pub const fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::AdminRequired | Self::Event(_)
        )
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Text shown for a failed backend call.
///
/// Server-reported failures show the server's text (or `fallback` when it
/// sent none); transport failures show `network`.
pub(crate) fn user_message<'a>(err: &'a ApiError, fallback: &'a str, network: &'a str) -> &'a str {
    match err {
        ApiError::Server { message, .. } => message.as_deref().unwrap_or(fallback),
        ApiError::Transport(_) | ApiError::Decode(_) => network,
    }
}
