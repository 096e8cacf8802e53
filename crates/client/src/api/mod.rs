//! Salones backend API.
//!
//! This module provides:
//! - [`SalonesApi`], the seam the controllers talk through
//! - [`HttpApi`], the `reqwest` implementation against the REST backend
//! - Request bodies and the [`ApiError`] taxonomy
//!
//! # Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list comments | `GET /api/salones/{id}/comentarios` |
//! | create comment | `POST /api/salones/{id}/comentarios` |
//! | delete comment | `DELETE /api/comentarios/{id}` |
//! | login / logout | `POST /admin/login`, `POST /admin/logout` |
//! | pending suggestions | `GET /admin/salones-pendientes` |
//! | resolve suggestion | `POST /admin/salones-pendientes/{id}/aceptar\|denegar` |
//! | suggest a venue | `POST /sugerir` (multipart) |
//! | delete venue | `POST /admin/salones/{id}/eliminar` |

mod client;
mod error;
mod types;

use std::future::Future;

use salones_core::{Comment, CommentId, NewComment, Resolution, Suggestion, SuggestionId, VenueId};

pub use client::HttpApi;
pub use error::ApiError;
pub use types::{Credentials, ImageUpload, SuggestionForm};

/// Operations the backend exposes to the venue page.
///
/// Every call is a single attempt; retries are never performed here.
pub trait SalonesApi: Send + Sync {
    /// Fetch the comments of a venue.
    fn list_comments(
        &self,
        venue: VenueId,
    ) -> impl Future<Output = Result<Vec<Comment>, ApiError>> + Send;

    /// Publish a comment on a venue.
    fn create_comment(
        &self,
        venue: VenueId,
        comment: &NewComment,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Delete a comment (admin session required server-side).
    fn delete_comment(&self, comment: CommentId)
    -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Open an admin session.
    fn login(&self, credentials: &Credentials)
    -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Close the admin session on the server.
    fn logout(&self) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Fetch suggestions awaiting moderation.
    fn list_suggestions(&self) -> impl Future<Output = Result<Vec<Suggestion>, ApiError>> + Send;

    /// Approve or deny a suggestion, returning the backend's confirmation text.
    fn resolve_suggestion(
        &self,
        suggestion: SuggestionId,
        resolution: Resolution,
    ) -> impl Future<Output = Result<Option<String>, ApiError>> + Send;

    /// Submit a venue suggestion with its images.
    fn submit_suggestion(
        &self,
        form: &SuggestionForm,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Delete a published venue.
    fn delete_venue(&self, venue: VenueId) -> impl Future<Output = Result<(), ApiError>> + Send;
}
