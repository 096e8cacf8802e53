//! Venue comments as exchanged with the backend.

use serde::{Deserialize, Serialize};

use super::id::{CommentId, VenueId};
use super::rating::Rating;

/// A published comment on a venue.
///
/// Field names on the wire follow the backend (`usuario`, `estrellas`,
/// `comentario`, `fecha`). Comments are never edited in place; they are
/// created by visitors and deleted by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    #[serde(rename = "salon_id", default, skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<VenueId>,
    #[serde(rename = "usuario")]
    pub author: String,
    #[serde(rename = "estrellas")]
    pub rating: Rating,
    #[serde(rename = "comentario")]
    pub text: String,
    /// Backend timestamp, displayed verbatim.
    #[serde(rename = "fecha", default)]
    pub timestamp: Option<String>,
}

/// Body of `POST /api/salones/{id}/comentarios`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    #[serde(rename = "usuario")]
    pub author: String,
    #[serde(rename = "comentario")]
    pub text: String,
    #[serde(rename = "estrellas")]
    pub rating: Rating,
}
