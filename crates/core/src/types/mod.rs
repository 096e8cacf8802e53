//! Core types for Salones.
//!
//! This module provides type-safe wrappers for the venue listing domain.

pub mod comment;
pub mod dom;
pub mod id;
pub mod media;
pub mod rating;
pub mod session;
pub mod suggestion;

pub use comment::{Comment, NewComment};
pub use dom::{DomIdError, venue_container_id, venue_from_container_id};
pub use id::*;
pub use media::static_path;
pub use rating::{Rating, RatingError, RatingSummary};
pub use session::SessionState;
pub use suggestion::{MAX_SUGGESTION_IMAGES, Resolution, Suggestion};
