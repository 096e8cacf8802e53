//! Salones client interaction layer.
//!
//! Controllers for the venue page, written against traits instead of a
//! browser:
//!
//! - [`carousel`]: per-venue image rotation with fade transitions and a
//!   single repeating timer per carousel
//! - [`sync`]: the admin session flag and every backend cycle (comments,
//!   suggestions, moderation)
//! - [`app`]: page bootstrap and the single dispatch path for [`events`]
//!
//! The page is reached through [`view::View`] and [`view::ImageSurface`], the
//! backend through [`api::SalonesApi`] (implemented over HTTP by
//! [`api::HttpApi`]) and tab storage through [`session::SessionStore`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod app;
pub mod carousel;
pub mod config;
pub mod error;
pub mod events;
mod filters;
pub mod messages;
pub mod render;
pub mod session;
pub mod sync;
pub mod view;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use app::{App, Page, VenueMarkup};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use events::{Trigger, UiEvent};
