//! Salones Core - Shared types library.
//!
//! This crate provides the domain types used across the Salones components:
//! - `client` - Carousel and admin/suggestion controllers for the venue page
//! - `cli` - Headless driver for the controllers against a live backend
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no timers. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, ratings, comments, suggestions, session state and
//!   element id helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
