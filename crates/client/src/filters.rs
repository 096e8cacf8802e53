//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Resolves a stored image reference to its `/static/` path.
///
/// Usage in templates: `{{ src|static_url }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn static_url(reference: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(salones_core::static_path(&reference.to_string()))
}
