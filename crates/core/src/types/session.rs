//! Admin session state.

use serde::{Deserialize, Serialize};

/// Whether the current tab is in admin mode.
///
/// This is a UI visibility gate only. Every moderation endpoint is still
/// authorized by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Anonymous,
    Admin,
}

impl SessionState {
    /// Returns `true` in admin mode.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Label of the header button that toggles the session.
    #[must_use]
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Anonymous => "Login Admin",
            Self::Admin => "Cerrar sesión",
        }
    }
}
