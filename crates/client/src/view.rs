//! The page surface the controllers render into.
//!
//! The HTML document is owned by the browser; controllers only address it
//! through stable, identifier-keyed operations. A stale response therefore
//! lands in the container of the venue it was issued for, whatever the user
//! did in the meantime.

use salones_core::VenueId;

/// Modal dialogs on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modal {
    /// Admin login form.
    Login,
    /// Notice shown after logging out.
    Logout,
    /// "Suggest a venue" form.
    Suggest,
    /// Pending suggestions review (admin).
    Suggestions,
}

impl Modal {
    /// Element id of the dialog.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Login => "modalLogin",
            Self::Logout => "modalLogout",
            Self::Suggest => "modalSugerir",
            Self::Suggestions => "modalSugerencias",
        }
    }

    /// Look a dialog up by element id.
    #[must_use]
    pub fn from_element_id(id: &str) -> Option<Self> {
        [Self::Login, Self::Logout, Self::Suggest, Self::Suggestions]
            .into_iter()
            .find(|modal| modal.element_id() == id)
    }
}

/// Forms whose message line and fields the controllers manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormId {
    Login,
    Suggestion,
    Comment(VenueId),
}

/// Styling of a form message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Info,
    Error,
}

/// Content for a region of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain text, inserted as a text node.
    Text(String),
    /// Markup already escaped by the renderer.
    Html(String),
}

impl Content {
    /// Plain text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// DOM operations used by the sync controller and the application.
pub trait View: Send + Sync {
    fn open_modal(&self, modal: Modal);
    fn close_modal(&self, modal: Modal);

    /// Show or hide every admin-only control (delete buttons, review entry point).
    fn set_admin_controls_visible(&self, visible: bool);
    fn set_admin_button_label(&self, label: &str);

    fn set_form_message(&self, form: FormId, message: &str, tone: Tone);
    fn reset_form(&self, form: FormId);
    /// Clear the suggestion form's file input.
    fn clear_file_input(&self);

    /// Replace a venue's comment panel.
    fn set_comments(&self, venue: VenueId, content: Content);
    /// Replace a venue's average rating badge.
    fn set_average(&self, venue: VenueId, text: &str);

    /// Replace the pending suggestions list.
    fn set_suggestions(&self, content: Content);
    fn set_suggestions_message(&self, message: &str);

    fn set_venue_visible(&self, venue: VenueId, visible: bool);
    /// Remove a venue's container from the page.
    fn remove_venue(&self, venue: VenueId);

    fn alert(&self, message: &str);
    /// Ask the user to confirm a destructive action.
    fn confirm(&self, message: &str) -> bool;
    /// Reload the whole page.
    fn reload(&self);
}

/// The `<img>` element of a carousel.
///
/// Called from timer tasks, so implementations must be thread-safe.
pub trait ImageSurface: Send + Sync + 'static {
    fn set_opacity(&self, venue: VenueId, opacity: f32);
    fn set_source(&self, venue: VenueId, src: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_element_ids() {
        for modal in [Modal::Login, Modal::Logout, Modal::Suggest, Modal::Suggestions] {
            assert_eq!(Modal::from_element_id(modal.element_id()), Some(modal));
        }
        assert_eq!(Modal::from_element_id("modalX"), None);
    }
}
