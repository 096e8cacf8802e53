//! A [`View`] that logs what the page would show.

use tracing::{info, warn};

use salones_client::view::{Content, FormId, Modal, Tone, View};
use salones_core::VenueId;

/// Terminal rendition of the venue page.
#[derive(Debug, Clone, Copy)]
pub struct TerminalView {
    /// Answer to confirmation prompts.
    assume_yes: bool,
}

impl TerminalView {
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

fn content_text(content: &Content) -> &str {
    match content {
        Content::Text(text) | Content::Html(text) => text,
    }
}

impl View for TerminalView {
    fn open_modal(&self, modal: Modal) {
        info!(modal = modal.element_id(), "Dialog opened");
    }

    fn close_modal(&self, modal: Modal) {
        info!(modal = modal.element_id(), "Dialog closed");
    }

    fn set_admin_controls_visible(&self, visible: bool) {
        info!(visible, "Admin controls");
    }

    fn set_admin_button_label(&self, label: &str) {
        info!(label, "Admin button");
    }

    fn set_form_message(&self, form: FormId, message: &str, tone: Tone) {
        match tone {
            Tone::Info => info!(form = ?form, "{message}"),
            Tone::Error => warn!(form = ?form, "{message}"),
        }
    }

    fn reset_form(&self, _form: FormId) {}

    fn clear_file_input(&self) {}

    fn set_comments(&self, venue: VenueId, content: Content) {
        info!(venue = %venue, "Comments:\n{}", content_text(&content));
    }

    fn set_average(&self, venue: VenueId, text: &str) {
        info!(venue = %venue, average = text, "Average rating");
    }

    fn set_suggestions(&self, content: Content) {
        info!("Pending suggestions:\n{}", content_text(&content));
    }

    fn set_suggestions_message(&self, message: &str) {
        info!("{message}");
    }

    fn set_venue_visible(&self, _venue: VenueId, _visible: bool) {}

    fn remove_venue(&self, venue: VenueId) {
        info!(venue = %venue, "Venue removed from page");
    }

    fn alert(&self, message: &str) {
        warn!("{message}");
    }

    fn confirm(&self, message: &str) -> bool {
        if !self.assume_yes {
            warn!("{message} (pass --yes to confirm)");
        }
        self.assume_yes
    }

    fn reload(&self) {
        info!("Page reload requested");
    }
}
