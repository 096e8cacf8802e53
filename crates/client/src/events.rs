//! Typed UI events.
//!
//! Clickable controls carry a `data-action` attribute and the typed ids the
//! action needs (`data-comment-id`, `data-suggestion-id`, `data-venue-id`,
//! `data-modal`). A [`Trigger`] captures one click; decoding it into a
//! [`UiEvent`] validates every id before any controller runs.
//!
//! | `data-action` | Event |
//! |---------------|-------|
//! | `admin-toggle` | [`UiEvent::AdminToggle`] |
//! | `open-modal` / `close-modal` | [`UiEvent::OpenModal`] / [`UiEvent::CloseModal`] |
//! | `delete-comment` | [`UiEvent::DeleteComment`] |
//! | `view-suggestions` | [`UiEvent::ViewSuggestions`] |
//! | `approve-suggestion` / `deny-suggestion` | [`UiEvent::ResolveSuggestion`] |
//! | `delete-venue` | [`UiEvent::DeleteVenue`] |
//! | `carousel-prev` / `carousel-next` | [`UiEvent::Carousel`] |
//!
//! Form submits and input changes are built directly as [`UiEvent`] values.

use std::collections::HashMap;

use secrecy::SecretString;
use thiserror::Error;

use salones_core::{CommentId, DomIdError, Rating, Resolution, SuggestionId, VenueId, venue_from_container_id};

use crate::api::SuggestionForm;
use crate::carousel::Direction;
use crate::view::Modal;

/// Error decoding a [`Trigger`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Missing data-{0} attribute")]
    MissingAttribute(&'static str),

    #[error("Invalid data-{attribute} value: {value:?}")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
    },

    #[error(transparent)]
    Container(#[from] DomIdError),
}

/// A click on a control carrying `data-action`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trigger {
    /// Value of `data-action`.
    pub action: String,
    /// The control's `data-*` attributes, keyed without the `data-` prefix.
    pub dataset: HashMap<String, String>,
    /// Element id of the enclosing venue container, if any.
    pub container: Option<String>,
}

impl Trigger {
    /// A trigger with no attributes.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }

    /// Add a `data-*` attribute.
    #[must_use]
    pub fn with_data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.dataset.insert(key.to_string(), value.into());
        self
    }

    /// Set the enclosing container id.
    #[must_use]
    pub fn within(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    fn attribute(&self, key: &'static str) -> Result<&str, EventError> {
        self.dataset
            .get(key)
            .map(String::as_str)
            .ok_or(EventError::MissingAttribute(key))
    }

    fn id<T: std::str::FromStr>(&self, key: &'static str) -> Result<T, EventError> {
        let value = self.attribute(key)?;
        value.parse().map_err(|_| EventError::InvalidAttribute {
            attribute: key,
            value: value.to_string(),
        })
    }

    fn modal(&self) -> Result<Modal, EventError> {
        let value = self.attribute("modal")?;
        Modal::from_element_id(value).ok_or_else(|| EventError::InvalidAttribute {
            attribute: "modal",
            value: value.to_string(),
        })
    }

    /// The venue a control belongs to: `data-venue-id`, else the container id.
    fn venue(&self) -> Result<VenueId, EventError> {
        if self.dataset.contains_key("venue-id") {
            return self.id("venue-id");
        }
        match &self.container {
            Some(container) => Ok(venue_from_container_id(container)?),
            None => Err(EventError::MissingAttribute("venue-id")),
        }
    }
}

/// Everything the page can ask the controllers to do.
#[derive(Debug, Clone)]
pub enum UiEvent {
    AdminToggle,
    LoginSubmit {
        username: String,
        password: SecretString,
    },
    OpenModal(Modal),
    CloseModal(Modal),
    /// A venue's comment panel was expanded.
    CommentsOpened(VenueId),
    CommentSubmit {
        venue: VenueId,
        author: String,
        text: String,
        rating: Rating,
    },
    DeleteComment {
        comment: CommentId,
        container: Option<String>,
    },
    ViewSuggestions,
    ResolveSuggestion {
        suggestion: SuggestionId,
        resolution: Resolution,
    },
    /// The suggestion form's file input changed.
    ImagesSelected(usize),
    SuggestionSubmit(SuggestionForm),
    DeleteVenue(VenueId),
    Carousel {
        venue: VenueId,
        direction: Direction,
    },
    Search(String),
}

impl UiEvent {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AdminToggle => "admin_toggle",
            Self::LoginSubmit { .. } => "login_submit",
            Self::OpenModal(_) => "open_modal",
            Self::CloseModal(_) => "close_modal",
            Self::CommentsOpened(_) => "comments_opened",
            Self::CommentSubmit { .. } => "comment_submit",
            Self::DeleteComment { .. } => "delete_comment",
            Self::ViewSuggestions => "view_suggestions",
            Self::ResolveSuggestion { .. } => "resolve_suggestion",
            Self::ImagesSelected(_) => "images_selected",
            Self::SuggestionSubmit(_) => "suggestion_submit",
            Self::DeleteVenue(_) => "delete_venue",
            Self::Carousel { .. } => "carousel",
            Self::Search(_) => "search",
        }
    }
}

impl TryFrom<&Trigger> for UiEvent {
    type Error = EventError;

    fn try_from(trigger: &Trigger) -> Result<Self, Self::Error> {
        let event = match trigger.action.as_str() {
            "admin-toggle" => Self::AdminToggle,
            "open-modal" => Self::OpenModal(trigger.modal()?),
            "close-modal" => Self::CloseModal(trigger.modal()?),
            "delete-comment" => Self::DeleteComment {
                comment: trigger.id("comment-id")?,
                container: trigger.container.clone(),
            },
            "view-suggestions" => Self::ViewSuggestions,
            "approve-suggestion" => Self::ResolveSuggestion {
                suggestion: trigger.id("suggestion-id")?,
                resolution: Resolution::Approve,
            },
            "deny-suggestion" => Self::ResolveSuggestion {
                suggestion: trigger.id("suggestion-id")?,
                resolution: Resolution::Deny,
            },
            "delete-venue" => Self::DeleteVenue(trigger.venue()?),
            "carousel-prev" => Self::Carousel {
                venue: trigger.venue()?,
                direction: Direction::Backward,
            },
            "carousel-next" => Self::Carousel {
                venue: trigger.venue()?,
                direction: Direction::Forward,
            },
            other => return Err(EventError::UnknownAction(other.to_string())),
        };
        Ok(event)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_comment_trigger() {
        let trigger = Trigger::new("delete-comment")
            .with_data("comment-id", "42")
            .within("salon-7");

        match UiEvent::try_from(&trigger).unwrap() {
            UiEvent::DeleteComment { comment, container } => {
                assert_eq!(comment, CommentId::new(42));
                assert_eq!(container.as_deref(), Some("salon-7"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_suggestion_triggers() {
        let approve = Trigger::new("approve-suggestion").with_data("suggestion-id", "5");
        assert!(matches!(
            UiEvent::try_from(&approve).unwrap(),
            UiEvent::ResolveSuggestion { suggestion, resolution: Resolution::Approve }
                if suggestion == SuggestionId::new(5)
        ));

        let deny = Trigger::new("deny-suggestion").with_data("suggestion-id", "5");
        assert!(matches!(
            UiEvent::try_from(&deny).unwrap(),
            UiEvent::ResolveSuggestion { resolution: Resolution::Deny, .. }
        ));
    }

    #[test]
    fn test_carousel_venue_from_attribute_or_container() {
        let by_attribute = Trigger::new("carousel-next").with_data("venue-id", "3");
        assert!(matches!(
            UiEvent::try_from(&by_attribute).unwrap(),
            UiEvent::Carousel { venue, direction: Direction::Forward } if venue == VenueId::new(3)
        ));

        let by_container = Trigger::new("carousel-prev").within("salon-8");
        assert!(matches!(
            UiEvent::try_from(&by_container).unwrap(),
            UiEvent::Carousel { venue, direction: Direction::Backward } if venue == VenueId::new(8)
        ));
    }

    #[test]
    fn test_modal_triggers() {
        let open = Trigger::new("open-modal").with_data("modal", "modalSugerir");
        assert!(matches!(
            UiEvent::try_from(&open).unwrap(),
            UiEvent::OpenModal(Modal::Suggest)
        ));

        let unknown = Trigger::new("close-modal").with_data("modal", "modalX");
        assert_eq!(
            UiEvent::try_from(&unknown).unwrap_err(),
            EventError::InvalidAttribute {
                attribute: "modal",
                value: "modalX".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_triggers_rejected() {
        assert_eq!(
            UiEvent::try_from(&Trigger::new("explode")).unwrap_err(),
            EventError::UnknownAction("explode".to_string())
        );
        assert_eq!(
            UiEvent::try_from(&Trigger::new("delete-comment")).unwrap_err(),
            EventError::MissingAttribute("comment-id")
        );
        assert_eq!(
            UiEvent::try_from(&Trigger::new("delete-comment").with_data("comment-id", "abc"))
                .unwrap_err(),
            EventError::InvalidAttribute {
                attribute: "comment-id",
                value: "abc".to_string()
            }
        );
        assert!(matches!(
            UiEvent::try_from(&Trigger::new("delete-venue").within("sidebar")).unwrap_err(),
            EventError::Container(_)
        ));
    }
}
