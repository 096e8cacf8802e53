//! Element id conventions of the venue page.
//!
//! Each venue is rendered inside a container with id `salon-{id}`.

use super::id::VenueId;

const VENUE_CONTAINER_PREFIX: &str = "salon-";

/// Errors that can occur when reading an id back from an element.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DomIdError {
    /// The element id does not follow the `salon-{id}` form.
    #[error("not a venue container id: {0:?}")]
    NotAVenueContainer(String),
}

/// Element id of a venue's container.
#[must_use]
pub fn venue_container_id(venue: VenueId) -> String {
    format!("{VENUE_CONTAINER_PREFIX}{venue}")
}

/// Parse the venue id out of an enclosing container's element id.
///
/// # Errors
///
/// Returns [`DomIdError::NotAVenueContainer`] unless the id is `salon-`
/// followed by an integer.
///
/// ```
/// use salones_core::{VenueId, venue_from_container_id};
///
/// assert_eq!(venue_from_container_id("salon-7"), Ok(VenueId::new(7)));
/// assert!(venue_from_container_id("modalLogin").is_err());
/// ```
pub fn venue_from_container_id(element_id: &str) -> Result<VenueId, DomIdError> {
    element_id
        .strip_prefix(VENUE_CONTAINER_PREFIX)
        .and_then(|rest| rest.parse::<VenueId>().ok())
        .ok_or_else(|| DomIdError::NotAVenueContainer(element_id.to_owned()))
}
