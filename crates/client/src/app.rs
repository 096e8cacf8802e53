//! Page bootstrap and event dispatch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use secrecy::ExposeSecret;
use tracing::{debug, info, instrument, warn};

use salones_core::VenueId;

use crate::api::SalonesApi;
use crate::carousel::{CarouselController, images_from_markup};
use crate::config::CarouselConfig;
use crate::error::Result;
use crate::events::{Trigger, UiEvent};
use crate::session::SessionStore;
use crate::sync::SyncController;
use crate::view::{ImageSurface, View};

/// A venue container as found in the served markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueMarkup {
    pub id: VenueId,
    /// Venue name, matched by the search box.
    pub name: String,
    /// Raw `data-imgs` attribute of the carousel.
    pub data_imgs: Option<String>,
    /// Current `src` of the carousel's `<img>`.
    pub src: Option<String>,
}

impl VenueMarkup {
    pub fn new(id: VenueId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            data_imgs: None,
            src: None,
        }
    }

    #[must_use]
    pub fn with_images(mut self, data_imgs: impl Into<String>) -> Self {
        self.data_imgs = Some(data_imgs.into());
        self
    }

    #[must_use]
    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }
}

/// The served page, as far as the controllers care.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub venues: Vec<VenueMarkup>,
}

/// The venue page: both controllers plus the wiring between them.
///
/// [`App::dispatch`] is the only entry point for UI events; each event runs
/// exactly one controller operation.
pub struct App<A, V, St>
where
    V: ImageSurface,
{
    view: Arc<V>,
    sync: SyncController<A, V, St>,
    carousel: CarouselController<V>,
    interval: Duration,
    /// Lowercased venue names, in page order.
    venues: Mutex<Vec<(VenueId, String)>>,
}

impl<A, V, St> App<A, V, St>
where
    A: SalonesApi,
    V: View + ImageSurface,
    St: SessionStore,
{
    pub fn new(api: Arc<A>, view: Arc<V>, store: St, config: CarouselConfig) -> Self {
        Self {
            sync: SyncController::new(api, Arc::clone(&view), store),
            carousel: CarouselController::new(Arc::clone(&view), config.fade_delay),
            view,
            interval: config.interval,
            venues: Mutex::new(Vec::new()),
        }
    }

    pub const fn sync(&self) -> &SyncController<A, V, St> {
        &self.sync
    }

    pub const fn carousel(&self) -> &CarouselController<V> {
        &self.carousel
    }

    fn venues(&self) -> MutexGuard<'_, Vec<(VenueId, String)>> {
        self.venues.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wire the served page: admin visibility from the stored flag, and a
    /// running carousel for every venue with at least one image.
    ///
    /// Returns the number of carousels registered. Must run inside a Tokio
    /// runtime, which drives the carousel timers.
    #[instrument(skip_all, fields(venues = page.venues.len()))]
    pub fn bootstrap(&self, page: &Page) -> usize {
        self.sync.apply_session();

        let mut registered = 0;
        let mut venues = self.venues();
        venues.clear();

        for venue in &page.venues {
            venues.push((venue.id, venue.name.to_lowercase()));

            let Some(images) = images_from_markup(venue.data_imgs.as_deref(), venue.src.as_deref())
            else {
                debug!(venue = %venue.id, "Venue without images");
                continue;
            };
            if self.carousel.register(venue.id, images) {
                self.carousel.start_timer(venue.id, self.interval);
                registered += 1;
            }
        }

        info!(carousels = registered, "Page bootstrapped");
        registered
    }

    /// Decode a click and dispatch it.
    ///
    /// # Errors
    ///
    /// Returns an error when the trigger is malformed or the operation fails.
    pub async fn handle(&self, trigger: &Trigger) -> Result<()> {
        let event = UiEvent::try_from(trigger).inspect_err(|err| {
            warn!(action = %trigger.action, error = %err, "Ignoring malformed trigger");
        })?;
        self.dispatch(event).await
    }

    /// Run the operation behind `event`.
    ///
    /// Failures are already shown on the page by the operation; here they
    /// are only logged, so one failing panel leaves the others untouched.
    ///
    /// # Errors
    ///
    /// Returns the operation's error.
    #[instrument(skip_all, fields(event = event.name()))]
    pub async fn dispatch(&self, event: UiEvent) -> Result<()> {
        let result = match event {
            UiEvent::AdminToggle => {
                self.sync.toggle_admin().await;
                Ok(())
            }
            UiEvent::LoginSubmit { username, password } => {
                self.sync.login(&username, password.expose_secret()).await
            }
            UiEvent::OpenModal(modal) => {
                self.view.open_modal(modal);
                Ok(())
            }
            UiEvent::CloseModal(modal) => {
                self.view.close_modal(modal);
                Ok(())
            }
            UiEvent::CommentsOpened(venue) => self.sync.list_comments(venue).await.map(|_| ()),
            UiEvent::CommentSubmit {
                venue,
                author,
                text,
                rating,
            } => self.sync.submit_comment(venue, &author, &text, rating).await,
            UiEvent::DeleteComment { comment, container } => self
                .sync
                .delete_comment(comment, container.as_deref())
                .await
                .map(|_| ()),
            UiEvent::ViewSuggestions => self.sync.list_suggestions().await.map(|_| ()),
            UiEvent::ResolveSuggestion {
                suggestion,
                resolution,
            } => self.sync.resolve_suggestion(suggestion, resolution).await,
            UiEvent::ImagesSelected(count) => self.sync.select_suggestion_images(count),
            UiEvent::SuggestionSubmit(form) => self.sync.submit_suggestion(&form).await,
            UiEvent::DeleteVenue(venue) => self.delete_venue(venue).await.map(|_| ()),
            UiEvent::Carousel { venue, direction } => {
                self.carousel.navigate(venue, direction, self.interval);
                Ok(())
            }
            UiEvent::Search(query) => {
                self.search(&query);
                Ok(())
            }
        };

        if let Err(err) = &result {
            if err.is_client_side() {
                debug!(error = %err, "Event rejected");
            } else {
                warn!(error = %err, "Event failed");
            }
        }
        result
    }

    /// Delete a venue and drop its carousel.
    ///
    /// # Errors
    ///
    /// See [`SyncController::delete_venue`].
    pub async fn delete_venue(&self, venue: VenueId) -> Result<bool> {
        let deleted = self.sync.delete_venue(venue).await?;
        if deleted {
            self.carousel.remove(venue);
            self.venues().retain(|(id, _)| *id != venue);
        }
        Ok(deleted)
    }

    /// Show only venues whose name contains `query`, ignoring case.
    ///
    /// An empty query shows every venue. Returns the number shown.
    pub fn search(&self, query: &str) -> usize {
        let query = query.trim().to_lowercase();
        let venues = self.venues();

        let mut shown = 0;
        for (venue, name) in venues.iter() {
            let visible = name.contains(&query);
            self.view.set_venue_visible(*venue, visible);
            shown += usize::from(visible);
        }
        debug!(shown, "Venues filtered");
        shown
    }
}
