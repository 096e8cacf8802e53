//! Image carousels.
//!
//! Each venue container has at most one carousel. Its state (image list,
//! current index, timer handle) is owned by [`CarouselController`] and looked
//! up by venue id; nothing is stored on the element itself.
//!
//! # Transitions
//!
//! Showing an image fades the `<img>` out, swaps its source after the fade
//! delay, then fades it back in. A newer swap aborts a pending one.
//!
//! # Timers
//!
//! The automatic advance is a Tokio task ticking every interval. Starting a
//! timer always aborts the previous one first, and manual navigation steps
//! and restarts it under a single lock. Each timer carries the generation it
//! was started with; a tick that fired before its timer was cancelled sees a
//! newer generation and does nothing, so manual and automatic advances never
//! race. The image surface is only called with the lock released.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, instrument, trace, warn};

use salones_core::{VenueId, static_path};

use crate::view::ImageSurface;

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

/// Index reached from `current` after one step in `direction` over `len` images.
///
/// With zero or one image this is always `0`.
#[must_use]
pub const fn step(current: usize, len: usize, direction: Direction) -> usize {
    if len <= 1 {
        return 0;
    }
    let current = current % len;
    match direction {
        Direction::Forward => (current + 1) % len,
        Direction::Backward => (current + len - 1) % len,
    }
}

/// Read a carousel's image list from its markup.
///
/// `data_imgs` is the JSON array in the `data-imgs` attribute. Blank entries
/// are dropped; when nothing is left, or the attribute is missing or invalid,
/// the `<img>`'s current `src` is the only image. Returns `None` when there
/// is no image at all.
#[must_use]
pub fn images_from_markup(data_imgs: Option<&str>, visible_src: Option<&str>) -> Option<Vec<String>> {
    let images = data_imgs
        .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
        .map(|images| {
            images
                .into_iter()
                .filter(|image| !image.trim().is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|images| !images.is_empty());

    images.or_else(|| {
        visible_src
            .filter(|src| !src.trim().is_empty())
            .map(|src| vec![src.to_string()])
    })
}

struct CarouselState {
    images: Vec<String>,
    current: usize,
    timer: Option<JoinHandle<()>>,
    /// Bumped whenever the timer is cancelled; a tick from an older timer is ignored.
    generation: u64,
    fade: Option<JoinHandle<()>>,
}

impl CarouselState {
    const fn new(images: Vec<String>) -> Self {
        Self {
            images,
            current: 0,
            timer: None,
            generation: 0,
            fade: None,
        }
    }

    fn cancel_timer(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        self.timer.take().is_some_and(|timer| {
            timer.abort();
            true
        })
    }

    fn cancel_all(&mut self) {
        self.cancel_timer();
        if let Some(fade) = self.fade.take() {
            fade.abort();
        }
    }
}

struct Inner<S: ImageSurface> {
    surface: Arc<S>,
    fade_delay: Duration,
    states: Mutex<HashMap<VenueId, CarouselState>>,
}

impl<S: ImageSurface> Inner<S> {
    fn states(&self) -> MutexGuard<'_, HashMap<VenueId, CarouselState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Select `index` (wrapped into range) and schedule its fade.
    ///
    /// The surface is never touched here, only from the fade task. Without a
    /// runtime the source to swap in is returned for [`Self::swap_now`],
    /// to be applied once the states lock is released.
    #[must_use]
    fn show(&self, state: &mut CarouselState, venue: VenueId, index: usize) -> Option<String> {
        let len = state.images.len();
        if len == 0 {
            return None;
        }
        let index = index % len;
        state.current = index;

        let src = state.images.get(index).map(|image| static_path(image))?;

        if let Some(pending) = state.fade.take() {
            pending.abort();
        }
        trace!(venue = %venue, index, "Carousel image set");

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return Some(src);
        };

        let surface = Arc::clone(&self.surface);
        let delay = self.fade_delay;
        state.fade = Some(runtime.spawn(async move {
            surface.set_opacity(venue, 0.0);
            tokio::time::sleep(delay).await;
            surface.set_source(venue, &src);
            surface.set_opacity(venue, 1.0);
        }));
        None
    }

    /// Swap the image without a transition.
    fn swap_now(&self, venue: VenueId, src: Option<String>) {
        if let Some(src) = src {
            self.surface.set_opacity(venue, 0.0);
            self.surface.set_source(venue, &src);
            self.surface.set_opacity(venue, 1.0);
        }
    }

    #[must_use]
    fn step_locked(&self, state: &mut CarouselState, venue: VenueId, direction: Direction) -> Option<String> {
        if state.images.len() <= 1 {
            return None;
        }
        let next = step(state.current, state.images.len(), direction);
        self.show(state, venue, next)
    }

    fn advance(&self, venue: VenueId, direction: Direction) {
        let swap = {
            let mut states = self.states();
            let Some(state) = states.get_mut(&venue) else {
                return;
            };
            self.step_locked(state, venue, direction)
        };
        self.swap_now(venue, swap);
    }

    /// Timer tick. Returns `false` once the timer of `generation` has been
    /// cancelled or its carousel removed.
    fn tick(&self, venue: VenueId, generation: u64) -> bool {
        let swap = {
            let mut states = self.states();
            let Some(state) = states.get_mut(&venue) else {
                return false;
            };
            if state.generation != generation {
                return false;
            }
            self.step_locked(state, venue, Direction::Forward)
        };
        self.swap_now(venue, swap);
        true
    }
}

impl<S: ImageSurface> Drop for Inner<S> {
    fn drop(&mut self) {
        let states = self.states.get_mut().unwrap_or_else(PoisonError::into_inner);
        for state in states.values_mut() {
            state.cancel_all();
        }
    }
}

/// Owner of every carousel on the page.
///
/// Cheaply cloneable; clones share the same carousels.
pub struct CarouselController<S: ImageSurface> {
    inner: Arc<Inner<S>>,
}

impl<S: ImageSurface> Clone for CarouselController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ImageSurface> CarouselController<S> {
    /// Create a controller drawing on `surface`.
    #[must_use]
    pub fn new(surface: Arc<S>, fade_delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                surface,
                fade_delay,
                states: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Register the carousel of `venue`, replacing any previous one.
    ///
    /// The previous carousel's timer is cancelled first. Returns `false`
    /// (and registers nothing) when `images` is empty.
    pub fn register(&self, venue: VenueId, images: Vec<String>) -> bool {
        if images.is_empty() {
            debug!(venue = %venue, "Carousel without images ignored");
            return false;
        }

        let mut states = self.inner.states();
        if let Some(mut previous) = states.remove(&venue) {
            previous.cancel_all();
        }
        states.insert(venue, CarouselState::new(images));
        true
    }

    /// Drop the carousel of a removed container.
    pub fn remove(&self, venue: VenueId) {
        if let Some(mut state) = self.inner.states().remove(&venue) {
            state.cancel_all();
            debug!(venue = %venue, "Carousel removed");
        }
    }

    /// Show image `index`, wrapped into range.
    pub fn set_image(&self, venue: VenueId, index: usize) {
        let swap = {
            let mut states = self.inner.states();
            let Some(state) = states.get_mut(&venue) else {
                return;
            };
            self.inner.show(state, venue, index)
        };
        self.inner.swap_now(venue, swap);
    }

    /// Step one image forward or backward. A no-op with a single image.
    pub fn advance(&self, venue: VenueId, direction: Direction) {
        self.inner.advance(venue, direction);
    }

    /// Advance automatically every `interval`, replacing any running timer.
    ///
    /// Carousels with a single image get no timer.
    #[instrument(skip(self), fields(venue = %venue))]
    pub fn start_timer(&self, venue: VenueId, interval: Duration) {
        let mut states = self.inner.states();
        if let Some(state) = states.get_mut(&venue) {
            self.restart_timer(state, venue, interval);
        }
    }

    /// Cancel the running timer of `state` and schedule a new one.
    /// Must be called with the states lock held.
    fn restart_timer(&self, state: &mut CarouselState, venue: VenueId, interval: Duration) {
        state.cancel_timer();
        if state.images.len() <= 1 || interval.is_zero() {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(venue = %venue, "No async runtime, carousel timer not started");
            return;
        };

        let inner: Weak<Inner<S>> = Arc::downgrade(&self.inner);
        let generation = state.generation;
        state.timer = Some(runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(inner) = inner.upgrade() else {
                    break;
                };
                if !inner.tick(venue, generation) {
                    break;
                }
            }
        }));

        debug!(venue = %venue, interval_ms = interval.as_millis(), "Carousel timer started");
    }

    /// Cancel the automatic advance. Idempotent.
    pub fn stop_timer(&self, venue: VenueId) {
        let mut states = self.inner.states();
        if let Some(state) = states.get_mut(&venue)
            && state.cancel_timer()
        {
            debug!(venue = %venue, "Carousel timer stopped");
        }
    }

    /// Manual navigation from an arrow control: step, then restart the timer.
    ///
    /// Both happen under one lock, so a tick of the old timer cannot land
    /// between them.
    pub fn navigate(&self, venue: VenueId, direction: Direction, interval: Duration) {
        let swap = {
            let mut states = self.inner.states();
            let Some(state) = states.get_mut(&venue) else {
                return;
            };
            let swap = self.inner.step_locked(state, venue, direction);
            self.restart_timer(state, venue, interval);
            swap
        };
        self.inner.swap_now(venue, swap);
    }

    /// Current image index of a carousel.
    #[must_use]
    pub fn current_index(&self, venue: VenueId) -> Option<usize> {
        self.inner.states().get(&venue).map(|state| state.current)
    }

    /// Whether a carousel has a running timer.
    #[must_use]
    pub fn has_timer(&self, venue: VenueId) -> bool {
        self.inner
            .states()
            .get(&venue)
            .and_then(|state| state.timer.as_ref())
            .is_some_and(|timer| !timer.is_finished())
    }

    /// Number of running timers across all carousels.
    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.inner
            .states()
            .values()
            .filter_map(|state| state.timer.as_ref())
            .filter(|timer| !timer.is_finished())
            .count()
    }
}
