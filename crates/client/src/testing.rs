//! In-memory doubles for the page and the backend.
//!
//! [`RecordingView`] records every page operation so tests can assert on what
//! a user would see; [`FakeApi`] is a stateful backend with scriptable
//! failures and a request log.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use secrecy::ExposeSecret;

use salones_core::{
    Comment, CommentId, NewComment, Resolution, Suggestion, SuggestionId, VenueId,
};

use crate::api::{ApiError, Credentials, SalonesApi, SuggestionForm};
use crate::view::{Content, FormId, ImageSurface, Modal, Tone, View};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// RecordingView
// =============================================================================

/// One recorded page operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    OpenModal(Modal),
    CloseModal(Modal),
    AdminControlsVisible(bool),
    AdminButtonLabel(String),
    FormMessage(FormId, String, Tone),
    ResetForm(FormId),
    ClearFileInput,
    Comments(VenueId, Content),
    Average(VenueId, String),
    Suggestions(Content),
    SuggestionsMessage(String),
    VenueVisible(VenueId, bool),
    RemoveVenue(VenueId),
    Alert(String),
    Confirm(String),
    Reload,
    Opacity(VenueId, f32),
    Source(VenueId, String),
}

/// [`View`] and [`ImageSurface`] that records every call.
#[derive(Debug)]
pub struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
    confirm_answer: AtomicBool,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingView {
    /// A view that answers "yes" to confirmations.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            confirm_answer: AtomicBool::new(true),
        }
    }

    /// Set the answer to future confirmation prompts.
    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    fn record(&self, call: ViewCall) {
        lock(&self.calls).push(call);
    }

    /// Every call so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<ViewCall> {
        lock(&self.calls).clone()
    }

    /// Forget the recorded calls.
    pub fn clear(&self) {
        lock(&self.calls).clear();
    }

    fn last<T>(&self, pick: impl Fn(&ViewCall) -> Option<T>) -> Option<T> {
        lock(&self.calls).iter().rev().find_map(pick)
    }

    /// Latest content of a venue's comment panel.
    #[must_use]
    pub fn comments(&self, venue: VenueId) -> Option<Content> {
        self.last(|call| match call {
            ViewCall::Comments(v, content) if *v == venue => Some(content.clone()),
            _ => None,
        })
    }

    /// Every content a venue's comment panel went through.
    #[must_use]
    pub fn comment_history(&self, venue: VenueId) -> Vec<Content> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                ViewCall::Comments(v, content) if *v == venue => Some(content.clone()),
                _ => None,
            })
            .collect()
    }

    /// Latest average badge of a venue.
    #[must_use]
    pub fn average(&self, venue: VenueId) -> Option<String> {
        self.last(|call| match call {
            ViewCall::Average(v, text) if *v == venue => Some(text.clone()),
            _ => None,
        })
    }

    /// Latest message line of a form.
    #[must_use]
    pub fn form_message(&self, form: FormId) -> Option<(String, Tone)> {
        self.last(|call| match call {
            ViewCall::FormMessage(f, message, tone) if *f == form => Some((message.clone(), *tone)),
            _ => None,
        })
    }

    /// Whether a form was reset.
    #[must_use]
    pub fn was_reset(&self, form: FormId) -> bool {
        lock(&self.calls).contains(&ViewCall::ResetForm(form))
    }

    /// Whether the file input was cleared.
    #[must_use]
    pub fn file_input_cleared(&self) -> bool {
        lock(&self.calls).contains(&ViewCall::ClearFileInput)
    }

    /// Alerts shown, oldest first.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                ViewCall::Alert(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether admin-only controls are currently shown.
    #[must_use]
    pub fn admin_controls_visible(&self) -> bool {
        self.last(|call| match call {
            ViewCall::AdminControlsVisible(visible) => Some(*visible),
            _ => None,
        })
        .unwrap_or(false)
    }

    /// Current admin button label.
    #[must_use]
    pub fn admin_button_label(&self) -> Option<String> {
        self.last(|call| match call {
            ViewCall::AdminButtonLabel(label) => Some(label.clone()),
            _ => None,
        })
    }

    /// Whether a dialog is currently open.
    #[must_use]
    pub fn is_open(&self, modal: Modal) -> bool {
        self.last(|call| match call {
            ViewCall::OpenModal(m) if *m == modal => Some(true),
            ViewCall::CloseModal(m) if *m == modal => Some(false),
            _ => None,
        })
        .unwrap_or(false)
    }

    /// Latest content of the suggestions list.
    #[must_use]
    pub fn suggestions(&self) -> Option<Content> {
        self.last(|call| match call {
            ViewCall::Suggestions(content) => Some(content.clone()),
            _ => None,
        })
    }

    /// Latest suggestions message line.
    #[must_use]
    pub fn suggestions_message(&self) -> Option<String> {
        self.last(|call| match call {
            ViewCall::SuggestionsMessage(message) => Some(message.clone()),
            _ => None,
        })
    }

    /// Whether a venue container is shown. Containers start visible.
    #[must_use]
    pub fn is_venue_visible(&self, venue: VenueId) -> bool {
        self.last(|call| match call {
            ViewCall::VenueVisible(v, visible) if *v == venue => Some(*visible),
            _ => None,
        })
        .unwrap_or(true)
    }

    /// Venue containers removed from the page.
    #[must_use]
    pub fn removed_venues(&self) -> Vec<VenueId> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                ViewCall::RemoveVenue(venue) => Some(*venue),
                _ => None,
            })
            .collect()
    }

    /// Number of page reloads requested.
    #[must_use]
    pub fn reloads(&self) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| matches!(call, ViewCall::Reload))
            .count()
    }

    /// Image sources a carousel showed, oldest first.
    #[must_use]
    pub fn sources(&self, venue: VenueId) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                ViewCall::Source(v, src) if *v == venue => Some(src.clone()),
                _ => None,
            })
            .collect()
    }
}

impl View for RecordingView {
    fn open_modal(&self, modal: Modal) {
        self.record(ViewCall::OpenModal(modal));
    }

    fn close_modal(&self, modal: Modal) {
        self.record(ViewCall::CloseModal(modal));
    }

    fn set_admin_controls_visible(&self, visible: bool) {
        self.record(ViewCall::AdminControlsVisible(visible));
    }

    fn set_admin_button_label(&self, label: &str) {
        self.record(ViewCall::AdminButtonLabel(label.to_string()));
    }

    fn set_form_message(&self, form: FormId, message: &str, tone: Tone) {
        self.record(ViewCall::FormMessage(form, message.to_string(), tone));
    }

    fn reset_form(&self, form: FormId) {
        self.record(ViewCall::ResetForm(form));
    }

    fn clear_file_input(&self) {
        self.record(ViewCall::ClearFileInput);
    }

    fn set_comments(&self, venue: VenueId, content: Content) {
        self.record(ViewCall::Comments(venue, content));
    }

    fn set_average(&self, venue: VenueId, text: &str) {
        self.record(ViewCall::Average(venue, text.to_string()));
    }

    fn set_suggestions(&self, content: Content) {
        self.record(ViewCall::Suggestions(content));
    }

    fn set_suggestions_message(&self, message: &str) {
        self.record(ViewCall::SuggestionsMessage(message.to_string()));
    }

    fn set_venue_visible(&self, venue: VenueId, visible: bool) {
        self.record(ViewCall::VenueVisible(venue, visible));
    }

    fn remove_venue(&self, venue: VenueId) {
        self.record(ViewCall::RemoveVenue(venue));
    }

    fn alert(&self, message: &str) {
        self.record(ViewCall::Alert(message.to_string()));
    }

    fn confirm(&self, message: &str) -> bool {
        self.record(ViewCall::Confirm(message.to_string()));
        self.confirm_answer.load(Ordering::SeqCst)
    }

    fn reload(&self) {
        self.record(ViewCall::Reload);
    }
}

impl ImageSurface for RecordingView {
    fn set_opacity(&self, venue: VenueId, opacity: f32) {
        self.record(ViewCall::Opacity(venue, opacity));
    }

    fn set_source(&self, venue: VenueId, src: &str) {
        self.record(ViewCall::Source(venue, src.to_string()));
    }
}

// =============================================================================
// FakeApi
// =============================================================================

/// Backend operations, for failure scripting and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ListComments,
    CreateComment,
    DeleteComment,
    Login,
    Logout,
    ListSuggestions,
    ResolveSuggestion,
    SubmitSuggestion,
    DeleteVenue,
}

/// One request received by [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListComments(VenueId),
    CreateComment(VenueId, NewComment),
    DeleteComment(CommentId),
    Login { username: String },
    Logout,
    ListSuggestions,
    ResolveSuggestion(SuggestionId, Resolution),
    SubmitSuggestion { name: String, images: usize },
    DeleteVenue(VenueId),
}

impl ApiCall {
    /// The operation this request targets.
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        match self {
            Self::ListComments(_) => Endpoint::ListComments,
            Self::CreateComment(..) => Endpoint::CreateComment,
            Self::DeleteComment(_) => Endpoint::DeleteComment,
            Self::Login { .. } => Endpoint::Login,
            Self::Logout => Endpoint::Logout,
            Self::ListSuggestions => Endpoint::ListSuggestions,
            Self::ResolveSuggestion(..) => Endpoint::ResolveSuggestion,
            Self::SubmitSuggestion { .. } => Endpoint::SubmitSuggestion,
            Self::DeleteVenue(_) => Endpoint::DeleteVenue,
        }
    }
}

#[derive(Debug)]
struct FakeState {
    calls: Vec<ApiCall>,
    comments: HashMap<VenueId, Vec<Comment>>,
    suggestions: Vec<Suggestion>,
    failures: HashMap<Endpoint, ApiError>,
    username: String,
    password: String,
    next_id: i64,
}

/// Stateful in-memory backend.
///
/// Comments and suggestions behave like the real backend; any endpoint can be
/// made to fail with [`FakeApi::fail`].
#[derive(Debug)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeApi {
    /// An empty backend accepting `admin` / `admin`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                calls: Vec::new(),
                comments: HashMap::new(),
                suggestions: Vec::new(),
                failures: HashMap::new(),
                username: "admin".to_string(),
                password: "admin".to_string(),
                next_id: 1000,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        lock(&self.state)
    }

    /// Accept a different admin login.
    #[must_use]
    pub fn with_credentials(self, username: &str, password: &str) -> Self {
        {
            let mut state = self.state();
            state.username = username.to_string();
            state.password = password.to_string();
        }
        self
    }

    /// Seed a venue's comments.
    #[must_use]
    pub fn with_comments(self, venue: VenueId, comments: Vec<Comment>) -> Self {
        self.state().comments.insert(venue, comments);
        self
    }

    /// Seed the pending suggestions.
    #[must_use]
    pub fn with_suggestions(self, suggestions: Vec<Suggestion>) -> Self {
        self.state().suggestions = suggestions;
        self
    }

    /// Make every call to `endpoint` fail with `error`.
    pub fn fail(&self, endpoint: Endpoint, error: ApiError) {
        self.state().failures.insert(endpoint, error);
    }

    /// Stop failing calls to `endpoint`.
    pub fn recover(&self, endpoint: Endpoint) {
        self.state().failures.remove(&endpoint);
    }

    /// Every request so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.state().calls.clone()
    }

    /// Number of requests to `endpoint`.
    #[must_use]
    pub fn calls_to(&self, endpoint: Endpoint) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| call.endpoint() == endpoint)
            .count()
    }

    /// Current comments of a venue.
    #[must_use]
    pub fn comments(&self, venue: VenueId) -> Vec<Comment> {
        self.state().comments.get(&venue).cloned().unwrap_or_default()
    }

    /// Current pending suggestions.
    #[must_use]
    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.state().suggestions.clone()
    }

    /// Log the request and return the scripted failure, if any.
    fn receive(&self, call: ApiCall) -> Result<MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state();
        let endpoint = call.endpoint();
        state.calls.push(call);
        match state.failures.get(&endpoint) {
            Some(error) => Err(error.clone()),
            None => Ok(state),
        }
    }
}

fn not_found(message: &str) -> ApiError {
    ApiError::Server {
        status: 404,
        message: Some(message.to_string()),
    }
}

impl SalonesApi for FakeApi {
    async fn list_comments(&self, venue: VenueId) -> Result<Vec<Comment>, ApiError> {
        let state = self.receive(ApiCall::ListComments(venue))?;
        Ok(state.comments.get(&venue).cloned().unwrap_or_default())
    }

    async fn create_comment(&self, venue: VenueId, comment: &NewComment) -> Result<(), ApiError> {
        let mut state = self.receive(ApiCall::CreateComment(venue, comment.clone()))?;
        state.next_id += 1;
        let id = CommentId::new(state.next_id);
        state.comments.entry(venue).or_default().push(Comment {
            id,
            venue_id: Some(venue),
            author: comment.author.clone(),
            rating: comment.rating,
            text: comment.text.clone(),
            timestamp: Some("2025-01-01 12:00:00".to_string()),
        });
        Ok(())
    }

    async fn delete_comment(&self, comment: CommentId) -> Result<(), ApiError> {
        let mut state = self.receive(ApiCall::DeleteComment(comment))?;
        for comments in state.comments.values_mut() {
            comments.retain(|c| c.id != comment);
        }
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let state = self.receive(ApiCall::Login {
            username: credentials.username.clone(),
        })?;
        if credentials.username == state.username
            && credentials.password.expose_secret() == state.password
        {
            Ok(())
        } else {
            Err(ApiError::Server {
                status: 401,
                message: Some("Credenciales inválidas".to_string()),
            })
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.receive(ApiCall::Logout).map(drop)
    }

    async fn list_suggestions(&self) -> Result<Vec<Suggestion>, ApiError> {
        let state = self.receive(ApiCall::ListSuggestions)?;
        Ok(state.suggestions.clone())
    }

    async fn resolve_suggestion(
        &self,
        suggestion: SuggestionId,
        resolution: Resolution,
    ) -> Result<Option<String>, ApiError> {
        let mut state = self.receive(ApiCall::ResolveSuggestion(suggestion, resolution))?;
        let before = state.suggestions.len();
        state.suggestions.retain(|s| s.id != suggestion);
        if state.suggestions.len() == before {
            return Err(not_found("Salón no encontrado"));
        }
        let message = match resolution {
            Resolution::Approve => "Salón aprobado y publicado.",
            Resolution::Deny => "Salón denegado y eliminado de pendientes.",
        };
        Ok(Some(message.to_string()))
    }

    async fn submit_suggestion(&self, form: &SuggestionForm) -> Result<(), ApiError> {
        let mut state = self.receive(ApiCall::SubmitSuggestion {
            name: form.name.clone(),
            images: form.images.len(),
        })?;
        state.next_id += 1;
        let id = SuggestionId::new(state.next_id);
        state.suggestions.push(Suggestion {
            id,
            name: form.name.clone(),
            address: form.address.clone(),
            phone: form.phone.clone(),
            map_url: Some(form.map_url.clone()).filter(|url| !url.is_empty()),
            images: form
                .images
                .iter()
                .map(|image| format!("salones/{}", image.file_name))
                .collect(),
        });
        Ok(())
    }

    async fn delete_venue(&self, venue: VenueId) -> Result<(), ApiError> {
        let mut state = self.receive(ApiCall::DeleteVenue(venue))?;
        state.comments.remove(&venue);
        Ok(())
    }
}
