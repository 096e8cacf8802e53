//! Admin session and backend synchronisation.
//!
//! [`SyncController`] owns the admin flag and runs every request/response
//! cycle of the page: login, comments, suggestions and venue deletion. Each
//! operation is a single attempt. It renders its own outcome into the
//! [`View`] and returns `Err` after doing so, so callers only log.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use salones_core::{
    CommentId, MAX_SUGGESTION_IMAGES, NewComment, Rating, RatingSummary, Resolution, SessionState,
    SuggestionId, VenueId, venue_from_container_id,
};

use crate::api::{Credentials, SalonesApi, SuggestionForm};
use crate::error::{ClientError, Result, user_message};
use crate::messages;
use crate::render;
use crate::session::{AdminSession, SessionStore};
use crate::view::{Content, FormId, Modal, Tone, View};

/// Controller for the admin session and every backend cycle.
pub struct SyncController<A, V, St> {
    api: Arc<A>,
    view: Arc<V>,
    session: AdminSession<St>,
}

impl<A, V, St> SyncController<A, V, St>
where
    A: SalonesApi,
    V: View,
    St: SessionStore,
{
    /// Create a controller. A flag already present in `store` is honoured.
    pub const fn new(api: Arc<A>, view: Arc<V>, store: St) -> Self {
        Self {
            api,
            view,
            session: AdminSession::new(store),
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Returns `true` in admin mode.
    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    /// Render the current session state: admin controls and button label.
    pub fn apply_session(&self) {
        let state = self.session.state();
        self.view.set_admin_controls_visible(state.is_admin());
        self.view.set_admin_button_label(state.toggle_label());
    }

    fn enter_admin(&self) {
        self.session.enter_admin();
        self.apply_session();
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Log in as admin.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the login or is
    /// unreachable. The session stays anonymous.
    #[instrument(skip_all)]
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let credentials = Credentials::new(username, password);

        match self.api.login(&credentials).await {
            Ok(()) => {
                self.enter_admin();
                self.view
                    .set_form_message(FormId::Login, messages::LOGIN_GRANTED, Tone::Info);
                self.view.close_modal(Modal::Login);
                info!(username = %credentials.username, "Admin login accepted");
                Ok(())
            }
            Err(err) => {
                let message = user_message(&err, messages::LOGIN_REJECTED, messages::NETWORK_ERROR);
                self.view.set_form_message(FormId::Login, message, Tone::Error);
                warn!(error = %err, "Admin login failed");
                Err(err.into())
            }
        }
    }

    /// Leave admin mode.
    ///
    /// The server session is closed on a best-effort basis; a failure there
    /// is only logged.
    #[instrument(skip_all)]
    pub async fn logout(&self) {
        self.session.clear();
        self.view.reset_form(FormId::Login);
        self.apply_session();
        self.view.open_modal(Modal::Logout);

        if let Err(err) = self.api.logout().await {
            warn!(error = %err, "Server logout failed");
        }
        info!("Admin logged out");
    }

    /// The admin button: log out in admin mode, otherwise open the login dialog.
    pub async fn toggle_admin(&self) {
        if self.session.is_admin() {
            self.logout().await;
        } else {
            self.view.open_modal(Modal::Login);
        }
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// Fetch and render a venue's comments and average rating.
    ///
    /// # Errors
    ///
    /// Returns an error when the fetch or the render fails. The panel then
    /// shows a load-failure message and the average is left unchanged.
    #[instrument(skip(self), fields(venue = %venue))]
    pub async fn list_comments(&self, venue: VenueId) -> Result<RatingSummary> {
        self.view.set_comments(venue, Content::text(messages::LOADING));

        let rendered = match self.api.list_comments(venue).await {
            Ok(comments) => render::comment_list(&comments, self.session.is_admin())
                .map(|content| (content, RatingSummary::from_ratings(comments.iter().map(|c| c.rating))))
                .map_err(ClientError::from),
            Err(err) => Err(err.into()),
        };

        match rendered {
            Ok((content, summary)) => {
                self.view.set_comments(venue, content);
                self.view.set_average(venue, &summary.display());
                debug!(count = summary.count(), "Comments rendered");
                Ok(summary)
            }
            Err(err) => {
                self.view
                    .set_comments(venue, Content::text(messages::COMMENTS_LOAD_FAILED));
                warn!(error = %err, "Failed to load comments");
                Err(err)
            }
        }
    }

    /// Publish a comment, then refresh the venue's panel.
    ///
    /// The refresh completes before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] (without any request) when the
    /// author or text is blank, or [`ClientError::Api`] when the backend
    /// refuses the comment.
    #[instrument(skip(self, author, text), fields(venue = %venue))]
    pub async fn submit_comment(
        &self,
        venue: VenueId,
        author: &str,
        text: &str,
        rating: Rating,
    ) -> Result<()> {
        let form = FormId::Comment(venue);
        let (author, text) = (author.trim(), text.trim());

        if author.is_empty() || text.is_empty() {
            self.view
                .set_form_message(form, messages::COMMENT_REQUIRED_FIELDS, Tone::Error);
            return Err(ClientError::Validation(messages::COMMENT_REQUIRED_FIELDS));
        }

        let comment = NewComment {
            author: author.to_string(),
            text: text.to_string(),
            rating,
        };

        if let Err(err) = self.api.create_comment(venue, &comment).await {
            let message = user_message(&err, messages::COMMENT_SEND_FAILED, messages::NETWORK_ERROR);
            self.view.set_form_message(form, message, Tone::Error);
            warn!(error = %err, "Failed to publish comment");
            return Err(err.into());
        }

        self.view
            .set_form_message(form, messages::COMMENT_ADDED, Tone::Info);
        self.view.reset_form(form);
        info!("Comment published");

        // The refresh shows its own failure; the comment itself was stored.
        let _ = self.list_comments(venue).await;
        Ok(())
    }

    /// Delete a comment and refresh the venue it was shown in.
    ///
    /// `container` is the element id of the enclosing venue container
    /// (`salon-{id}`). Returns the refreshed venue, or `None` when the
    /// container could not be identified.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AdminRequired`] outside admin mode, or
    /// [`ClientError::Api`] when the deletion fails.
    #[instrument(skip(self), fields(comment = %comment))]
    pub async fn delete_comment(
        &self,
        comment: CommentId,
        container: Option<&str>,
    ) -> Result<Option<VenueId>> {
        if !self.session.is_admin() {
            self.view.alert(messages::COMMENT_DELETE_RESTRICTED);
            return Err(ClientError::AdminRequired);
        }

        if let Err(err) = self.api.delete_comment(comment).await {
            let message = user_message(
                &err,
                messages::COMMENT_DELETE_FAILED,
                messages::COMMENT_DELETE_NETWORK,
            );
            self.view.alert(message);
            warn!(error = %err, "Failed to delete comment");
            return Err(err.into());
        }

        info!("Comment deleted");

        let venue = match container.map(venue_from_container_id) {
            Some(Ok(venue)) => venue,
            Some(Err(err)) => {
                warn!(error = %err, "Deleted comment outside a venue container");
                return Ok(None);
            }
            None => {
                warn!("Deleted comment without an enclosing container");
                return Ok(None);
            }
        };

        let _ = self.list_comments(venue).await;
        Ok(Some(venue))
    }

    // =========================================================================
    // Suggestions
    // =========================================================================

    async fn render_suggestions(&self) -> Result<usize> {
        let suggestions = self.api.list_suggestions().await?;
        self.view
            .set_suggestions(render::suggestion_list(&suggestions)?);
        Ok(suggestions.len())
    }

    /// Fetch the pending suggestions and open the review dialog.
    ///
    /// # Errors
    ///
    /// Returns an error when the fetch fails (e.g. the server session has
    /// expired); the dialog's message line shows why.
    #[instrument(skip(self))]
    pub async fn list_suggestions(&self) -> Result<usize> {
        match self.render_suggestions().await {
            Ok(count) => {
                self.view.open_modal(Modal::Suggestions);
                debug!(count, "Pending suggestions rendered");
                Ok(count)
            }
            Err(err) => {
                let message = match &err {
                    ClientError::Api(api) => user_message(
                        api,
                        messages::SUGGESTIONS_UNAUTHORIZED,
                        messages::SUGGESTIONS_NETWORK,
                    ),
                    _ => messages::SUGGESTIONS_NETWORK,
                };
                self.view.set_suggestions_message(message);
                warn!(error = %err, "Failed to load suggestions");
                Err(err)
            }
        }
    }

    /// Approve or deny a pending suggestion.
    ///
    /// On success the list is re-fetched, the page reloads on approval (so
    /// the new venue appears), and the backend's confirmation is shown.
    ///
    /// # Errors
    ///
    /// Returns an error when the decision or the refresh fails.
    #[instrument(skip(self), fields(suggestion = %suggestion, resolution = %resolution))]
    pub async fn resolve_suggestion(
        &self,
        suggestion: SuggestionId,
        resolution: Resolution,
    ) -> Result<()> {
        let confirmation = match self.api.resolve_suggestion(suggestion, resolution).await {
            Ok(confirmation) => confirmation,
            Err(err) => {
                let message = user_message(&err, messages::RESOLVE_FAILED, messages::RESOLVE_NETWORK);
                self.view.set_suggestions_message(message);
                warn!(error = %err, "Failed to resolve suggestion");
                return Err(err.into());
            }
        };

        info!("Suggestion resolved");

        if let Err(err) = self.render_suggestions().await {
            let message = match &err {
                ClientError::Api(api) => {
                    user_message(api, messages::RESOLVE_FAILED, messages::RESOLVE_NETWORK)
                }
                _ => messages::RESOLVE_NETWORK,
            };
            self.view.set_suggestions_message(message);
            warn!(error = %err, "Failed to refresh suggestions");
            return Err(err);
        }

        if resolution == Resolution::Approve {
            self.view.reload();
        }

        self.view.set_suggestions_message(
            confirmation
                .as_deref()
                .unwrap_or(messages::RESOLVE_DONE),
        );
        Ok(())
    }

    /// Check a file-input selection.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when more images are picked than
    /// allowed; the input is cleared and the user alerted.
    pub fn select_suggestion_images(&self, count: usize) -> Result<()> {
        if count > MAX_SUGGESTION_IMAGES {
            self.reject_images(count);
            return Err(ClientError::Validation(messages::TOO_MANY_IMAGES));
        }
        Ok(())
    }

    fn reject_images(&self, count: usize) {
        self.view.alert(messages::TOO_MANY_IMAGES);
        self.view.clear_file_input();
        debug!(count, "Image selection rejected");
    }

    /// Submit the "suggest a venue" form.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] (without any request) for too many
    /// images, or [`ClientError::Api`] when the backend refuses the form.
    #[instrument(skip(self, form), fields(images = form.images.len()))]
    pub async fn submit_suggestion(&self, form: &SuggestionForm) -> Result<()> {
        if !form.images_within_limit() {
            self.reject_images(form.images.len());
            return Err(ClientError::Validation(messages::TOO_MANY_IMAGES));
        }

        match self.api.submit_suggestion(form).await {
            Ok(()) => {
                self.view.set_form_message(
                    FormId::Suggestion,
                    messages::SUGGESTION_SENT,
                    Tone::Info,
                );
                self.view.reset_form(FormId::Suggestion);
                self.view.close_modal(Modal::Suggest);
                info!("Suggestion submitted");
                Ok(())
            }
            Err(err) => {
                let message =
                    user_message(&err, messages::SUGGESTION_SEND_FAILED, messages::NETWORK_ERROR);
                self.view
                    .set_form_message(FormId::Suggestion, message, Tone::Error);
                warn!(error = %err, "Failed to submit suggestion");
                Err(err.into())
            }
        }
    }

    // =========================================================================
    // Venues
    // =========================================================================

    /// Delete a published venue after confirmation.
    ///
    /// Returns `false` when the user declined. On success the venue's
    /// container is removed without reloading the page.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AdminRequired`] outside admin mode, or
    /// [`ClientError::Api`] when the deletion fails.
    #[instrument(skip(self), fields(venue = %venue))]
    pub async fn delete_venue(&self, venue: VenueId) -> Result<bool> {
        if !self.session.is_admin() {
            self.view.alert(messages::VENUE_DELETE_UNAUTHORIZED);
            return Err(ClientError::AdminRequired);
        }

        if !self.view.confirm(messages::VENUE_DELETE_CONFIRM) {
            debug!("Venue deletion declined");
            return Ok(false);
        }

        match self.api.delete_venue(venue).await {
            Ok(()) => {
                self.view.remove_venue(venue);
                self.view.alert(messages::VENUE_DELETED);
                info!("Venue deleted");
                Ok(true)
            }
            Err(err) => {
                let message = user_message(
                    &err,
                    messages::VENUE_DELETE_FAILED,
                    messages::VENUE_DELETE_NETWORK,
                );
                self.view.alert(message);
                warn!(error = %err, "Failed to delete venue");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use salones_core::{Comment, Suggestion};

    use super::*;
    use crate::api::{ApiError, ImageUpload};
    use crate::session::MemorySessionStore;
    use crate::testing::{ApiCall, Endpoint, FakeApi, RecordingView};

    const VENUE: VenueId = VenueId::new(7);

    type Controller = SyncController<FakeApi, RecordingView, MemorySessionStore>;

    fn controller(api: FakeApi) -> (Controller, Arc<FakeApi>, Arc<RecordingView>) {
        let api = Arc::new(api);
        let view = Arc::new(RecordingView::new());
        let sync = SyncController::new(Arc::clone(&api), Arc::clone(&view), MemorySessionStore::new());
        (sync, api, view)
    }

    async fn admin_controller(api: FakeApi) -> (Controller, Arc<FakeApi>, Arc<RecordingView>) {
        let (sync, api, view) = controller(api);
        sync.login("admin", "admin").await.unwrap();
        view.clear();
        (sync, api, view)
    }

    fn comment(id: i64, stars: &str) -> Comment {
        Comment {
            id: CommentId::new(id),
            venue_id: Some(VENUE),
            author: "Ana".to_string(),
            rating: Rating::parse(stars).unwrap(),
            text: "Muy bonito".to_string(),
            timestamp: None,
        }
    }

    fn suggestion(id: i64) -> Suggestion {
        Suggestion {
            id: SuggestionId::new(id),
            name: "Acuarela".to_string(),
            address: "Av. Buenos Aires".to_string(),
            phone: "62548751".to_string(),
            map_url: None,
            images: vec!["salones/SA1.JPG".to_string()],
        }
    }

    fn image(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: Some("image/jpeg".to_string()),
            bytes: vec![0xFF, 0xD8],
        }
    }

    fn network_error() -> ApiError {
        ApiError::Transport("connection refused".to_string())
    }

    // --- session -------------------------------------------------------------

    #[tokio::test]
    async fn test_login_success_enters_admin() {
        let (sync, api, view) = controller(FakeApi::new());

        sync.login("  admin ", " admin").await.unwrap();

        assert!(sync.is_admin());
        assert!(view.admin_controls_visible());
        assert_eq!(view.admin_button_label().as_deref(), Some("Cerrar sesión"));
        assert_eq!(
            view.form_message(FormId::Login),
            Some(("Acceso concedido.".to_string(), Tone::Info))
        );
        assert!(!view.is_open(Modal::Login));
        assert_eq!(api.calls(), vec![ApiCall::Login { username: "admin".to_string() }]);
    }

    #[tokio::test]
    async fn test_login_failure_stays_anonymous() {
        let (sync, _api, view) = controller(FakeApi::new());
        sync.apply_session();

        let err = sync.login("admin", "wrong").await.unwrap_err();

        assert!(matches!(err, ClientError::Api(ApiError::Server { status: 401, .. })));
        assert!(!sync.is_admin());
        assert!(!view.admin_controls_visible());
        assert_eq!(
            view.form_message(FormId::Login),
            Some(("Credenciales inválidas".to_string(), Tone::Error))
        );
    }

    #[tokio::test]
    async fn test_login_failure_fallback_and_network_texts() {
        let (sync, api, view) = controller(FakeApi::new());

        api.fail(Endpoint::Login, ApiError::Server { status: 401, message: None });
        let _ = sync.login("admin", "admin").await;
        assert_eq!(
            view.form_message(FormId::Login).unwrap().0,
            "Credenciales incorrectas."
        );

        api.fail(Endpoint::Login, network_error());
        let _ = sync.login("admin", "admin").await;
        assert_eq!(view.form_message(FormId::Login).unwrap().0, "Error de red.");
        assert!(!sync.is_admin());
    }

    #[tokio::test]
    async fn test_login_accepts_backend_credentials_only() {
        let (sync, _api, _view) = controller(FakeApi::new().with_credentials("gerente", "s3creto"));

        assert!(sync.login("admin", "admin").await.is_err());
        assert!(!sync.is_admin());

        sync.login("gerente", "s3creto").await.unwrap();
        assert!(sync.is_admin());
    }

    #[tokio::test]
    async fn test_logout_returns_to_anonymous() {
        let (sync, api, view) = admin_controller(FakeApi::new()).await;

        sync.toggle_admin().await;

        assert!(!sync.is_admin());
        assert!(!view.admin_controls_visible());
        assert_eq!(view.admin_button_label().as_deref(), Some("Login Admin"));
        assert!(view.was_reset(FormId::Login));
        assert!(view.is_open(Modal::Logout));
        assert_eq!(api.calls_to(Endpoint::Logout), 1);
    }

    #[tokio::test]
    async fn test_logout_server_failure_is_silent() {
        let (sync, api, view) = admin_controller(FakeApi::new()).await;
        api.fail(Endpoint::Logout, network_error());

        sync.logout().await;

        assert!(!sync.is_admin());
        assert!(view.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_when_anonymous_opens_login() {
        let (sync, api, view) = controller(FakeApi::new());

        sync.toggle_admin().await;

        assert!(view.is_open(Modal::Login));
        assert!(api.calls().is_empty());
    }

    // --- comments ------------------------------------------------------------

    #[tokio::test]
    async fn test_list_comments_renders_panel_and_average() {
        let api = FakeApi::new().with_comments(VENUE, vec![comment(1, "5"), comment(2, "3"), comment(3, "4")]);
        let (sync, _api, view) = controller(api);

        let summary = sync.list_comments(VENUE).await.unwrap();

        assert_eq!(summary.count(), 3);
        assert_eq!(view.average(VENUE).as_deref(), Some("4.0"));
        let history = view.comment_history(VENUE);
        assert_eq!(history.first(), Some(&Content::text("Cargando...")));
        assert!(matches!(history.last(), Some(Content::Html(html)) if html.contains("Muy bonito")));
    }

    #[tokio::test]
    async fn test_list_comments_empty() {
        let (sync, _api, view) = controller(FakeApi::new());

        sync.list_comments(VENUE).await.unwrap();

        assert_eq!(view.comments(VENUE), Some(Content::text("Sin comentarios aún.")));
        assert_eq!(view.average(VENUE).as_deref(), Some("Sin calificaciones"));
    }

    #[tokio::test]
    async fn test_list_comments_failure_keeps_average() {
        let (sync, api, view) = controller(FakeApi::new());
        api.fail(Endpoint::ListComments, network_error());

        assert!(sync.list_comments(VENUE).await.is_err());

        assert_eq!(
            view.comments(VENUE),
            Some(Content::text("Error al cargar comentarios."))
        );
        assert_eq!(view.average(VENUE), None);
    }

    #[tokio::test]
    async fn test_list_comments_after_backend_recovers() {
        let api = FakeApi::new().with_comments(VENUE, vec![comment(1, "5")]);
        let (sync, api, view) = controller(api);
        api.fail(Endpoint::ListComments, network_error());
        assert!(sync.list_comments(VENUE).await.is_err());

        api.recover(Endpoint::ListComments);
        sync.list_comments(VENUE).await.unwrap();

        assert!(matches!(view.comments(VENUE), Some(Content::Html(html)) if html.contains("Muy bonito")));
        assert_eq!(view.average(VENUE).as_deref(), Some("5.0"));
    }

    #[tokio::test]
    async fn test_submit_comment_requires_author() {
        let (sync, api, view) = controller(FakeApi::new());
        let rating = Rating::parse("5").unwrap();

        let err = sync.submit_comment(VENUE, "   ", "Hermoso", rating).await.unwrap_err();

        assert!(err.is_client_side());
        assert!(api.calls().is_empty());
        assert_eq!(
            view.form_message(FormId::Comment(VENUE)),
            Some(("Nombre y comentario son obligatorios.".to_string(), Tone::Error))
        );
    }

    #[tokio::test]
    async fn test_submit_comment_refreshes_before_returning() {
        let api = FakeApi::new().with_comments(VENUE, vec![comment(1, "2")]);
        let (sync, api, view) = controller(api);
        let rating = Rating::parse("4").unwrap();

        sync.submit_comment(VENUE, " Luis ", " Excelente ", rating)
            .await
            .unwrap();

        assert_eq!(
            api.calls(),
            vec![
                ApiCall::CreateComment(
                    VENUE,
                    NewComment {
                        author: "Luis".to_string(),
                        text: "Excelente".to_string(),
                        rating,
                    }
                ),
                ApiCall::ListComments(VENUE),
            ]
        );
        assert_eq!(
            view.form_message(FormId::Comment(VENUE)),
            Some(("Comentario agregado.".to_string(), Tone::Info))
        );
        assert!(view.was_reset(FormId::Comment(VENUE)));
        assert_eq!(view.average(VENUE).as_deref(), Some("3.0"));
    }

    #[tokio::test]
    async fn test_submit_comment_server_error_is_shown() {
        let (sync, api, view) = controller(FakeApi::new());
        api.fail(
            Endpoint::CreateComment,
            ApiError::Server {
                status: 404,
                message: Some("Salón no existe.".to_string()),
            },
        );

        let result = sync
            .submit_comment(VENUE, "Ana", "Bien", Rating::parse("3").unwrap())
            .await;

        assert!(result.is_err());
        assert_eq!(
            view.form_message(FormId::Comment(VENUE)).unwrap().0,
            "Salón no existe."
        );
        assert!(!view.was_reset(FormId::Comment(VENUE)));
        assert_eq!(api.calls_to(Endpoint::ListComments), 0);
    }

    #[tokio::test]
    async fn test_submit_comment_network_failure() {
        let (sync, api, view) = controller(FakeApi::new());
        api.fail(Endpoint::CreateComment, network_error());

        let err = sync
            .submit_comment(VENUE, "Ana", "Bien", Rating::parse("3").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Api(ApiError::Transport(_))));
        assert_eq!(
            view.form_message(FormId::Comment(VENUE)),
            Some(("Error de red.".to_string(), Tone::Error))
        );
        assert!(!view.was_reset(FormId::Comment(VENUE)));
        assert_eq!(api.calls_to(Endpoint::ListComments), 0);
    }

    #[tokio::test]
    async fn test_delete_comment_requires_admin() {
        let (sync, api, view) = controller(FakeApi::new());

        let err = sync
            .delete_comment(CommentId::new(1), Some("salon-7"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::AdminRequired));
        assert_eq!(view.alerts(), vec!["Acceso restringido para administradores."]);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_comment_refreshes_enclosing_venue() {
        let api = FakeApi::new().with_comments(VENUE, vec![comment(1, "5"), comment(2, "1")]);
        let (sync, api, view) = admin_controller(api).await;

        let venue = sync
            .delete_comment(CommentId::new(2), Some("salon-7"))
            .await
            .unwrap();

        assert_eq!(venue, Some(VENUE));
        assert_eq!(api.calls_to(Endpoint::ListComments), 1);
        assert_eq!(view.average(VENUE).as_deref(), Some("5.0"));
    }

    #[tokio::test]
    async fn test_delete_comment_with_unknown_container_skips_refresh() {
        let (sync, api, _view) = admin_controller(FakeApi::new()).await;

        let venue = sync
            .delete_comment(CommentId::new(2), Some("sidebar"))
            .await
            .unwrap();

        assert_eq!(venue, None);
        assert_eq!(api.calls_to(Endpoint::ListComments), 0);
    }

    #[tokio::test]
    async fn test_delete_comment_failure_alerts() {
        let (sync, api, view) = admin_controller(FakeApi::new()).await;

        api.fail(Endpoint::DeleteComment, ApiError::Server { status: 500, message: None });
        let _ = sync.delete_comment(CommentId::new(2), Some("salon-7")).await;
        api.fail(Endpoint::DeleteComment, network_error());
        let _ = sync.delete_comment(CommentId::new(2), Some("salon-7")).await;

        assert_eq!(
            view.alerts(),
            vec![
                "No se pudo eliminar el comentario.",
                "Error de red al eliminar el comentario."
            ]
        );
    }

    // --- suggestions ---------------------------------------------------------

    #[tokio::test]
    async fn test_list_suggestions_opens_review() {
        let api = FakeApi::new().with_suggestions(vec![suggestion(1), suggestion(2)]);
        let (sync, _api, view) = admin_controller(api).await;

        assert_eq!(sync.list_suggestions().await.unwrap(), 2);

        assert!(view.is_open(Modal::Suggestions));
        assert!(matches!(view.suggestions(), Some(Content::Html(html)) if html.contains("Acuarela")));
    }

    #[tokio::test]
    async fn test_list_suggestions_unauthorized() {
        let (sync, api, view) = controller(FakeApi::new());
        api.fail(
            Endpoint::ListSuggestions,
            ApiError::Server {
                status: 403,
                message: None,
            },
        );

        assert!(sync.list_suggestions().await.is_err());

        assert_eq!(view.suggestions_message().as_deref(), Some("No autorizado."));
        assert!(!view.is_open(Modal::Suggestions));
    }

    #[tokio::test]
    async fn test_approve_reloads_and_confirms() {
        let api = FakeApi::new().with_suggestions(vec![suggestion(1), suggestion(2)]);
        let (sync, api, view) = admin_controller(api).await;

        sync.resolve_suggestion(SuggestionId::new(1), Resolution::Approve)
            .await
            .unwrap();

        assert_eq!(api.suggestions().len(), 1);
        assert_eq!(api.calls_to(Endpoint::ListSuggestions), 1);
        assert_eq!(view.reloads(), 1);
        assert_eq!(
            view.suggestions_message().as_deref(),
            Some("Salón aprobado y publicado.")
        );
    }

    #[tokio::test]
    async fn test_deny_does_not_reload() {
        let api = FakeApi::new().with_suggestions(vec![suggestion(1)]);
        let (sync, _api, view) = admin_controller(api).await;

        sync.resolve_suggestion(SuggestionId::new(1), Resolution::Deny)
            .await
            .unwrap();

        assert_eq!(view.reloads(), 0);
        assert!(matches!(
            view.suggestions(),
            Some(Content::Html(html)) if html.contains("No hay sugerencias pendientes.")
        ));
    }

    #[tokio::test]
    async fn test_resolve_failure_messages() {
        let (sync, api, view) = admin_controller(FakeApi::new()).await;

        let _ = sync
            .resolve_suggestion(SuggestionId::new(9), Resolution::Deny)
            .await;
        assert_eq!(view.suggestions_message().as_deref(), Some("Salón no encontrado"));

        api.fail(Endpoint::ResolveSuggestion, network_error());
        let _ = sync
            .resolve_suggestion(SuggestionId::new(9), Resolution::Deny)
            .await;
        assert_eq!(view.suggestions_message().as_deref(), Some("Error de red al operar."));
        assert_eq!(api.calls_to(Endpoint::ListSuggestions), 0);
    }

    #[tokio::test]
    async fn test_select_images_over_limit() {
        let (sync, _api, view) = controller(FakeApi::new());

        assert!(sync.select_suggestion_images(3).is_ok());
        assert!(view.alerts().is_empty());

        assert!(sync.select_suggestion_images(4).is_err());
        assert_eq!(view.alerts(), vec!["Solo puedes subir hasta 3 imágenes"]);
        assert!(view.file_input_cleared());
    }

    #[tokio::test]
    async fn test_submit_suggestion_with_four_images_sends_nothing() {
        let (sync, api, view) = controller(FakeApi::new());
        let form = SuggestionForm {
            name: "Acuarela".to_string(),
            images: vec![image("1.jpg"), image("2.jpg"), image("3.jpg"), image("4.jpg")],
            ..SuggestionForm::default()
        };

        let err = sync.submit_suggestion(&form).await.unwrap_err();

        assert!(err.is_client_side());
        assert!(api.calls().is_empty());
        assert!(view.file_input_cleared());
    }

    #[tokio::test]
    async fn test_submit_suggestion_success() {
        let (sync, api, view) = controller(FakeApi::new());
        view.open_modal(Modal::Suggest);
        let form = SuggestionForm {
            name: "Acuarela".to_string(),
            address: "Av. Buenos Aires".to_string(),
            phone: "62548751".to_string(),
            map_url: "https://maps.app.goo.gl/b".to_string(),
            images: vec![image("1.jpg")],
        };

        sync.submit_suggestion(&form).await.unwrap();

        assert_eq!(api.suggestions().len(), 1);
        assert_eq!(
            view.form_message(FormId::Suggestion),
            Some(("Sugerencia enviada correctamente.".to_string(), Tone::Info))
        );
        assert!(view.was_reset(FormId::Suggestion));
        assert!(!view.is_open(Modal::Suggest));
    }

    #[tokio::test]
    async fn test_submit_suggestion_network_failure() {
        let (sync, api, view) = controller(FakeApi::new());
        view.open_modal(Modal::Suggest);
        api.fail(Endpoint::SubmitSuggestion, network_error());
        let form = SuggestionForm {
            name: "Acuarela".to_string(),
            images: vec![image("1.jpg")],
            ..SuggestionForm::default()
        };

        let err = sync.submit_suggestion(&form).await.unwrap_err();

        assert!(matches!(err, ClientError::Api(ApiError::Transport(_))));
        assert_eq!(
            view.form_message(FormId::Suggestion),
            Some(("Error de red.".to_string(), Tone::Error))
        );
        assert!(!view.was_reset(FormId::Suggestion));
        assert!(view.is_open(Modal::Suggest));
        assert!(api.suggestions().is_empty());
    }

    // --- venues --------------------------------------------------------------

    #[tokio::test]
    async fn test_delete_venue_requires_admin() {
        let (sync, api, view) = controller(FakeApi::new());

        assert!(sync.delete_venue(VENUE).await.is_err());
        assert_eq!(view.alerts(), vec!["No autorizado"]);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_venue_declined() {
        let (sync, api, view) = admin_controller(FakeApi::new()).await;
        view.answer_confirm(false);

        assert!(!sync.delete_venue(VENUE).await.unwrap());
        assert_eq!(api.calls_to(Endpoint::DeleteVenue), 0);
        assert!(view.removed_venues().is_empty());
    }

    #[tokio::test]
    async fn test_delete_venue_removes_container() {
        let (sync, _api, view) = admin_controller(FakeApi::new()).await;

        assert!(sync.delete_venue(VENUE).await.unwrap());
        assert_eq!(view.removed_venues(), vec![VENUE]);
        assert_eq!(view.alerts(), vec!["Salón eliminado correctamente"]);
        assert_eq!(view.reloads(), 0);
    }

    #[tokio::test]
    async fn test_delete_venue_network_failure() {
        let (sync, api, view) = admin_controller(FakeApi::new()).await;
        api.fail(Endpoint::DeleteVenue, network_error());

        assert!(sync.delete_venue(VENUE).await.is_err());
        assert_eq!(view.alerts(), vec!["Error de conexión"]);
        assert!(view.removed_venues().is_empty());
    }
}
