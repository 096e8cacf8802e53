//! Integration tests for the Salones client.
//!
//! An in-memory [Axum](axum) rendition of the Salones REST backend, bound to
//! an ephemeral port, so the controllers can be exercised over real HTTP with
//! [`HttpApi`](salones_client::api::HttpApi).
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p salones-integration-tests
//! ```
//!
//! # Backend behaviour
//!
//! - Admin login (`admin` / `admin123`) sets a `session` cookie; moderation
//!   routes answer `403 {"error": "No autorizado"}` without it
//! - Pending suggestions carry `imagenes` as a JSON-encoded string
//! - Failures answer `{"error": ...}`, successes `{"mensaje": ...}`

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Multipart, Path, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::task::JoinHandle;

use salones_client::api::HttpApi;
use salones_client::session::MemorySessionStore;
use salones_client::testing::RecordingView;
use salones_client::{App, ClientConfig, UiEvent};
use salones_core::{Comment, CommentId, Rating, SuggestionId, VenueId};

/// Accepted admin user.
pub const ADMIN_USER: &str = "admin";
/// Accepted admin password.
pub const ADMIN_PASSWORD: &str = "admin123";

const SESSION_COOKIE: &str = "session";

/// A suggestion awaiting moderation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVenue {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub map_url: String,
    pub images: Vec<String>,
}

#[derive(Debug, Default)]
struct Store {
    venues: BTreeMap<i64, String>,
    comments: Vec<Comment>,
    pending: Vec<PendingVenue>,
    sessions: HashSet<String>,
    next_id: i64,
}

impl Store {
    const fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn is_admin(&self, headers: &HeaderMap) -> bool {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().strip_prefix("session="))
            .any(|token| self.sessions.contains(token))
    }
}

/// Shared backend state, also used by tests to seed and inspect data.
#[derive(Debug, Clone, Default)]
pub struct BackendState {
    store: Arc<Mutex<Store>>,
}

impl BackendState {
    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish a venue.
    pub fn add_venue(&self, name: &str) -> VenueId {
        let mut store = self.store();
        let id = store.next_id();
        store.venues.insert(id, name.to_string());
        VenueId::new(id)
    }

    /// Add a comment to a venue.
    ///
    /// # Panics
    ///
    /// Panics if `stars` is outside 1..=5.
    pub fn add_comment(&self, venue: VenueId, author: &str, stars: u8, text: &str) -> CommentId {
        let rating = Rating::try_from(i64::from(stars)).expect("stars between 1 and 5");
        let mut store = self.store();
        let id = CommentId::new(store.next_id());
        store.comments.push(Comment {
            id,
            venue_id: Some(venue),
            author: author.to_string(),
            rating,
            text: text.to_string(),
            timestamp: Some("2025-03-01 18:20:00".to_string()),
        });
        id
    }

    /// Queue a suggestion for moderation.
    pub fn add_pending(&self, name: &str, images: &[&str]) -> SuggestionId {
        let mut store = self.store();
        let id = store.next_id();
        store.pending.push(PendingVenue {
            id,
            name: name.to_string(),
            address: "Av. Buenos Aires, #591".to_string(),
            phone: "+591 62548751".to_string(),
            map_url: "https://maps.app.goo.gl/example".to_string(),
            images: images.iter().map(ToString::to_string).collect(),
        });
        SuggestionId::new(id)
    }

    /// Published venues, by id.
    #[must_use]
    pub fn venues(&self) -> Vec<(VenueId, String)> {
        self.store()
            .venues
            .iter()
            .map(|(id, name)| (VenueId::new(*id), name.clone()))
            .collect()
    }

    /// Stored comments of a venue.
    #[must_use]
    pub fn comments(&self, venue: VenueId) -> Vec<Comment> {
        self.store()
            .comments
            .iter()
            .filter(|comment| comment.venue_id == Some(venue))
            .cloned()
            .collect()
    }

    /// Suggestions awaiting moderation.
    #[must_use]
    pub fn pending(&self) -> Vec<PendingVenue> {
        self.store().pending.clone()
    }

    /// Number of open admin sessions.
    #[must_use]
    pub fn open_sessions(&self) -> usize {
        self.store().sessions.len()
    }
}

// =============================================================================
// Responses
// =============================================================================

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn unauthorized() -> Response {
    error(StatusCode::FORBIDDEN, "No autorizado")
}

fn message(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "mensaje": message }))).into_response()
}

// =============================================================================
// Handlers
// =============================================================================

async fn list_comments(State(state): State<BackendState>, Path(venue): Path<i64>) -> Response {
    let venue = VenueId::new(venue);
    let mut comments = state.comments(venue);
    // Newest first.
    comments.reverse();
    Json(comments).into_response()
}

#[derive(Debug, Deserialize)]
struct CommentBody {
    usuario: Option<String>,
    comentario: Option<String>,
    estrellas: Option<i64>,
}

async fn create_comment(
    State(state): State<BackendState>,
    Path(venue): Path<i64>,
    Json(body): Json<CommentBody>,
) -> Response {
    let author = body.usuario.unwrap_or_default().trim().to_string();
    let text = body.comentario.unwrap_or_default().trim().to_string();
    if author.is_empty() || text.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Nombre y comentario son obligatorios.");
    }
    let Ok(rating) = Rating::try_from(body.estrellas.unwrap_or_default()) else {
        return error(StatusCode::BAD_REQUEST, "Las estrellas deben estar entre 1 y 5.");
    };

    let mut store = state.store();
    if !store.venues.contains_key(&venue) {
        return error(StatusCode::NOT_FOUND, "Salón no existe.");
    }
    let id = CommentId::new(store.next_id());
    store.comments.push(Comment {
        id,
        venue_id: Some(VenueId::new(venue)),
        author,
        rating,
        text,
        timestamp: Some("2025-03-02 10:00:00".to_string()),
    });
    message(StatusCode::CREATED, "Comentario agregado")
}

async fn delete_comment(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Path(comment): Path<i64>,
) -> Response {
    let mut store = state.store();
    if !store.is_admin(&headers) {
        return unauthorized();
    }
    store.comments.retain(|c| c.id != CommentId::new(comment));
    message(StatusCode::OK, "Comentario eliminado")
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    usuario: Option<String>,
    clave: Option<String>,
}

async fn login(State(state): State<BackendState>, Json(body): Json<LoginBody>) -> Response {
    if body.usuario.as_deref() != Some(ADMIN_USER) || body.clave.as_deref() != Some(ADMIN_PASSWORD) {
        return error(StatusCode::UNAUTHORIZED, "Credenciales inválidas");
    }

    let mut store = state.store();
    let token = format!("token-{}", store.next_id());
    store.sessions.insert(token.clone());

    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly");
    (
        [(SET_COOKIE, cookie)],
        Json(json!({ "mensaje": "Login exitoso" })),
    )
        .into_response()
}

async fn logout(State(state): State<BackendState>, headers: HeaderMap) -> Response {
    let mut store = state.store();
    let tokens: Vec<String> = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix("session="))
        .map(str::to_string)
        .collect();
    for token in tokens {
        store.sessions.remove(&token);
    }
    message(StatusCode::OK, "Sesión cerrada")
}

async fn list_pending(State(state): State<BackendState>, headers: HeaderMap) -> Response {
    let store = state.store();
    if !store.is_admin(&headers) {
        return unauthorized();
    }

    let rows: Vec<_> = store
        .pending
        .iter()
        .map(|pending| {
            json!({
                "id": pending.id,
                "nombre": pending.name,
                "direccion": pending.address,
                "telefono": pending.phone,
                "mapa_url": pending.map_url,
                "imagenes": serde_json::to_string(&pending.images).unwrap_or_default(),
                "estado": "pendiente",
            })
        })
        .collect();
    Json(rows).into_response()
}

async fn approve(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let mut store = state.store();
    if !store.is_admin(&headers) {
        return unauthorized();
    }
    let Some(index) = store.pending.iter().position(|p| p.id == id) else {
        return error(StatusCode::NOT_FOUND, "Salón no encontrado");
    };

    let pending = store.pending.remove(index);
    let venue = store.next_id();
    store.venues.insert(venue, pending.name);
    message(StatusCode::OK, "Salón aprobado y publicado.")
}

async fn deny(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let mut store = state.store();
    if !store.is_admin(&headers) {
        return unauthorized();
    }
    let before = store.pending.len();
    store.pending.retain(|p| p.id != id);
    if store.pending.len() == before {
        return error(StatusCode::NOT_FOUND, "Salón no encontrado");
    }
    message(StatusCode::OK, "Salón denegado y eliminado de pendientes.")
}

async fn delete_venue(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let mut store = state.store();
    if !store.is_admin(&headers) {
        return unauthorized();
    }
    if store.venues.remove(&id).is_none() {
        return error(StatusCode::NOT_FOUND, "Salón no encontrado");
    }
    message(StatusCode::OK, "Salón eliminado correctamente")
}

async fn suggest(State(state): State<BackendState>, mut multipart: Multipart) -> Response {
    let (mut name, mut address, mut phone, mut map_url) =
        (String::new(), String::new(), String::new(), String::new());
    let mut images = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return error(StatusCode::BAD_REQUEST, &err.body_text()),
        };

        let field_name = field.name().unwrap_or_default().to_string();
        if field_name == "imagenes" {
            let file_name = field.file_name().unwrap_or_default().replace(' ', "_");
            if field.bytes().await.is_err() {
                return error(StatusCode::BAD_REQUEST, "Imagen ilegible");
            }
            if !file_name.is_empty() {
                images.push(format!("salones/{file_name}"));
            }
            continue;
        }

        let value = field.text().await.unwrap_or_default().trim().to_string();
        match field_name.as_str() {
            "nombre" => name = value,
            "direccion" => address = value,
            "telefono" => phone = value,
            "mapa_url" => map_url = value,
            _ => {}
        }
    }

    if name.is_empty() || address.is_empty() || phone.is_empty() || map_url.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Todos los campos son obligatorios");
    }
    if images.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Debes subir al menos una imagen");
    }
    if images.len() > 3 {
        return error(StatusCode::BAD_REQUEST, "Máximo 3 imágenes");
    }

    let mut store = state.store();
    let id = store.next_id();
    store.pending.push(PendingVenue {
        id,
        name,
        address,
        phone,
        map_url,
        images,
    });
    message(
        StatusCode::CREATED,
        "Sugerencia enviada. Será revisada por el administrador.",
    )
}

/// Create the backend router.
pub fn router(state: BackendState) -> Router {
    Router::new()
        .route(
            "/api/salones/{id}/comentarios",
            get(list_comments).post(create_comment),
        )
        .route("/api/comentarios/{id}", delete(delete_comment))
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout))
        .route("/admin/salones-pendientes", get(list_pending))
        .route("/admin/salones-pendientes/{id}/aceptar", post(approve))
        .route("/admin/salones-pendientes/{id}/denegar", post(deny))
        .route("/admin/salones/{id}/eliminar", post(delete_venue))
        .route("/sugerir", post(suggest))
        .with_state(state)
}

/// The venue page over HTTP, recording what it shows.
pub type PageApp = App<HttpApi, RecordingView, MemorySessionStore>;

/// Login form submission.
#[must_use]
pub fn login_event(username: &str, password: &str) -> UiEvent {
    UiEvent::LoginSubmit {
        username: username.to_string(),
        password: password.to_string().into(),
    }
}

/// A running fake backend. The server stops when this is dropped.
pub struct TestBackend {
    pub base_url: String,
    pub state: BackendState,
    server: JoinHandle<()>,
}

impl TestBackend {
    /// Start a backend on an ephemeral local port.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let state = BackendState::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = router(state.clone());
        let server = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(error = %err, "Fake backend stopped");
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            server,
        }
    }

    /// Client configuration pointing at this backend.
    ///
    /// # Panics
    ///
    /// Panics if the base URL is rejected, which cannot happen for a bound
    /// local address.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig::for_base_url(&self.base_url).expect("valid local base URL")
    }

    /// A page application talking to this backend with the given tab storage.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn page(&self, store: MemorySessionStore) -> (PageApp, Arc<RecordingView>) {
        let config = self.config();
        let api = Arc::new(HttpApi::new(&config).expect("Failed to create HTTP client"));
        let view = Arc::new(RecordingView::new());
        let app = App::new(api, Arc::clone(&view), store, config.carousel);
        (app, view)
    }
}

impl Drop for TestBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}
