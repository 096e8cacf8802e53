//! `reqwest` implementation of [`SalonesApi`].

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::{debug, instrument, warn};
use url::Url;

use salones_core::{Comment, CommentId, NewComment, Resolution, Suggestion, SuggestionId, VenueId};

use super::SalonesApi;
use super::error::ApiError;
use super::types::{Credentials, ErrorBody, LoginBody, MessageBody, SuggestionForm};
use crate::config::ClientConfig;

/// HTTP client for the Salones backend.
///
/// Keeps a cookie store so the backend's admin session cookie, set by
/// [`SalonesApi::login`], is replayed on moderation calls.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl std::fmt::Debug for HttpApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApi")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpApi {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Transport(format!("invalid URL for {path}: {e}")))
    }
}

/// Pass successful responses through; turn failures into [`ApiError::Server`]
/// carrying the body's `error` text.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty());

    warn!(status = status.as_u16(), error = ?message, "Backend request failed");

    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}

impl SalonesApi for HttpApi {
    #[instrument(skip(self), fields(venue = %venue))]
    async fn list_comments(&self, venue: VenueId) -> Result<Vec<Comment>, ApiError> {
        let url = self.url(&format!("api/salones/{venue}/comentarios"))?;
        let response = check(self.client.get(url).send().await?).await?;
        let comments: Vec<Comment> = response.json().await.map_err(|e| ApiError::Decode(e.to_string()))?;

        debug!(count = comments.len(), "Comments fetched");
        Ok(comments)
    }

    #[instrument(skip(self, comment), fields(venue = %venue, rating = %comment.rating))]
    async fn create_comment(&self, venue: VenueId, comment: &NewComment) -> Result<(), ApiError> {
        let url = self.url(&format!("api/salones/{venue}/comentarios"))?;
        check(self.client.post(url).json(comment).send().await?).await?;

        debug!("Comment created");
        Ok(())
    }

    #[instrument(skip(self), fields(comment = %comment))]
    async fn delete_comment(&self, comment: CommentId) -> Result<(), ApiError> {
        let url = self.url(&format!("api/comentarios/{comment}"))?;
        check(self.client.delete(url).send().await?).await?;

        debug!("Comment deleted");
        Ok(())
    }

    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let url = self.url("admin/login")?;
        let body = LoginBody {
            usuario: &credentials.username,
            clave: &credentials.password,
        };
        check(self.client.post(url).json(&body).send().await?).await?;

        debug!("Admin login accepted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), ApiError> {
        let url = self.url("admin/logout")?;
        check(self.client.post(url).send().await?).await?;

        debug!("Admin session closed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_suggestions(&self) -> Result<Vec<Suggestion>, ApiError> {
        let url = self.url("admin/salones-pendientes")?;
        let response = check(self.client.get(url).send().await?).await?;
        let suggestions: Vec<Suggestion> =
            response.json().await.map_err(|e| ApiError::Decode(e.to_string()))?;

        debug!(count = suggestions.len(), "Pending suggestions fetched");
        Ok(suggestions)
    }

    #[instrument(skip(self), fields(suggestion = %suggestion, resolution = %resolution))]
    async fn resolve_suggestion(
        &self,
        suggestion: SuggestionId,
        resolution: Resolution,
    ) -> Result<Option<String>, ApiError> {
        let url = self.url(&format!(
            "admin/salones-pendientes/{suggestion}/{}",
            resolution.path_segment()
        ))?;
        let response = check(self.client.post(url).send().await?).await?;
        let body = response.text().await?;
        let message = serde_json::from_str::<MessageBody>(&body)
            .ok()
            .and_then(|b| b.mensaje);

        debug!("Suggestion resolved");
        Ok(message)
    }

    #[instrument(skip(self, form), fields(name = %form.name, images = form.images.len()))]
    async fn submit_suggestion(&self, form: &SuggestionForm) -> Result<(), ApiError> {
        let url = self.url("sugerir")?;

        let mut multipart = Form::new()
            .text("nombre", form.name.clone())
            .text("direccion", form.address.clone())
            .text("telefono", form.phone.clone())
            .text("mapa_url", form.map_url.clone());

        for image in &form.images {
            let part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
            let part = match &image.content_type {
                Some(mime) => part.mime_str(mime)?,
                None => part,
            };
            multipart = multipart.part("imagenes", part);
        }

        check(self.client.post(url).multipart(multipart).send().await?).await?;

        debug!("Suggestion submitted");
        Ok(())
    }

    #[instrument(skip(self), fields(venue = %venue))]
    async fn delete_venue(&self, venue: VenueId) -> Result<(), ApiError> {
        let url = self.url(&format!("admin/salones/{venue}/eliminar"))?;
        check(self.client.post(url).send().await?).await?;

        debug!("Venue deleted");
        Ok(())
    }
}
