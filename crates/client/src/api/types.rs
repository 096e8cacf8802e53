//! Request and response bodies for the Salones backend.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use salones_core::MAX_SUGGESTION_IMAGES;

/// Admin login credentials as typed into the login form.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    /// Build credentials, trimming surrounding whitespace like the login form does.
    #[must_use]
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password: SecretString::from(password.trim().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body of `POST /admin/login`.
#[derive(Serialize)]
pub(crate) struct LoginBody<'a> {
    pub usuario: &'a str,
    #[serde(serialize_with = "serialize_secret")]
    pub clave: &'a SecretString,
}

fn serialize_secret<S: Serializer>(secret: &&SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// An image file picked for a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    /// MIME type reported by the file picker, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// The "suggest a venue" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionForm {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub map_url: String,
    pub images: Vec<ImageUpload>,
}

impl SuggestionForm {
    /// Whether the image selection is within the allowed count.
    #[must_use]
    pub fn images_within_limit(&self) -> bool {
        self.images.len() <= MAX_SUGGESTION_IMAGES
    }
}

/// Error body returned by the backend on failures.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

/// Message body returned by the moderation endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct MessageBody {
    pub mensaje: Option<String>,
}
