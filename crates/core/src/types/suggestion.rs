//! Venue suggestions awaiting moderation.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::id::SuggestionId;

/// Maximum number of images a visitor may attach to a suggestion.
pub const MAX_SUGGESTION_IMAGES: usize = 3;

/// A visitor-submitted venue, pending until an admin approves or denies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: SuggestionId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "mapa_url", default)]
    pub map_url: Option<String>,
    /// Stored image paths, relative to `/static/`.
    #[serde(rename = "imagenes", default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
}

impl Suggestion {
    /// The map link, if it is an `http(s)` URL safe to render as a link.
    #[must_use]
    pub fn map_link(&self) -> Option<&str> {
        self.map_url
            .as_deref()
            .map(str::trim)
            .filter(|url| url.starts_with("https://") || url.starts_with("http://"))
    }
}

/// The backend stores `imagenes` as a JSON-encoded string, but a JSON array
/// is accepted too. Anything else yields no images.
fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(encoded)) => {
            serde_json::from_str::<Vec<String>>(&encoded).unwrap_or_default()
        }
        Some(array @ serde_json::Value::Array(_)) => {
            serde_json::from_value::<Vec<String>>(array).unwrap_or_default()
        }
        _ => Vec::new(),
    })
}

/// Moderation decision for a pending suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Publish the suggestion as a venue.
    Approve,
    /// Discard the suggestion.
    Deny,
}

impl Resolution {
    /// Path segment used by the backend (`aceptar` / `denegar`).
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Approve => "aceptar",
            Self::Deny => "denegar",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Deny => write!(f, "deny"),
        }
    }
}

impl std::str::FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" | "aceptar" => Ok(Self::Approve),
            "deny" | "denegar" => Ok(Self::Deny),
            _ => Err(format!("invalid resolution: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Suggestion {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_images_from_encoded_string() {
        let s = parse(
            r#"{"id": 2, "nombre": "Burbujas", "direccion": "Av. 1", "telefono": "+591 7",
                "mapa_url": "https://maps.app.goo.gl/x", "imagenes": "[\"salones/a.jpg\",\"salones/b.jpg\"]",
                "estado": "pendiente"}"#,
        );
        assert_eq!(s.images, vec!["salones/a.jpg", "salones/b.jpg"]);
        assert_eq!(s.map_link(), Some("https://maps.app.goo.gl/x"));
    }

    #[test]
    fn test_images_from_array() {
        let s = parse(
            r#"{"id": 2, "nombre": "N", "direccion": "D", "telefono": "T", "imagenes": ["salones/a.jpg"]}"#,
        );
        assert_eq!(s.images, vec!["salones/a.jpg"]);
        assert_eq!(s.map_url, None);
    }

    #[test]
    fn test_images_invalid_or_missing() {
        let bad = parse(r#"{"id": 1, "nombre": "N", "direccion": "D", "telefono": "T", "imagenes": "not json"}"#);
        assert!(bad.images.is_empty());
        let null = parse(r#"{"id": 1, "nombre": "N", "direccion": "D", "telefono": "T", "imagenes": null}"#);
        assert!(null.images.is_empty());
        let number = parse(r#"{"id": 1, "nombre": "N", "direccion": "D", "telefono": "T", "imagenes": 5}"#);
        assert!(number.images.is_empty());
    }

    #[test]
    fn test_map_link_rejects_script_urls() {
        let s = parse(
            r#"{"id": 1, "nombre": "N", "direccion": "D", "telefono": "T", "mapa_url": "javascript:alert(1)"}"#,
        );
        assert_eq!(s.map_link(), None);
    }

    #[test]
    fn test_resolution_path_segment() {
        assert_eq!(Resolution::Approve.path_segment(), "aceptar");
        assert_eq!(Resolution::Deny.path_segment(), "denegar");
        assert_eq!("approve".parse::<Resolution>().unwrap(), Resolution::Approve);
        assert!("maybe".parse::<Resolution>().is_err());
    }
}
