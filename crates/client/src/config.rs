//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SALONES_BASE_URL` - Backend URL (default: <http://127.0.0.1:5000>)
//! - `SALONES_CAROUSEL_INTERVAL_MS` - Carousel auto-advance period (default: 4000)
//! - `SALONES_FADE_DELAY_MS` - Delay between fade-out and image swap (default: 160)
//! - `SALONES_REQUEST_TIMEOUT_SECS` - HTTP transport timeout (default: 30)
//! - `SALONES_ADMIN_USER` - Admin username used by the CLI
//! - `SALONES_ADMIN_PASSWORD` - Admin password used by the CLI

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_CAROUSEL_INTERVAL_MS: u64 = 4000;
const DEFAULT_FADE_DELAY_MS: u64 = 160;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, always ending in `/`
    pub base_url: Url,
    /// Timing of the image carousels
    pub carousel: CarouselConfig,
    /// Transport timeout for a single request
    pub request_timeout: Duration,
    /// Admin credentials, when configured
    pub admin: Option<AdminCredentials>,
}

/// Carousel timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    /// Period of the automatic advance
    pub interval: Duration,
    /// Delay between fading out and swapping the image
    pub fade_delay: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_CAROUSEL_INTERVAL_MS),
            fade_delay: Duration::from_millis(DEFAULT_FADE_DELAY_MS),
        }
    }
}

/// Admin login credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if only
    /// one of the admin credential variables is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration pointing at `base_url` with default timings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("SALONES_BASE_URL", base_url)?,
            carousel: CarouselConfig::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            admin: None,
        })
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("SALONES_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_base_url("SALONES_BASE_URL", &base_url)?;

        let carousel = CarouselConfig {
            interval: Duration::from_millis(get_u64_or_default(
                &lookup,
                "SALONES_CAROUSEL_INTERVAL_MS",
                DEFAULT_CAROUSEL_INTERVAL_MS,
            )?),
            fade_delay: Duration::from_millis(get_u64_or_default(
                &lookup,
                "SALONES_FADE_DELAY_MS",
                DEFAULT_FADE_DELAY_MS,
            )?),
        };
        if carousel.interval.is_zero() {
            return Err(ConfigError::InvalidEnvVar(
                "SALONES_CAROUSEL_INTERVAL_MS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let request_timeout = Duration::from_secs(get_u64_or_default(
            &lookup,
            "SALONES_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);

        let admin = match (lookup("SALONES_ADMIN_USER"), lookup("SALONES_ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(AdminCredentials {
                username,
                password: SecretString::from(password),
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::MissingEnvVar(
                    "SALONES_ADMIN_PASSWORD".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingEnvVar("SALONES_ADMIN_USER".to_string()));
            }
        };

        Ok(Self {
            base_url,
            carousel,
            request_timeout,
            admin,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a base URL, making sure relative joins keep its path.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Get an integer variable with a default value.
fn get_u64_or_default<F>(lookup: &F, key: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
