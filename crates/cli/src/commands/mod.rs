//! Command implementations.

pub mod comments;
pub mod suggestions;
pub mod venues;

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::ExposeSecret;
use thiserror::Error;

use salones_client::api::{ApiError, HttpApi};
use salones_client::config::ConfigError;
use salones_client::session::MemorySessionStore;
use salones_client::sync::SyncController;
use salones_client::{ClientConfig, ClientError};

use crate::terminal::TerminalView;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("HTTP client setup failed: {0}")]
    Setup(#[from] ApiError),

    #[error(transparent)]
    Client(#[from] ClientError),

    /// Admin commands need configured credentials.
    #[error("Missing environment variables: SALONES_ADMIN_USER and SALONES_ADMIN_PASSWORD")]
    MissingAdminCredentials,

    #[error("Failed to read {path}: {source}")]
    Image {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Arguments of `salones suggest`.
#[derive(Debug)]
pub struct SuggestArgs {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub map_url: String,
    pub images: Vec<PathBuf>,
}

/// Configuration plus a controller over HTTP.
pub struct Context {
    config: ClientConfig,
    sync: SyncController<HttpApi, TerminalView, MemorySessionStore>,
}

impl Context {
    /// Load configuration from the environment and build the controller.
    pub fn from_env(assume_yes: bool) -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;
        let api = Arc::new(HttpApi::new(&config)?);
        let view = Arc::new(TerminalView::new(assume_yes));
        tracing::debug!(base_url = %config.base_url, "Using backend");

        Ok(Self {
            sync: SyncController::new(api, view, MemorySessionStore::new()),
            config,
        })
    }

    pub const fn sync(&self) -> &SyncController<HttpApi, TerminalView, MemorySessionStore> {
        &self.sync
    }

    /// Log in with the configured admin credentials.
    pub async fn login(&self) -> Result<(), CliError> {
        let admin = self
            .config
            .admin
            .as_ref()
            .ok_or(CliError::MissingAdminCredentials)?;
        self.sync
            .login(&admin.username, admin.password.expose_secret())
            .await?;
        Ok(())
    }
}
