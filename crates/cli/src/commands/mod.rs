//! Command implementations, one module per area.
//!
//! Every command resolves the backend URL from `BACKEND_API_URL` and, where
//! authentication is needed, the bearer token from the session file
//! (`BARAKAH_SESSION_FILE`, default `$HOME/.config/barakah/session.json`).

use barakah_client::{
    BackendClient,
    error::ClientError,
    session::{SessionFile, SessionFileError},
};
use thiserror::Error;
use url::Url;

pub mod auth;
pub mod chat;
pub mod ingest;
pub mod menu;
pub mod review;

/// Environment variable naming the assistant backend.
pub const BACKEND_URL_ENV: &str = "BACKEND_API_URL";

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Backend request failed.
    #[error("{0}")]
    Client(#[from] ClientError),

    /// Session file could not be read or written.
    #[error("{0}")]
    Session(#[from] SessionFileError),

    /// Command needs a session but none is stored.
    #[error("Not logged in. Run `bk-cli login <username>` first.")]
    NotLoggedIn,

    /// `BACKEND_API_URL` is not a valid URL.
    #[error("Invalid {BACKEND_URL_ENV}: {0}")]
    InvalidBackendUrl(#[from] url::ParseError),

    /// Local file access failed (PDF ingest, password prompt).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An unauthenticated client for the configured backend.
pub fn backend() -> Result<BackendClient, CliError> {
    let raw =
        std::env::var(BACKEND_URL_ENV).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_owned());
    Ok(BackendClient::new(Url::parse(&raw)?))
}

/// A client bound to the stored session token.
pub fn authed_backend() -> Result<BackendClient, CliError> {
    let session = SessionFile::from_env()?.load()?;
    let token = session.token.ok_or(CliError::NotLoggedIn)?;
    Ok(backend()?.with_token(token))
}
