//! Persisted session state: bearer token plus the cached user record.
//!
//! The backend issues a bearer token at login/signup; the client caches it
//! together with the user record so the console and CLI survive reloads
//! without re-authenticating. There is no refresh, rotation, or expiry
//! handling - a rejected token simply surfaces as a request error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::AuthUser;

/// Environment variable overriding the CLI session file location.
pub const SESSION_FILE_ENV: &str = "BARAKAH_SESSION_FILE";

/// A stored session: token and cached user, both optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<AuthUser>,
}

impl Session {
    /// A logged-in session.
    #[must_use]
    pub fn authenticated(token: String, user: AuthUser) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
        }
    }

    /// True when a token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Errors from reading or writing the session file.
#[derive(Debug, Error)]
pub enum SessionFileError {
    /// Filesystem access failed.
    #[error("session file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored session is not valid JSON.
    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// No explicit path and no home directory to derive one from.
    #[error("cannot locate a session file: set {SESSION_FILE_ENV} or HOME")]
    NoLocation,
}

/// JSON-file persistence for [`Session`], used by the CLI.
///
/// The path comes from `BARAKAH_SESSION_FILE`, falling back to
/// `$HOME/.config/barakah/session.json`.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Resolve the session file location from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SessionFileError::NoLocation`] when neither
    /// `BARAKAH_SESSION_FILE` nor `HOME` is set.
    pub fn from_env() -> Result<Self, SessionFileError> {
        if let Ok(path) = std::env::var(SESSION_FILE_ENV) {
            return Ok(Self { path: path.into() });
        }
        let home = std::env::var("HOME").map_err(|_| SessionFileError::NoLocation)?;
        Ok(Self {
            path: Path::new(&home)
                .join(".config")
                .join("barakah")
                .join("session.json"),
        })
    }

    /// Use an explicit path.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The resolved file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session; a missing file is an empty session.
    ///
    /// # Errors
    ///
    /// Returns an error for unreadable files or corrupt JSON.
    pub fn load(&self) -> Result<Session, SessionFileError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Session::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the session, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn save(&self, session: &Session) -> Result<(), SessionFileError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Delete the stored session (logout). Missing file is fine.
    ///
    /// # Errors
    ///
    /// Returns an error when an existing file cannot be removed.
    pub fn clear(&self) -> Result<(), SessionFileError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barakah_core::UserId;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("barakah-session-test-{name}-{}", std::process::id()))
    }

    #[test]
    fn test_missing_file_is_empty_session() {
        let file = SessionFile::at(temp_path("missing"));
        let session = file.load().expect("load");
        assert!(!session.is_authenticated());
        assert!(session.user.is_none());
    }

    #[test]
    fn test_save_load_clear_roundtrip() {
        let file = SessionFile::at(temp_path("roundtrip"));
        let session = Session::authenticated(
            "tok-123".to_owned(),
            AuthUser {
                id: UserId::new(1),
                username: "admin".to_owned(),
                role: "admin".to_owned(),
            },
        );

        file.save(&session).expect("save");
        let loaded = file.load().expect("load");
        assert_eq!(loaded.token.as_deref(), Some("tok-123"));
        assert_eq!(loaded.user.expect("user").username, "admin");

        file.clear().expect("clear");
        assert!(!file.load().expect("load").is_authenticated());
        // Clearing twice is a no-op.
        file.clear().expect("clear again");
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").expect("write");
        let file = SessionFile::at(&path);
        assert!(matches!(file.load(), Err(SessionFileError::Corrupt(_))));
        std::fs::remove_file(&path).expect("cleanup");
    }
}
