//! Application state shared across handlers.

use std::sync::Arc;

use barakah_client::BackendClient;

use crate::config::ConsoleConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    backend: BackendClient,
}

impl AppState {
    /// Build the state from loaded configuration.
    #[must_use]
    pub fn new(config: &ConsoleConfig) -> Self {
        let backend = BackendClient::new(config.backend_url.clone());
        Self {
            inner: Arc::new(AppStateInner { backend }),
        }
    }

    /// The unauthenticated backend client (public chat, auth endpoints).
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// A backend client bound to the given session token.
    #[must_use]
    pub fn backend_for(&self, token: &str) -> BackendClient {
        self.inner.backend.with_token(token)
    }
}
