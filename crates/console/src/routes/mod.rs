//! HTTP route handlers for the console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Backend reachability check
//!
//! # Public chat widget
//! GET  /                           - Chat page
//! POST /chat/messages              - Send a chat message (JSON)
//!
//! # Auth
//! GET  /login                      - Login page
//! POST /login                      - Log in against the backend
//! GET  /signup                     - Signup page
//! POST /signup                     - Create an account
//! POST /logout                     - Clear the session
//!
//! # Admin shell (admin role required)
//! GET  /admin/ingest               - Knowledge ingestion forms
//! POST /admin/ingest/text          - Ingest raw text
//! POST /admin/ingest/url           - Ingest a URL
//! POST /admin/ingest/url-distilled - Ingest a URL with distillation
//! POST /admin/ingest/distill-text  - Distill pasted text into facts
//! POST /admin/ingest/pdf           - Ingest a PDF (multipart, 5 MB cap)
//! GET  /admin/playground           - Admin chat playground
//! POST /admin/playground/messages  - Send a playground message (JSON)
//! GET  /admin/menu                 - Menu list and edit form
//! POST /admin/menu/save            - Create or update a menu item
//! POST /admin/menu/{id}/delete     - Delete a menu item
//! GET  /admin/conversations        - Conversations, messages, complaints
//! POST /admin/complaints/{id}/status - Update a complaint status
//! GET  /admin/leads                - Leads captured in the last N days
//! ```

use askama::Template;
use axum::{Router, response::Html};

use crate::state::AppState;

pub mod auth;
pub mod chat;
pub mod conversations;
pub mod ingest;
pub mod leads;
pub mod menu;
pub mod playground;

/// Build the full console router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(chat::router())
        .merge(auth::router())
        .merge(ingest::router())
        .merge(playground::router())
        .merge(menu::router())
        .merge(conversations::router())
        .merge(leads::router())
}

/// Render a template, degrading to a plain error page on failure.
pub(crate) fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_owned()
    }))
}
