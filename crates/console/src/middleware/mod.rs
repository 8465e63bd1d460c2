//! HTTP middleware for the console: sessions and auth extractors.

pub mod auth;
pub mod session;

pub use auth::{OptionalAuth, RequireAdminAuth, clear_current_user, set_current_user};
pub use session::create_session_layer;
