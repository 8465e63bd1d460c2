//! Session-scoped models for the console.

use serde::{Deserialize, Serialize};

use barakah_client::types::AuthUser;
use barakah_core::UserId;

/// Session keys used with tower-sessions.
pub mod session_keys {
    /// The logged-in user record plus their backend bearer token.
    pub const CURRENT_USER: &str = "current_user";
}

/// The logged-in user, as stored in the cookie session.
///
/// Carries the backend bearer token so every admin request can be made on
/// the user's behalf; the token never reaches a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    pub role: String,
    pub token: String,
}

impl CurrentUser {
    /// Combine the backend's auth response parts into a session record.
    #[must_use]
    pub fn from_auth(user: AuthUser, token: String) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            token,
        }
    }

    /// True when the user may open the admin shell.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// User fields exposed to templates.
#[derive(Debug, Clone)]
pub struct UserView {
    pub username: String,
    pub role: String,
}

impl From<&CurrentUser> for UserView {
    fn from(user: &CurrentUser) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin_checks_role() {
        let user = CurrentUser {
            id: UserId::new(1),
            username: "amina".to_owned(),
            role: "admin".to_owned(),
            token: "tok".to_owned(),
        };
        assert!(user.is_admin());

        let viewer = CurrentUser {
            role: "viewer".to_owned(),
            ..user
        };
        assert!(!viewer.is_admin());
    }
}
