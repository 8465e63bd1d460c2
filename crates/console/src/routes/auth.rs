//! Authentication route handlers.
//!
//! The console holds no credentials itself; login and signup pass straight
//! through to the backend's auth endpoints and cache the returned token and
//! user record in the cookie session.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::render;
use crate::state::AppState;

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    error: Option<String>,
    username: String,
}

/// Signup page template.
#[derive(Template)]
#[template(path = "auth/signup.html")]
struct SignupPageTemplate {
    error: Option<String>,
    username: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/signup", get(signup_page).post(signup))
        .route("/logout", post(logout))
}

/// Username/password form shared by login and signup.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Render the login page.
///
/// GET /login
async fn login_page() -> impl IntoResponse {
    render(&LoginPageTemplate {
        error: None,
        username: String::new(),
    })
}

/// Log in against the backend and store the session.
///
/// POST /login
#[instrument(skip(state, session, form))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> impl IntoResponse {
    let username = form.username.trim().to_owned();
    let password = form.password.trim().to_owned();

    if username.is_empty() || password.is_empty() {
        return render(&LoginPageTemplate {
            error: Some("Please enter username and password.".to_owned()),
            username,
        })
        .into_response();
    }

    match state
        .backend()
        .login(&username, &SecretString::from(password))
        .await
    {
        Ok(auth) => {
            let user = CurrentUser::from_auth(auth.user, auth.token);
            let destination = if user.is_admin() { "/admin/ingest" } else { "/" };
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to store session: {e}");
                return render(&LoginPageTemplate {
                    error: Some("Could not start a session, please retry.".to_owned()),
                    username,
                })
                .into_response();
            }
            Redirect::to(destination).into_response()
        }
        Err(e) => render(&LoginPageTemplate {
            error: Some(e.to_string()),
            username,
        })
        .into_response(),
    }
}

/// Render the signup page.
///
/// GET /signup
async fn signup_page() -> impl IntoResponse {
    render(&SignupPageTemplate {
        error: None,
        username: String::new(),
    })
}

/// Create an account against the backend and store the session.
///
/// POST /signup
#[instrument(skip(state, session, form))]
async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> impl IntoResponse {
    let username = form.username.trim().to_owned();
    let password = form.password.trim().to_owned();

    if username.is_empty() || password.is_empty() {
        return render(&SignupPageTemplate {
            error: Some("Please enter username and password.".to_owned()),
            username,
        })
        .into_response();
    }

    match state
        .backend()
        .signup(&username, &SecretString::from(password))
        .await
    {
        Ok(auth) => {
            let user = CurrentUser::from_auth(auth.user, auth.token);
            let destination = if user.is_admin() { "/admin/ingest" } else { "/" };
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to store session: {e}");
                return render(&SignupPageTemplate {
                    error: Some("Could not start a session, please retry.".to_owned()),
                    username,
                })
                .into_response();
            }
            Redirect::to(destination).into_response()
        }
        Err(e) => render(&SignupPageTemplate {
            error: Some(e.to_string()),
            username,
        })
        .into_response(),
    }
}

/// Log out and clear the session.
///
/// POST /logout
async fn logout(session: Session) -> impl IntoResponse {
    let _ = clear_current_user(&session).await;
    Redirect::to("/")
}
