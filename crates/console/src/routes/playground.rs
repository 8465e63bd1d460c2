//! Admin chat playground.
//!
//! Same conversation surface as the public widget but against the admin
//! endpoint, which echoes the pipeline's debug fields alongside the answer.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::RequireAdminAuth;
use crate::models::UserView;
use crate::routes::render;
use crate::state::AppState;

/// Playground page template.
#[derive(Template)]
#[template(path = "playground/index.html")]
struct PlaygroundPageTemplate {
    user: UserView,
    current_path: String,
}

/// Build the playground router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/playground", get(playground_page))
        .route("/admin/playground/messages", post(send_message))
}

/// Render the playground page.
///
/// GET /admin/playground
async fn playground_page(RequireAdminAuth(user): RequireAdminAuth) -> impl IntoResponse {
    render(&PlaygroundPageTemplate {
        user: UserView::from(&user),
        current_path: "/admin/playground".to_owned(),
    })
}

#[derive(Debug, Deserialize)]
pub struct PlaygroundMessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct PlaygroundMessageResponse {
    pub answer: String,
    pub debug: serde_json::Map<String, serde_json::Value>,
}

/// Relay a playground message to the backend.
///
/// POST /admin/playground/messages
#[instrument(skip(user, state, request))]
async fn send_message(
    RequireAdminAuth(user): RequireAdminAuth,
    State(state): State<AppState>,
    Json(request): Json<PlaygroundMessageRequest>,
) -> Result<Json<PlaygroundMessageResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("Message must not be empty".to_owned()));
    }

    let response = state
        .backend_for(&user.token)
        .playground_chat(message)
        .await?;

    Ok(Json(PlaygroundMessageResponse {
        answer: response.answer,
        debug: response.debug,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_keeps_debug_fields_nested() {
        let mut debug = serde_json::Map::new();
        debug.insert("intent".to_owned(), serde_json::json!("admission"));
        let body = PlaygroundMessageResponse {
            answer: "ok".to_owned(),
            debug,
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["answer"], "ok");
        assert_eq!(json["debug"]["intent"], "admission");
    }
}
