//! Public chat widget: page and message endpoint.
//!
//! The transcript lives in the page script only; the server holds no chat
//! state. The backend assigns a conversation id on the first turn, the
//! script echoes it back on every following send, and a reload starts over.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use barakah_client::types::ChatRequest;
use barakah_core::{ConversationId, Domain};

use crate::error::AppError;
use crate::middleware::OptionalAuth;
use crate::models::UserView;
use crate::routes::render;
use crate::state::AppState;

/// Public chat page template.
#[derive(Template)]
#[template(path = "chat/index.html")]
struct ChatPageTemplate {
    user: Option<UserView>,
    domains: &'static [Domain],
}

/// Build the chat router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(chat_page))
        .route("/chat/messages", post(send_message))
}

/// Request from the in-page chat script.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
    pub conversation_id: Option<String>,
    pub domain_override: Option<Domain>,
}

/// Response for the in-page chat script.
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub answer: String,
    pub conversation_id: ConversationId,
    pub used_web: bool,
}

/// Render the public chat page.
///
/// GET /
async fn chat_page(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    let template = ChatPageTemplate {
        user: user.as_ref().map(UserView::from),
        domains: &Domain::ALL,
    };
    render(&template)
}

/// Forward one chat turn to the backend.
///
/// POST /chat/messages
#[instrument(skip(state, request))]
async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("message is required".to_owned()));
    }

    let response = state
        .backend()
        .chat(&ChatRequest {
            message: message.to_owned(),
            conversation_id: request.conversation_id.map(ConversationId::from),
            domain_override: request.domain_override,
        })
        .await?;

    Ok(Json(SendMessageResponse {
        answer: response.answer,
        conversation_id: response.conversation_id,
        used_web: response.used_web,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_accepts_minimal_body() {
        let request: SendMessageRequest =
            serde_json::from_str(r#"{"message": "hello"}"#).expect("deserialize");
        assert_eq!(request.message, "hello");
        assert!(request.conversation_id.is_none());
        assert!(request.domain_override.is_none());
    }

    #[test]
    fn test_send_request_accepts_domain_override() {
        let request: SendMessageRequest = serde_json::from_str(
            r#"{"message": "visa?", "conversation_id": "c-1", "domain_override": "easylink"}"#,
        )
        .expect("deserialize");
        assert_eq!(request.domain_override, Some(Domain::Easylink));
        assert_eq!(request.conversation_id.as_deref(), Some("c-1"));
    }
}
