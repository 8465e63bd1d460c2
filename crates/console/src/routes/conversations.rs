//! Conversation review and complaint triage.
//!
//! One page lists recorded conversations, shows the transcript of the
//! selected one, and lists open complaints with a status selector. Selection
//! travels in the query string so the page stays bookmarkable.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use barakah_client::types::{Complaint, ConversationMessage, ConversationSummary};
use barakah_core::{ComplaintId, ComplaintStatus, ConversationId};

use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::UserView;
use crate::routes::render;
use crate::state::AppState;

/// Conversations page template.
#[derive(Template)]
#[template(path = "conversations/index.html")]
struct ConversationsPageTemplate {
    user: UserView,
    current_path: String,
    conversations: Vec<ConversationSummary>,
    selected: Option<ConversationId>,
    messages: Vec<ConversationMessage>,
    complaints: Vec<Complaint>,
    statuses: &'static [ComplaintStatus],
    conversations_error: Option<String>,
    messages_error: Option<String>,
    complaints_error: Option<String>,
}

/// Build the conversations router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/conversations", get(conversations_page))
        .route("/admin/complaints/{id}/status", post(update_complaint))
}

#[derive(Debug, Deserialize)]
pub struct ConversationsQuery {
    pub selected: Option<ConversationId>,
    pub error: Option<String>,
}

/// Render the conversations page.
///
/// GET /admin/conversations
#[instrument(skip(user, state))]
async fn conversations_page(
    RequireAdminAuth(user): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ConversationsQuery>,
) -> impl IntoResponse {
    let backend = state.backend_for(&user.token);

    let (conversations, conversations_error) = match backend.conversations().await {
        Ok(conversations) => (conversations, None),
        Err(e) => (Vec::new(), Some(format!("Error loading convs: {e}"))),
    };

    let (messages, messages_error) = match &query.selected {
        Some(id) => match backend.conversation_messages(id).await {
            Ok(messages) => (messages, None),
            Err(e) => (Vec::new(), Some(format!("Error loading messages: {e}"))),
        },
        None => (Vec::new(), None),
    };

    let (complaints, complaints_error) = match backend.complaints().await {
        Ok(complaints) => (complaints, None),
        Err(e) => (Vec::new(), Some(format!("Error loading complaints: {e}"))),
    };

    render(&ConversationsPageTemplate {
        user: UserView::from(&user),
        current_path: "/admin/conversations".to_owned(),
        conversations,
        selected: query.selected,
        messages,
        complaints,
        statuses: &ComplaintStatus::ALL,
        conversations_error,
        messages_error,
        complaints_error: query.error.or(complaints_error),
    })
}

#[derive(Debug, Deserialize)]
pub struct ComplaintStatusForm {
    pub status: ComplaintStatus,
    /// Echoed back so the redirect keeps the open transcript.
    pub selected: Option<ConversationId>,
}

/// Move a complaint to a new status, then return to the page.
///
/// POST /admin/complaints/{id}/status
#[instrument(skip(user, state, form), fields(complaint = %id, status = %form.status))]
async fn update_complaint(
    RequireAdminAuth(user): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ComplaintId>,
    Form(form): Form<ComplaintStatusForm>,
) -> Redirect {
    let result = state
        .backend_for(&user.token)
        .set_complaint_status(id, form.status)
        .await;

    let mut target = "/admin/conversations".to_owned();
    let mut sep = '?';
    if let Some(selected) = &form.selected {
        target.push_str(&format!("{sep}selected={selected}"));
        sep = '&';
    }
    if let Err(e) = result {
        tracing::warn!("Complaint update failed: {e}");
        target.push_str(&format!(
            "{sep}error={}",
            urlencode(&format!("Error updating complaint: {e}"))
        ));
    }
    Redirect::to(&target)
}

/// Percent-encode a query-string value.
fn urlencode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencode_spaces_and_colons() {
        assert_eq!(urlencode("Error: no"), "Error%3A+no");
        assert_eq!(urlencode("plain-text_1.0"), "plain-text_1.0");
    }

    #[test]
    fn test_status_form_accepts_wire_names() {
        let form: ComplaintStatusForm =
            serde_json::from_value(serde_json::json!({ "status": "in_progress" }))
                .expect("deserialize");
        assert_eq!(form.status, ComplaintStatus::InProgress);
        assert_eq!(form.selected, None);
    }
}
