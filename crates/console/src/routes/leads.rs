//! Captured lead review.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use barakah_client::{client::DEFAULT_LEAD_DAYS, types::Lead};

use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::UserView;
use crate::routes::render;
use crate::state::AppState;

/// Leads page template.
#[derive(Template)]
#[template(path = "leads/index.html")]
struct LeadsPageTemplate {
    user: UserView,
    current_path: String,
    days: u32,
    leads: Vec<Lead>,
    error: Option<String>,
}

/// Build the leads router.
pub fn router() -> Router<AppState> {
    Router::new().route("/admin/leads", get(leads_page))
}

#[derive(Debug, Deserialize)]
pub struct LeadsQuery {
    pub days: Option<u32>,
}

impl LeadsQuery {
    fn days(&self) -> u32 {
        self.days.unwrap_or(DEFAULT_LEAD_DAYS)
    }
}

/// Render the leads captured in the requested window.
///
/// GET /admin/leads
#[instrument(skip(user, state), fields(days = query.days()))]
async fn leads_page(
    RequireAdminAuth(user): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<LeadsQuery>,
) -> impl IntoResponse {
    let days = query.days();
    let (leads, error) = match state.backend_for(&user.token).leads(days).await {
        Ok(leads) => (leads, None),
        Err(e) => (Vec::new(), Some(format!("Error loading leads: {e}"))),
    };

    render(&LeadsPageTemplate {
        user: UserView::from(&user),
        current_path: "/admin/leads".to_owned(),
        days,
        leads,
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_defaults_to_two() {
        assert_eq!(LeadsQuery { days: None }.days(), 2);
        assert_eq!(LeadsQuery { days: Some(30) }.days(), 30);
    }
}
