//! Menu item management.
//!
//! One page carries the item table and a single create/edit form. Edits are
//! started with `?edit={id}`, which prefills the form from the freshly loaded
//! list rather than trusting anything cached in the browser.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use barakah_client::types::{MenuItem, MenuItemInput};
use barakah_core::{CategoryId, MenuItemId, PriceCny};

use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::UserView;
use crate::routes::render;
use crate::state::AppState;

/// Menu page template.
#[derive(Template)]
#[template(path = "menu/index.html")]
struct MenuPageTemplate {
    user: UserView,
    current_path: String,
    items: Vec<MenuItem>,
    editing: Option<MenuItem>,
    notice: Option<String>,
    error: Option<String>,
}

/// Build the menu router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/menu", get(menu_page))
        .route("/admin/menu/save", post(save_item))
        .route("/admin/menu/{id}/delete", post(delete_item))
}

#[derive(Debug, Deserialize)]
pub struct MenuPageQuery {
    pub notice: Option<String>,
    pub edit: Option<MenuItemId>,
}

/// Render the menu page, optionally prefilling the form for one item.
///
/// GET /admin/menu
#[instrument(skip(user, state))]
async fn menu_page(
    RequireAdminAuth(user): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<MenuPageQuery>,
) -> impl IntoResponse {
    let backend = state.backend_for(&user.token);
    let (items, error) = match backend.menu_items().await {
        Ok(items) => (items, None),
        Err(e) => (Vec::new(), Some(format!("Error loading menu: {e}"))),
    };
    let editing = query
        .edit
        .and_then(|id| items.iter().find(|item| item.id == id).cloned());

    render(&MenuPageTemplate {
        user: UserView::from(&user),
        current_path: "/admin/menu".to_owned(),
        items,
        editing,
        notice: query.notice,
        error,
    })
}

/// Raw create/edit form fields as the browser posts them.
#[derive(Debug, Deserialize)]
pub struct MenuItemForm {
    pub id: Option<MenuItemId>,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub name_bn: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price_cny: String,
    /// Checkbox: present when checked, absent otherwise.
    pub is_available: Option<String>,
    #[serde(default)]
    pub tags: String,
}

/// Turn the raw form into a validated save payload.
///
/// Any parse or required-field failure collapses to the single message the
/// form shows, matching what [`MenuItemInput::validate`] reports.
fn parse_menu_form(form: &MenuItemForm) -> Result<(Option<MenuItemId>, MenuItemInput), String> {
    let invalid = || "Name and valid price are required.".to_owned();

    let price_cny: PriceCny = form.price_cny.trim().parse().map_err(|_| invalid())?;
    let category_id = match form.category_id.trim() {
        "" => None,
        raw => Some(raw.parse::<CategoryId>().map_err(|_| invalid())?),
    };
    let tags: Vec<String> = form
        .tags
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect();

    let input = MenuItemInput {
        category_id,
        name_en: form.name_en.trim().to_owned(),
        name_bn: non_empty(&form.name_bn),
        description: non_empty(&form.description),
        price_cny,
        is_available: form.is_available.is_some(),
        tags: if tags.is_empty() { None } else { Some(tags) },
    };
    input.validate().map_err(|e| e.to_string())?;

    Ok((form.id, input))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Create or update a menu item, then reload the list.
///
/// POST /admin/menu/save
#[instrument(skip(user, state, form))]
async fn save_item(
    RequireAdminAuth(user): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<MenuItemForm>,
) -> axum::response::Response {
    let (id, input) = match parse_menu_form(&form) {
        Ok(parsed) => parsed,
        Err(message) => return error_page(&state, &user, message).await,
    };

    let backend = state.backend_for(&user.token);
    let result = match id {
        Some(id) => backend.update_menu_item(id, &input).await,
        None => backend.create_menu_item(&input).await,
    };

    match result {
        Ok(_) => Redirect::to("/admin/menu?notice=saved").into_response(),
        Err(e) => error_page(&state, &user, format!("Error saving item: {e}")).await,
    }
}

/// Delete a menu item.
///
/// POST /admin/menu/{id}/delete
#[instrument(skip(user, state))]
async fn delete_item(
    RequireAdminAuth(user): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
) -> axum::response::Response {
    match state.backend_for(&user.token).delete_menu_item(id).await {
        Ok(()) => Redirect::to("/admin/menu?notice=deleted").into_response(),
        Err(e) => error_page(&state, &user, format!("Error deleting item: {e}")).await,
    }
}

/// Re-render the page with an error banner, reloading the current list.
async fn error_page(
    state: &AppState,
    user: &crate::models::CurrentUser,
    error: String,
) -> axum::response::Response {
    let items = state
        .backend_for(&user.token)
        .menu_items()
        .await
        .unwrap_or_default();
    render(&MenuPageTemplate {
        user: UserView::from(user),
        current_path: "/admin/menu".to_owned(),
        items,
        editing: None,
        notice: None,
        error: Some(error),
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> MenuItemForm {
        MenuItemForm {
            id: None,
            category_id: String::new(),
            name_en: "Beef Kala Bhuna".to_owned(),
            name_bn: String::new(),
            description: String::new(),
            price_cny: "48".to_owned(),
            is_available: Some("on".to_owned()),
            tags: String::new(),
        }
    }

    #[test]
    fn test_parse_menu_form_minimal() {
        let (id, input) = parse_menu_form(&base_form()).expect("valid form");
        assert_eq!(id, None);
        assert_eq!(input.name_en, "Beef Kala Bhuna");
        assert!(input.is_available);
        assert_eq!(input.category_id, None);
        assert_eq!(input.tags, None);
    }

    #[test]
    fn test_parse_menu_form_splits_tags() {
        let mut form = base_form();
        form.tags = "beef, halal, , spicy".to_owned();
        let (_, input) = parse_menu_form(&form).expect("valid form");
        assert_eq!(
            input.tags,
            Some(vec![
                "beef".to_owned(),
                "halal".to_owned(),
                "spicy".to_owned()
            ])
        );
    }

    #[test]
    fn test_parse_menu_form_rejects_bad_price() {
        let mut form = base_form();
        form.price_cny = "cheap".to_owned();
        let err = parse_menu_form(&form).expect_err("bad price");
        assert_eq!(err, "Name and valid price are required.");
    }

    #[test]
    fn test_parse_menu_form_rejects_missing_name() {
        let mut form = base_form();
        form.name_en = "  ".to_owned();
        let err = parse_menu_form(&form).expect_err("missing name");
        assert_eq!(err, "Name and valid price are required.");
    }

    #[test]
    fn test_edit_form_round_trips_absent_optionals() {
        let item = MenuItem {
            id: barakah_core::MenuItemId::new(7),
            category_id: None,
            name_en: "Beef Kala Bhuna".to_owned(),
            name_bn: None,
            description: None,
            price_cny: "48".parse().expect("price"),
            is_available: true,
            tags: None,
        };
        let template = MenuPageTemplate {
            user: crate::models::UserView {
                username: "admin".to_owned(),
                role: "admin".to_owned(),
            },
            current_path: "/admin/menu".to_owned(),
            items: vec![item.clone()],
            editing: Some(item),
            notice: None,
            error: None,
        };
        let html = template.render().expect("render");

        // Absent optionals prefill empty, so saving unchanged keeps them absent.
        assert!(html.contains(r#"name="name_bn" type="text" value="""#));
        assert!(html.contains(r#"name="description" type="text" value="""#));

        let mut form = base_form();
        form.id = Some(barakah_core::MenuItemId::new(7));
        form.name_bn = String::new();
        form.description = String::new();
        let (_, input) = parse_menu_form(&form).expect("valid form");
        assert_eq!(input.name_bn, None);
        assert_eq!(input.description, None);
    }

    #[test]
    fn test_unchecked_checkbox_means_unavailable() {
        let mut form = base_form();
        form.is_available = None;
        let (_, input) = parse_menu_form(&form).expect("valid form");
        assert!(!input.is_available);
    }
}
