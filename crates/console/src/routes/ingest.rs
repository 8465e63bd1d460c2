//! Knowledge ingestion forms.
//!
//! Five independent flows (raw text, URL, URL-distilled, text-distilled,
//! PDF), each one form, one blocking request, one status string. There is no
//! queuing or progress streaming; the page simply re-renders with the
//! outcome of the submitted form.

use askama::Template;
use axum::{
    Form, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use barakah_client::types::{
    DistilledUrlIngest, MAX_PDF_BYTES, PdfUpload, TextDistill, TextIngest, UrlIngest,
};

use crate::middleware::RequireAdminAuth;
use crate::models::UserView;
use crate::routes::render;
use crate::state::AppState;

/// Room for the 5 MB file plus the other multipart fields.
const PDF_BODY_LIMIT: usize = MAX_PDF_BYTES + 64 * 1024;

/// Ingestion page template.
#[derive(Template)]
#[template(path = "ingest/index.html")]
struct IngestPageTemplate {
    user: UserView,
    current_path: String,
    text_status: Option<String>,
    url_status: Option<String>,
    dist_status: Option<String>,
    fact_status: Option<String>,
    pdf_status: Option<String>,
}

impl IngestPageTemplate {
    fn new(user: UserView) -> Self {
        Self {
            user,
            current_path: "/admin/ingest".to_owned(),
            text_status: None,
            url_status: None,
            dist_status: None,
            fact_status: None,
            pdf_status: None,
        }
    }
}

/// Build the ingestion router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/ingest", get(ingest_page))
        .route("/admin/ingest/text", post(ingest_text))
        .route("/admin/ingest/url", post(ingest_url))
        .route("/admin/ingest/url-distilled", post(ingest_url_distilled))
        .route("/admin/ingest/distill-text", post(distill_text))
        .route(
            "/admin/ingest/pdf",
            post(ingest_pdf).layer(DefaultBodyLimit::max(PDF_BODY_LIMIT)),
        )
}

/// Render the ingestion page with no statuses.
///
/// GET /admin/ingest
async fn ingest_page(RequireAdminAuth(user): RequireAdminAuth) -> impl IntoResponse {
    render(&IngestPageTemplate::new(UserView::from(&user)))
}

/// Empty form fields become `None` on the wire.
fn none_if_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// One entity hint per non-empty line.
fn parse_entity_hints(value: &str) -> Option<Vec<String>> {
    let hints: Vec<String> = value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();
    if hints.is_empty() { None } else { Some(hints) }
}

/// Format an ingestion outcome for the status line.
fn outcome(verb: &str, receipt: Option<serde_json::Value>) -> String {
    receipt.map_or_else(|| format!("{verb}."), |value| format!("{verb}: {value}"))
}

/// Raw text ingestion form.
#[derive(Debug, Deserialize)]
pub struct TextIngestForm {
    pub title: String,
    pub source: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub description: String,
    pub text: String,
}

/// Ingest raw text.
///
/// POST /admin/ingest/text
#[instrument(skip(user, state, form))]
async fn ingest_text(
    RequireAdminAuth(user): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<TextIngestForm>,
) -> impl IntoResponse {
    let payload = TextIngest {
        title: form.title,
        source: form.source,
        lang: none_if_empty(form.lang),
        description: none_if_empty(form.description),
        text: form.text,
    };

    let status = match state.backend_for(&user.token).ingest_text(&payload).await {
        Ok(receipt) => outcome("Ingested", receipt),
        Err(e) => e.to_string(),
    };

    let mut template = IngestPageTemplate::new(UserView::from(&user));
    template.text_status = Some(status);
    render(&template)
}

/// URL ingestion form.
#[derive(Debug, Deserialize)]
pub struct UrlIngestForm {
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub description: String,
}

/// Ingest a URL.
///
/// POST /admin/ingest/url
#[instrument(skip(user, state, form))]
async fn ingest_url(
    RequireAdminAuth(user): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<UrlIngestForm>,
) -> impl IntoResponse {
    let payload = UrlIngest {
        url: form.url,
        source: form.source,
        lang: none_if_empty(form.lang),
        description: none_if_empty(form.description),
    };

    let status = match state.backend_for(&user.token).ingest_url(&payload).await {
        Ok(receipt) => outcome("Ingested", receipt),
        Err(e) => e.to_string(),
    };

    let mut template = IngestPageTemplate::new(UserView::from(&user));
    template.url_status = Some(status);
    render(&template)
}

/// Distilled URL ingestion form.
#[derive(Debug, Deserialize)]
pub struct DistilledUrlForm {
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub entity_hints: String,
}

/// Ingest a URL with distillation.
///
/// POST /admin/ingest/url-distilled
#[instrument(skip(user, state, form))]
async fn ingest_url_distilled(
    RequireAdminAuth(user): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<DistilledUrlForm>,
) -> impl IntoResponse {
    let payload = DistilledUrlIngest {
        url: form.url,
        source: form.source,
        lang: none_if_empty(form.lang),
        description: none_if_empty(form.description),
        entity_hints: parse_entity_hints(&form.entity_hints),
    };

    let status = match state
        .backend_for(&user.token)
        .ingest_url_distilled(&payload)
        .await
    {
        Ok(receipt) => outcome("Ingested", receipt),
        Err(e) => e.to_string(),
    };

    let mut template = IngestPageTemplate::new(UserView::from(&user));
    template.dist_status = Some(status);
    render(&template)
}

/// Text distillation form.
#[derive(Debug, Deserialize)]
pub struct TextDistillForm {
    pub text: String,
    pub source: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub entity_hints: String,
}

/// Distill pasted text into structured facts.
///
/// POST /admin/ingest/distill-text
#[instrument(skip(user, state, form))]
async fn distill_text(
    RequireAdminAuth(user): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<TextDistillForm>,
) -> impl IntoResponse {
    let payload = TextDistill {
        text: form.text,
        source: form.source,
        lang: none_if_empty(form.lang),
        description: none_if_empty(form.description),
        entity_hints: parse_entity_hints(&form.entity_hints),
    };

    let status = match state.backend_for(&user.token).distill_text(&payload).await {
        Ok(receipt) => outcome("Distilled", receipt),
        Err(e) => e.to_string(),
    };

    let mut template = IngestPageTemplate::new(UserView::from(&user));
    template.fact_status = Some(status);
    render(&template)
}

/// Collect the browser's multipart fields into a [`PdfUpload`].
///
/// Size and required-field checks happen in [`PdfUpload::validate`] before
/// any upstream request, so a bad upload never leaves the console.
async fn read_pdf_upload(mut multipart: Multipart) -> Result<PdfUpload, String> {
    let mut upload = PdfUpload {
        file_name: String::new(),
        bytes: Vec::new(),
        title: String::new(),
        source: String::new(),
        lang: None,
        description: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Upload failed: {e}"))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "file" => {
                upload.file_name = field
                    .file_name()
                    .map(str::to_owned)
                    .unwrap_or_else(|| "upload.pdf".to_owned());
                upload.bytes = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Upload failed: {e}"))?
                    .to_vec();
            }
            "title" => upload.title = read_text(field).await?,
            "source" => upload.source = read_text(field).await?,
            "lang" => upload.lang = none_if_empty(read_text(field).await?),
            "description" => upload.description = none_if_empty(read_text(field).await?),
            _ => {}
        }
    }

    Ok(upload)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, String> {
    field
        .text()
        .await
        .map_err(|e| format!("Upload failed: {e}"))
}

/// Ingest a PDF file.
///
/// POST /admin/ingest/pdf
#[instrument(skip(user, state, multipart))]
async fn ingest_pdf(
    RequireAdminAuth(user): RequireAdminAuth,
    State(state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let status = match read_pdf_upload(multipart).await {
        Ok(upload) => match state.backend_for(&user.token).ingest_pdf(upload).await {
            Ok(receipt) => outcome("Ingested", receipt),
            Err(e) => e.to_string(),
        },
        Err(message) => message,
    };

    let mut template = IngestPageTemplate::new(UserView::from(&user));
    template.pdf_status = Some(status);
    render(&template)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_if_empty() {
        assert_eq!(none_if_empty("  ".to_owned()), None);
        assert_eq!(none_if_empty(" bn ".to_owned()), Some("bn".to_owned()));
    }

    #[test]
    fn test_entity_hints_one_per_line() {
        let hints = parse_entity_hints("MalishaEdu\n\n  Wuhan University  \n").expect("hints");
        assert_eq!(hints, vec!["MalishaEdu", "Wuhan University"]);
        assert_eq!(parse_entity_hints("\n  \n"), None);
    }

    #[test]
    fn test_outcome_includes_receipt_json() {
        let receipt = serde_json::json!({"chunks": 4});
        assert_eq!(
            outcome("Ingested", Some(receipt)),
            "Ingested: {\"chunks\":4}"
        );
        assert_eq!(outcome("Distilled", None), "Distilled.");
    }
}
