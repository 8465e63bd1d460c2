//! The backend REST client and its request/response pipeline.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode, header::AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::instrument;
use url::Url;

use barakah_core::{ComplaintId, ComplaintStatus, ConversationId, MenuItemId};

use crate::error::{ClientError, error_detail};
use crate::types::{
    AuthResponse, AuthUser, ChatRequest, ChatResponse, Complaint, ComplaintStatusUpdate,
    ConversationMessage, ConversationSummary, DistilledUrlIngest, Lead, MenuItem, MenuItemInput,
    PdfUpload, PlaygroundRequest, PlaygroundResponse, TextDistill, TextIngest, UrlIngest,
};

/// Default window for the leads list, in days.
pub const DEFAULT_LEAD_DAYS: u32 = 2;

/// Typed client for the assistant backend REST API.
///
/// Cheap to clone; the HTTP connection pool is shared. A clone can be bound
/// to a bearer token with [`BackendClient::with_token`], so one process can
/// serve many user sessions off the same pool.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<ClientInner>,
    token: Option<String>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
}

/// Join a request path onto the configured backend origin.
///
/// Plain string concatenation, so a base URL with a path prefix keeps it
/// (`Url::join` would drop the prefix for absolute paths).
fn endpoint_url(base_url: &Url, path: &str) -> String {
    format!("{}{path}", base_url.as_str().trim_end_matches('/'))
}

impl BackendClient {
    /// Create a client for the given backend origin.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        let http = reqwest::Client::builder()
            .build()
            .expect("Failed to build HTTP client");
        Self {
            inner: Arc::new(ClientInner { http, base_url }),
            token: None,
        }
    }

    /// The configured backend origin.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// A clone of this client bound to a bearer token.
    #[must_use]
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            token: Some(token.into()),
        }
    }

    /// A clone of this client with no token bound.
    #[must_use]
    pub fn without_token(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            token: None,
        }
    }

    /// Start a request, attaching `Authorization: Bearer <token>` when bound.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = endpoint_url(&self.inner.base_url, path);
        let builder = self.inner.http.request(method, url);
        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Execute a request and return the response body, if any.
    ///
    /// Non-2xx responses become [`ClientError::Api`] with the server's
    /// `detail` field (or the HTTP status text). 204 and empty bodies
    /// resolve to `None`.
    async fn read_body(builder: RequestBuilder) -> Result<Option<String>, ClientError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status,
                detail: error_detail(status, &body),
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(body))
    }

    /// Execute a request whose response body the endpoint requires.
    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        match Self::read_body(builder).await? {
            Some(body) => serde_json::from_str(&body)
                .map_err(|e| ClientError::Parse(format!("Failed to parse response: {e}"))),
            None => Err(ClientError::Parse("empty response body".to_owned())),
        }
    }

    /// Execute a request whose response body is optional and opaque.
    ///
    /// An unparseable success body degrades to `None` rather than an error,
    /// matching how the console treats ingestion receipts.
    async fn send_optional<T: DeserializeOwned>(
        builder: RequestBuilder,
    ) -> Result<Option<T>, ClientError> {
        match Self::read_body(builder).await? {
            Some(body) => Ok(serde_json::from_str(&body).ok()),
            None => Ok(None),
        }
    }

    /// Execute a request where only success matters.
    async fn send_unit(builder: RequestBuilder) -> Result<(), ClientError> {
        Self::read_body(builder).await.map(|_| ())
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// `POST /api/auth/login`.
    ///
    /// On success bind the returned token with [`BackendClient::with_token`].
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or credentials are rejected.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<AuthResponse, ClientError> {
        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });
        Self::send(self.request(Method::POST, "/api/auth/login").json(&body)).await
    }

    /// `POST /api/auth/signup`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the username is taken.
    #[instrument(skip(self, password))]
    pub async fn signup(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<AuthResponse, ClientError> {
        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });
        Self::send(self.request(Method::POST, "/api/auth/signup").json(&body)).await
    }

    /// `GET /api/auth/me`.
    ///
    /// # Errors
    ///
    /// Returns an error when the token is missing or rejected.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<AuthUser, ClientError> {
        Self::send(self.request(Method::GET, "/api/auth/me")).await
    }

    // =========================================================================
    // Chat
    // =========================================================================

    /// `POST /api/chat` - the public chat widget endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self, request), fields(has_conversation = request.conversation_id.is_some()))]
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        Self::send(self.request(Method::POST, "/api/chat").json(request)).await
    }

    /// `POST /api/admin/chat` - the admin playground with debug fields.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self, message))]
    pub async fn playground_chat(&self, message: &str) -> Result<PlaygroundResponse, ClientError> {
        let body = PlaygroundRequest {
            message: message.to_owned(),
        };
        Self::send(self.request(Method::POST, "/api/admin/chat").json(&body)).await
    }

    // =========================================================================
    // Leads / conversations / complaints
    // =========================================================================

    /// `GET /api/admin/leads?days=N`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn leads(&self, days: u32) -> Result<Vec<Lead>, ClientError> {
        Self::send(
            self.request(Method::GET, "/api/admin/leads")
                .query(&[("days", days)]),
        )
        .await
    }

    /// `GET /api/admin/conversations`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn conversations(&self) -> Result<Vec<ConversationSummary>, ClientError> {
        Self::send(self.request(Method::GET, "/api/admin/conversations")).await
    }

    /// `GET /api/admin/conversations/{id}/messages`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn conversation_messages(
        &self,
        id: &ConversationId,
    ) -> Result<Vec<ConversationMessage>, ClientError> {
        let path = format!("/api/admin/conversations/{id}/messages");
        Self::send(self.request(Method::GET, &path)).await
    }

    /// `GET /api/admin/complaints`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn complaints(&self) -> Result<Vec<Complaint>, ClientError> {
        Self::send(self.request(Method::GET, "/api/admin/complaints")).await
    }

    /// `POST /api/admin/complaints/{id}/status`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn set_complaint_status(
        &self,
        id: ComplaintId,
        status: ComplaintStatus,
    ) -> Result<(), ClientError> {
        let path = format!("/api/admin/complaints/{id}/status");
        let body = ComplaintStatusUpdate { status };
        Self::send_unit(self.request(Method::POST, &path).json(&body)).await
    }

    // =========================================================================
    // Menu CRUD
    // =========================================================================

    /// `GET /api/admin/menu_items`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn menu_items(&self) -> Result<Vec<MenuItem>, ClientError> {
        Self::send(self.request(Method::GET, "/api/admin/menu_items")).await
    }

    /// `POST /api/admin/menu_items`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any request when the input
    /// is incomplete, or a request error from the backend.
    #[instrument(skip(self, input))]
    pub async fn create_menu_item(&self, input: &MenuItemInput) -> Result<MenuItem, ClientError> {
        input.validate()?;
        Self::send(self.request(Method::POST, "/api/admin/menu_items").json(input)).await
    }

    /// `PUT /api/admin/menu_items/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any request when the input
    /// is incomplete, or a request error from the backend.
    #[instrument(skip(self, input))]
    pub async fn update_menu_item(
        &self,
        id: MenuItemId,
        input: &MenuItemInput,
    ) -> Result<MenuItem, ClientError> {
        input.validate()?;
        let path = format!("/api/admin/menu_items/{id}");
        Self::send(self.request(Method::PUT, &path).json(input)).await
    }

    /// `DELETE /api/admin/menu_items/{id}` (backend answers 204).
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn delete_menu_item(&self, id: MenuItemId) -> Result<(), ClientError> {
        let path = format!("/api/admin/menu_items/{id}");
        Self::send_unit(self.request(Method::DELETE, &path)).await
    }

    // =========================================================================
    // Knowledge ingestion
    // =========================================================================

    /// `POST /api/admin/ingest_text`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any request when a required
    /// field is empty, or a request error from the backend.
    #[instrument(skip(self, payload))]
    pub async fn ingest_text(
        &self,
        payload: &TextIngest,
    ) -> Result<Option<serde_json::Value>, ClientError> {
        payload.validate()?;
        Self::send_optional(self.request(Method::POST, "/api/admin/ingest_text").json(payload))
            .await
    }

    /// `POST /api/admin/ingest_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any request when a required
    /// field is empty, or a request error from the backend.
    #[instrument(skip(self, payload))]
    pub async fn ingest_url(
        &self,
        payload: &UrlIngest,
    ) -> Result<Option<serde_json::Value>, ClientError> {
        payload.validate()?;
        Self::send_optional(self.request(Method::POST, "/api/admin/ingest_url").json(payload))
            .await
    }

    /// `POST /api/admin/ingest_url_distilled`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any request when a required
    /// field is empty, or a request error from the backend.
    #[instrument(skip(self, payload))]
    pub async fn ingest_url_distilled(
        &self,
        payload: &DistilledUrlIngest,
    ) -> Result<Option<serde_json::Value>, ClientError> {
        payload.validate()?;
        Self::send_optional(
            self.request(Method::POST, "/api/admin/ingest_url_distilled")
                .json(payload),
        )
        .await
    }

    /// `POST /api/admin/distill_text`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any request when a required
    /// field is empty, or a request error from the backend.
    #[instrument(skip(self, payload))]
    pub async fn distill_text(
        &self,
        payload: &TextDistill,
    ) -> Result<Option<serde_json::Value>, ClientError> {
        payload.validate()?;
        Self::send_optional(self.request(Method::POST, "/api/admin/distill_text").json(payload))
            .await
    }

    /// `POST /api/admin/ingest_pdf` as multipart form data.
    ///
    /// The form is multipart, so no JSON content-type is forced; reqwest sets
    /// the multipart boundary headers itself.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any request for missing
    /// fields or a file over the 5 MB cap, or a request error from the
    /// backend.
    #[instrument(skip(self, upload), fields(size = upload.bytes.len()))]
    pub async fn ingest_pdf(
        &self,
        upload: PdfUpload,
    ) -> Result<Option<serde_json::Value>, ClientError> {
        upload.validate()?;

        let file = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("title", upload.title)
            .text("source", upload.source)
            .text("lang", upload.lang.unwrap_or_else(|| "en".to_owned()))
            .text("description", upload.description.unwrap_or_default());

        Self::send_optional(
            self.request(Method::POST, "/api/admin/ingest_pdf")
                .multipart(form),
        )
        .await
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Whether the backend origin answers HTTP at all.
    ///
    /// Any response, including an error status, counts as reachable; only a
    /// transport failure does not.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> bool {
        let url = endpoint_url(&self.inner.base_url, "/");
        self.inner.http.get(url).send().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://127.0.0.1:8000").expect("url")
    }

    #[test]
    fn test_endpoint_url_joins_paths() {
        assert_eq!(
            endpoint_url(&base(), "/api/chat"),
            "http://127.0.0.1:8000/api/chat"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_base_path_prefix() {
        let prefixed = Url::parse("http://gateway.local/assistant/").expect("url");
        assert_eq!(
            endpoint_url(&prefixed, "/api/chat"),
            "http://gateway.local/assistant/api/chat"
        );
    }

    #[test]
    fn test_with_token_does_not_affect_original() {
        let client = BackendClient::new(base());
        let bound = client.with_token("tok");
        assert!(client.token.is_none());
        assert_eq!(bound.token.as_deref(), Some("tok"));
        assert!(bound.without_token().token.is_none());
    }

    #[test]
    fn test_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<BackendClient>();
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BackendClient>();
    }

    #[tokio::test]
    async fn test_validation_short_circuits_before_any_request() {
        // Unroutable port: if validation failed to short-circuit, this would
        // surface a transport error instead of the validation message.
        let client = BackendClient::new(base());

        let payload = TextIngest {
            title: String::new(),
            source: "admin".to_owned(),
            lang: None,
            description: None,
            text: "body".to_owned(),
        };
        let err = client.ingest_text(&payload).await.expect_err("should fail");
        assert!(err.is_validation());

        let upload = PdfUpload {
            file_name: "big.pdf".to_owned(),
            bytes: vec![0; crate::types::MAX_PDF_BYTES + 1],
            title: "t".to_owned(),
            source: "s".to_owned(),
            lang: None,
            description: None,
        };
        let err = client.ingest_pdf(upload).await.expect_err("should fail");
        assert_eq!(err.to_string(), "PDF must be less than 5MB.");
    }
}
