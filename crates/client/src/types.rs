//! Wire types for the assistant backend REST API.
//!
//! The backend owns these entities; the client only transports and displays
//! them. Fields the backend may omit are `Option` or defaulted, and unknown
//! extra fields are ignored on the way in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use barakah_core::{
    CategoryId, ComplaintId, ComplaintStatus, ConversationId, Domain, LeadId, MenuItemId,
    PriceCny, UserId,
};

use crate::error::ClientError;

/// Hard client-side cap on PDF uploads (5 MB).
pub const MAX_PDF_BYTES: usize = 5 * 1024 * 1024;

// =============================================================================
// Auth
// =============================================================================

/// An authenticated user record, cached for session continuity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub username: String,
    pub role: String,
}

impl AuthUser {
    /// True when the user may open the admin shell.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Response of `POST /api/auth/login` and `POST /api/auth/signup`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

// =============================================================================
// Chat
// =============================================================================

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    /// Server-assigned on the first turn and echoed back; omitted until then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<ConversationId>,
    /// Pin the answer to one brand instead of letting the router decide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_override: Option<Domain>,
}

/// Response body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub conversation_id: ConversationId,
    /// Whether the backend augmented the answer with a web search.
    #[serde(default)]
    pub used_web: bool,
}

/// Request body for `POST /api/admin/chat` (playground).
#[derive(Debug, Clone, Serialize)]
pub struct PlaygroundRequest {
    pub message: String,
}

/// Response body of `POST /api/admin/chat`.
///
/// Besides the answer the playground endpoint returns whatever debug fields
/// the backend pipeline produced; they are kept verbatim for display.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaygroundResponse {
    pub answer: String,
    #[serde(flatten)]
    pub debug: serde_json::Map<String, serde_json::Value>,
}

// =============================================================================
// Leads / conversations / complaints
// =============================================================================

/// A prospective customer record captured from a chat interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub created_at: DateTime<Utc>,
    pub domain: String,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub country: Option<String>,
    pub problem_type: Option<String>,
    pub visa_support: Option<bool>,
    pub first_question: Option<String>,
    pub last_question: Option<String>,
    pub age: Option<i64>,
    #[serde(default)]
    pub extra: serde_json::Value,
}

/// Conversation list entry from `GET /api/admin/conversations`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub domain: String,
    pub channel: String,
}

/// One message of a selected conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationMessage {
    pub role: String,
    pub content: String,
    pub domain: Option<String>,
    pub intent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A customer complaint; mutable only via a status transition.
#[derive(Debug, Clone, Deserialize)]
pub struct Complaint {
    pub id: ComplaintId,
    pub status: ComplaintStatus,
    pub summary: String,
}

/// Request body for `POST /api/admin/complaints/{id}/status`.
#[derive(Debug, Clone, Serialize)]
pub struct ComplaintStatusUpdate {
    pub status: ComplaintStatus,
}

// =============================================================================
// Menu
// =============================================================================

/// A menu item as returned by `GET /api/admin/menu_items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub category_id: Option<CategoryId>,
    pub name_en: String,
    pub name_bn: Option<String>,
    pub description: Option<String>,
    pub price_cny: PriceCny,
    pub is_available: bool,
    pub tags: Option<Vec<String>>,
}

/// Create/update payload for a menu item.
#[derive(Debug, Clone, Serialize)]
pub struct MenuItemInput {
    pub category_id: Option<CategoryId>,
    pub name_en: String,
    pub name_bn: Option<String>,
    pub description: Option<String>,
    pub price_cny: PriceCny,
    pub is_available: bool,
    pub tags: Option<Vec<String>>,
}

impl MenuItemInput {
    /// Check required fields before any save request.
    ///
    /// The price is already validated at parse time by [`PriceCny`]; only the
    /// English name remains to check here.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when `name_en` is empty.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.name_en.trim().is_empty() {
            return Err(ClientError::Validation(
                "Name and valid price are required.".to_owned(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Knowledge ingestion
// =============================================================================

/// Payload for `POST /api/admin/ingest_text`.
#[derive(Debug, Clone, Serialize)]
pub struct TextIngest {
    pub title: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub text: String,
}

impl TextIngest {
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when a required field is empty.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.title.trim().is_empty()
            || self.source.trim().is_empty()
            || self.text.trim().is_empty()
        {
            return Err(ClientError::Validation(
                "Title, source and text are required.".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Payload for `POST /api/admin/ingest_url`.
#[derive(Debug, Clone, Serialize)]
pub struct UrlIngest {
    pub url: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UrlIngest {
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when a required field is empty.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.url.trim().is_empty() || self.source.trim().is_empty() {
            return Err(ClientError::Validation(
                "URL and source are required.".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Payload for `POST /api/admin/ingest_url_distilled`.
#[derive(Debug, Clone, Serialize)]
pub struct DistilledUrlIngest {
    pub url: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Entity names to steer the distillation, one per line in the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_hints: Option<Vec<String>>,
}

impl DistilledUrlIngest {
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when a required field is empty.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.url.trim().is_empty() || self.source.trim().is_empty() {
            return Err(ClientError::Validation(
                "URL and source are required.".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Payload for `POST /api/admin/distill_text`.
#[derive(Debug, Clone, Serialize)]
pub struct TextDistill {
    pub text: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_hints: Option<Vec<String>>,
}

impl TextDistill {
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when a required field is empty.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.text.trim().is_empty() || self.source.trim().is_empty() {
            return Err(ClientError::Validation(
                "Text and source are required.".to_owned(),
            ));
        }
        Ok(())
    }
}

/// In-memory PDF upload for `POST /api/admin/ingest_pdf` (multipart).
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub title: String,
    pub source: String,
    pub lang: Option<String>,
    pub description: Option<String>,
}

impl PdfUpload {
    /// Check required fields and the size cap before any upload request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for missing fields or a file over
    /// [`MAX_PDF_BYTES`].
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.bytes.is_empty() || self.title.trim().is_empty() || self.source.trim().is_empty()
        {
            return Err(ClientError::Validation(
                "PDF file, title and source are required.".to_owned(),
            ));
        }
        if self.bytes.len() > MAX_PDF_BYTES {
            return Err(ClientError::Validation(
                "PDF must be less than 5MB.".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_omits_absent_fields() {
        let req = ChatRequest {
            message: "hello".to_owned(),
            conversation_id: None,
            domain_override: None,
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json, serde_json::json!({"message": "hello"}));
    }

    #[test]
    fn test_chat_request_carries_conversation_id_once_known() {
        let req = ChatRequest {
            message: "next".to_owned(),
            conversation_id: Some(ConversationId::new("c-9")),
            domain_override: Some(Domain::Easylink),
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json["conversation_id"], "c-9");
        assert_eq!(json["domain_override"], "easylink");
    }

    #[test]
    fn test_chat_response_defaults_used_web() {
        let res: ChatResponse =
            serde_json::from_str(r#"{"answer": "hi", "conversation_id": "c-1"}"#)
                .expect("deserialize");
        assert!(!res.used_web);
    }

    #[test]
    fn test_playground_response_collects_debug_fields() {
        let res: PlaygroundResponse = serde_json::from_str(
            r#"{"answer": "hi", "intent": "menu", "retrieval_hits": 3}"#,
        )
        .expect("deserialize");
        assert_eq!(res.answer, "hi");
        assert_eq!(res.debug["intent"], "menu");
        assert_eq!(res.debug["retrieval_hits"], 3);
    }

    #[test]
    fn test_lead_tolerates_null_fields() {
        let lead: Lead = serde_json::from_str(
            r#"{
                "id": 5,
                "created_at": "2025-11-02T10:00:00Z",
                "domain": "malisha-edu",
                "name": null,
                "contact": null,
                "country": "Bangladesh",
                "problem_type": null,
                "visa_support": true,
                "first_question": null,
                "last_question": null,
                "age": null,
                "extra": {"campus": "Wuhan"}
            }"#,
        )
        .expect("deserialize");
        assert_eq!(lead.country.as_deref(), Some("Bangladesh"));
        assert_eq!(lead.visa_support, Some(true));
        assert_eq!(lead.extra["campus"], "Wuhan");
    }

    #[test]
    fn test_text_ingest_requires_all_fields() {
        let payload = TextIngest {
            title: "Menu".to_owned(),
            source: "admin".to_owned(),
            lang: None,
            description: None,
            text: "   ".to_owned(),
        };
        let err = payload.validate().expect_err("should fail");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Title, source and text are required.");
    }

    #[test]
    fn test_pdf_over_cap_is_rejected() {
        let upload = PdfUpload {
            file_name: "menu.pdf".to_owned(),
            bytes: vec![0; MAX_PDF_BYTES + 1],
            title: "Menu".to_owned(),
            source: "admin".to_owned(),
            lang: None,
            description: None,
        };
        let err = upload.validate().expect_err("should fail");
        assert_eq!(err.to_string(), "PDF must be less than 5MB.");
    }

    #[test]
    fn test_pdf_at_cap_is_accepted() {
        let upload = PdfUpload {
            file_name: "menu.pdf".to_owned(),
            bytes: vec![0; MAX_PDF_BYTES],
            title: "Menu".to_owned(),
            source: "admin".to_owned(),
            lang: None,
            description: None,
        };
        assert!(upload.validate().is_ok());
    }

    #[test]
    fn test_menu_input_requires_name() {
        let input = MenuItemInput {
            category_id: None,
            name_en: String::new(),
            name_bn: None,
            description: None,
            price_cny: "10".parse().expect("price"),
            is_available: true,
            tags: None,
        };
        assert!(input.validate().is_err());
    }
}
