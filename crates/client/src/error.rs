//! Error types for the backend REST client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the assistant backend.
///
/// Every failure carries a human-readable message; callers render it inline
/// and move on. There is no retry or escalation policy.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failed (unreachable backend, connection reset, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-2xx response.
    #[error("{detail}")]
    Api {
        /// HTTP status code of the response.
        status: StatusCode,
        /// Server-provided `detail` field, or the HTTP status text.
        detail: String,
    },

    /// Failed to parse a response body the endpoint requires.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request payload failed local validation; no request was sent.
    #[error("{0}")]
    Validation(String),
}

impl ClientError {
    /// True when the error came from local validation, i.e. nothing was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// JSON error body shape the backend uses (`{"detail": "..."}`).
#[derive(Debug, serde::Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub detail: Option<String>,
}

/// Extract the error message for a non-2xx response.
///
/// Prefers the `detail` field of a JSON error body; falls back to the HTTP
/// status text when the body is missing, malformed, or has no `detail`.
#[must_use]
pub fn error_detail(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_owned)
    };

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Some(detail),
        }) if !detail.is_empty() => detail,
        _ => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_field_is_surfaced_verbatim() {
        let detail = error_detail(StatusCode::BAD_REQUEST, r#"{"detail": "X"}"#);
        assert_eq!(detail, "X");
    }

    #[test]
    fn test_malformed_body_falls_back_to_status_text() {
        let detail = error_detail(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(detail, "Internal Server Error");
    }

    #[test]
    fn test_empty_detail_falls_back_to_status_text() {
        let detail = error_detail(StatusCode::NOT_FOUND, r#"{"detail": ""}"#);
        assert_eq!(detail, "Not Found");
    }

    #[test]
    fn test_json_without_detail_falls_back() {
        let detail = error_detail(StatusCode::FORBIDDEN, r#"{"error": "nope"}"#);
        assert_eq!(detail, "Forbidden");
    }

    #[test]
    fn test_api_error_display_is_just_the_detail() {
        let err = ClientError::Api {
            status: StatusCode::BAD_REQUEST,
            detail: "title is required".to_owned(),
        };
        assert_eq!(err.to_string(), "title is required");
    }
}
