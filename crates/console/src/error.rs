//! Unified error handling for the console.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use barakah_client::ClientError;

/// Application-level error type for JSON endpoints.
///
/// Page handlers mostly catch backend errors themselves and render the
/// message inline; this type serves the JSON chat endpoints, where the
/// in-page script expects a `detail` field just like the backend's own
/// error bodies.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend request failed.
    #[error("{0}")]
    Backend(#[from] ClientError),

    /// Session storage failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Bad request from the browser.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Report infrastructure failures, not user input problems
        if matches!(
            self,
            Self::Session(_) | Self::Backend(ClientError::Http(_) | ClientError::Parse(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Console request error"
            );
        }

        let status = match &self {
            Self::Backend(ClientError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Backend(ClientError::Api { status, .. }) => StatusCode::from_u16(status.as_u16())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let detail = match &self {
            Self::Session(_) => "Internal server error".to_owned(),
            other => other.to_string(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_api_detail_is_the_message() {
        let err = AppError::Backend(ClientError::Api {
            status: StatusCode::NOT_FOUND,
            detail: "no such conversation".to_owned(),
        });
        assert_eq!(err.to_string(), "no such conversation");
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = AppError::Backend(ClientError::Validation(
            "Title, source and text are required.".to_owned(),
        ));
        assert_eq!(err.to_string(), "Title, source and text are required.");
    }
}
