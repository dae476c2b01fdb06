//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;

/// API-level error type that maps to HTTP responses.
///
/// Every error renders as `{"error": <kind>, "message": <text>}` so
/// clients can branch on the kind without parsing the message.
#[derive(Debug)]
pub enum ApiError {
    /// The payload failed validation.
    Validation(String),
    /// The request body was not valid JSON.
    InvalidJson(String),
    /// A query parameter was invalid.
    InvalidParameter(String),
    /// Resource not found.
    NotFound(String),
    /// Internal server error. `detail` goes to the log, `message` to
    /// the client.
    Internal { message: String, detail: String },
}

impl ApiError {
    /// Maps a domain error onto the wire taxonomy.
    ///
    /// `internal_message` is the client-facing text for backend
    /// failures; the real cause only ever reaches the log.
    pub fn from_domain(err: DomainError, internal_message: &str) -> Self {
        match err {
            DomainError::Validation(msg) => ApiError::Validation(msg),
            DomainError::NotFound(_) => ApiError::NotFound(err.to_string()),
            DomainError::InvalidParameter(msg) => ApiError::InvalidParameter(msg),
            DomainError::Store(_) | DomainError::Channel(_) => ApiError::Internal {
                message: internal_message.to_string(),
                detail: err.to_string(),
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "ValidationError",
            ApiError::InvalidJson(_) => "InvalidJSON",
            ApiError::InvalidParameter(_) => "InvalidParameter",
            ApiError::NotFound(_) => "NotFound",
            ApiError::Internal { .. } => "InternalServerError",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InvalidJson(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InvalidParameter(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal { message, detail } => {
                tracing::error!(error = %detail, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = serde_json::json!({ "error": kind, "message": message });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_validation_maps_to_validation() {
        let err = ApiError::from_domain(
            DomainError::Validation("Items must be a non-empty array".to_string()),
            "Failed to create order",
        );
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn domain_not_found_keeps_its_message() {
        let err = ApiError::from_domain(
            DomainError::NotFound("abc".to_string()),
            "Failed to retrieve order",
        );
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "Order abc not found"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn backend_failures_hide_detail_behind_generic_message() {
        let err = ApiError::from_domain(
            DomainError::Channel(messaging::ChannelError::Publish("boom".to_string())),
            "Failed to create order",
        );
        match err {
            ApiError::Internal { message, detail } => {
                assert_eq!(message, "Failed to create order");
                assert!(detail.contains("boom"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
