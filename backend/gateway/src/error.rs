use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use phyassist_core::{FeedbackEnvelope, TutorError, INTERNAL_ERROR_MESSAGE};
use phyassist_logging::redact_sensitive_data;
use thiserror::Error;

pub const ORIGIN_NOT_ALLOWED_MESSAGE: &str = "Origin not allowed.";
pub const INVALID_JSON_MESSAGE: &str = "Request body is not valid JSON.";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body is too large.";

/// Errors returned to HTTP callers as a `{ error }` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("origin not allowed")]
    OriginNotAllowed,

    #[error("request body too large")]
    PayloadTooLarge,

    /// The caller sees the generic message. The detail is redacted on
    /// construction and recorded by the feedback event log.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(detail: impl AsRef<str>) -> Self {
        ApiError::Internal(redact_sensitive_data(detail.as_ref()))
    }
}

impl From<TutorError> for ApiError {
    fn from(err: TutorError) -> Self {
        match err {
            TutorError::InvalidInput(message) => ApiError::BadRequest(message),
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::OriginNotAllowed => {
                (StatusCode::FORBIDDEN, ORIGIN_NOT_ALLOWED_MESSAGE.to_string())
            }
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                PAYLOAD_TOO_LARGE_MESSAGE.to_string(),
            ),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ),
        };
        (status, Json(FeedbackEnvelope::failure(message))).into_response()
    }
}
