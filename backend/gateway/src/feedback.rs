//! `POST /api/feedback`

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use phyassist_core::{FeedbackEnvelope, FeedbackPayload, TutorError, MISSING_FIELDS_MESSAGE};
use phyassist_logging::{EventLogger, FeedbackEvent};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::error::{ApiError, INVALID_JSON_MESSAGE};
use crate::server::GatewayState;

/// Validates the payload, asks the tutor, and returns its text verbatim.
pub async fn post_feedback(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<FeedbackEnvelope>, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    let span = info_span!("feedback", request_id = %request_id);
    let payload = parse_payload(&headers, body)?;
    handle(state, payload, &request_id).instrument(span).await
}

/// Decodes the body into a payload, answering every rejection with an
/// `{ error }` envelope.
///
/// A body that is not declared as JSON, or is empty, reads as a payload with
/// no fields. JSON with fields of the wrong type is treated the same way.
fn parse_payload(
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<FeedbackPayload, ApiError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    })?;

    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(FeedbackPayload::default());
    }

    serde_json::from_slice(&body).map_err(|e| {
        if e.is_data() {
            ApiError::BadRequest(MISSING_FIELDS_MESSAGE.to_string())
        } else {
            ApiError::BadRequest(INVALID_JSON_MESSAGE.to_string())
        }
    })
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

async fn handle(
    state: GatewayState,
    payload: FeedbackPayload,
    request_id: &str,
) -> Result<Json<FeedbackEnvelope>, ApiError> {
    let request = payload
        .into_request()
        .map_err(|e| failed(request_id, "validation", e))?;

    EventLogger::log_event(
        request_id,
        FeedbackEvent::Received {
            question_chars: request.question.chars().count(),
            mime_type: request.mime_type.to_string(),
            image_bytes: request.image_bytes.len(),
        },
    );

    let response = state
        .tutor
        .feedback(request)
        .await
        .map_err(|e| failed(request_id, "model", e))?;

    EventLogger::log_event(
        request_id,
        FeedbackEvent::ModelCompleted {
            provider: response.provider.clone(),
            model: response.model.clone(),
            latency_ms: response.latency_ms,
            feedback_chars: response.content.chars().count(),
        },
    );

    Ok(Json(FeedbackEnvelope::success(response.content)))
}

fn failed(request_id: &str, stage: &str, err: TutorError) -> ApiError {
    EventLogger::log_event(
        request_id,
        FeedbackEvent::Failed {
            stage: stage.to_string(),
            error_msg: err.to_string(),
        },
    );
    ApiError::from(err)
}
