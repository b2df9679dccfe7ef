//! Feedback Event Logger
//!
//! Structured events for one feedback request lifecycle, emitted through
//! `tracing` so they land in the console and the rolling NDJSON file.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::redact::redact_sensitive_data;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedbackEvent {
    Received {
        question_chars: usize,
        mime_type: String,
        image_bytes: usize,
    },
    ModelCompleted {
        provider: String,
        model: String,
        latency_ms: u64,
        feedback_chars: usize,
    },
    Failed {
        stage: String,
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: FeedbackEvent,
}

impl EventLogEntry {
    pub fn new(request_id: &str, mut event: FeedbackEvent) -> Self {
        if let FeedbackEvent::Failed { error_msg, .. } = &mut event {
            *error_msg = redact_sensitive_data(error_msg);
        }
        Self {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            event,
        }
    }
}

pub struct EventLogger;

impl EventLogger {
    /// Logs a feedback event, redacting error text first.
    ///
    /// Question text and image bytes are never logged, only their sizes.
    pub fn log_event(request_id: &str, event: FeedbackEvent) {
        let entry = EventLogEntry::new(request_id, event);
        let json = serde_json::to_string(&entry).unwrap_or_default();
        match entry.event {
            FeedbackEvent::Failed { .. } => {
                error!(target: "feedback_events", event = %json, "Feedback request failed")
            }
            _ => info!(target: "feedback_events", event = %json, "Feedback trace event"),
        }
    }
}
