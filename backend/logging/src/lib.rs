//! Telemetry and structured logging components for PhyAssist.
//!
//! Handles log redaction, JSON output, file rotation, and feedback request event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, FeedbackEvent};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
