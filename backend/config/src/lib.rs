//! `phyassist-config`: runtime configuration for the PhyAssist service and client.
//!
//! Provides:
//! - Typed config schema (service, client, logging)
//! - Environment loading with `.env` support and defaults
//! - Validation with errors and warnings
//! - Redaction for safe startup logging

pub mod defaults;
pub mod env;
pub mod redact;
pub mod schema;
pub mod validation;

pub use env::{load_dotenv, ConfigError};
pub use redact::redact;
pub use schema::{ClientConfig, LoggingConfig, ProviderKind, ServiceConfig};
pub use validation::{validate_client, validate_service, ConfigValidationError, ValidationReport};

/// Log every warning and error in a validation report.
pub fn log_report(report: &ValidationReport) {
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
}
