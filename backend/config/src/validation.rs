//! Config validation: checks with user-friendly error messages.

use thiserror::Error;
use url::Url;

use crate::schema::{ClientConfig, ProviderKind, ServiceConfig};

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the service config and return a report of all errors and warnings.
pub fn validate_service(config: &ServiceConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if config.port < 1024 && config.port != 80 && config.port != 443 {
        report.warn(
            "port",
            format!(
                "Port {} requires elevated privileges; consider using a port >= 1024",
                config.port
            ),
        );
    }

    if config.provider == ProviderKind::Gemini {
        if config.api_key.is_none() {
            report.warn(
                "apiKey",
                "GEMINI_API_KEY is not set; every feedback request will fail",
            );
        }
        if config.gemini_model.trim().is_empty() {
            report.error("geminiModel", "Model name cannot be empty");
        }
        check_http_url(&mut report, "geminiBaseUrl", &config.gemini_base_url);
    }

    validate_origin(&mut report, &config.allowed_origin);

    if config.upstream_timeout_secs == 0 {
        report.error("upstreamTimeoutSecs", "Upstream timeout must be >= 1 second");
    }
    if config.max_body_bytes == 0 {
        report.error("maxBodyBytes", "Body limit must be > 0");
    }

    report
}

/// Validate the client config.
pub fn validate_client(config: &ClientConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    match &config.api_base_url {
        Some(url) => check_http_url(&mut report, "apiBaseUrl", url),
        None => report.warn(
            "apiBaseUrl",
            "PHYASSIST_API_URL is not set; submissions will fail with a configuration error",
        ),
    }
    if config.timeout_secs == 0 {
        report.error("timeoutSecs", "Client timeout must be >= 1 second");
    }
    report
}

/// An origin is scheme + host (+ port), nothing else.
fn validate_origin(report: &mut ValidationReport, origin: &str) {
    match Url::parse(origin) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
            if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
                report.error(
                    "allowedOrigin",
                    format!("Origin '{origin}' must not carry a path, query, or fragment"),
                );
            }
        }
        _ => report.error(
            "allowedOrigin",
            format!("Origin '{origin}' is not a valid http(s) origin"),
        ),
    }
}

fn check_http_url(report: &mut ValidationReport, path: &str, raw: &str) {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => report.error(path, format!("'{raw}' is not a valid http(s) URL")),
    }
}
