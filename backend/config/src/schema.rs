//! PhyAssist configuration schema.
//!
//! Built once at startup and handed to the service or client as an
//! immutable value.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults::*;
use crate::env::ConfigError;

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Configuration of the feedback proxy service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// HTTP bind host (e.g., 0.0.0.0)
    pub bind_address: String,
    /// HTTP bind port
    pub port: u16,
    /// Which model backend answers feedback requests
    pub provider: ProviderKind,
    /// Gemini API key; feedback calls fail with a generic 500 while unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// The single web origin allowed to call the API
    pub allowed_origin: String,
    pub upstream_timeout_secs: u64,
    pub max_body_bytes: usize,
    pub logging: LoggingConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            provider: ProviderKind::Gemini,
            api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            logging: LoggingConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// `host:port` string for the listener.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// JSON snapshot with secrets masked, safe for startup logs.
    pub fn redacted(&self) -> serde_json::Value {
        serde_json::to_value(self)
            .map(|v| crate::redact::redact(&v))
            .unwrap_or(serde_json::Value::Null)
    }
}

/// Model backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Gemini,
    /// Canned local responses, for development without a credential.
    Mock,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "mock" => Ok(ProviderKind::Mock),
            _ => Err(ConfigError::Invalid {
                name: "PHYASSIST_PROVIDER",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gemini => f.write_str("gemini"),
            ProviderKind::Mock => f.write_str("mock"),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Configuration of the feedback client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL of the feedback service; `None` is a configuration error on submit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    pub timeout_secs: u64,
    pub logging: LoggingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            timeout_secs: DEFAULT_CLIENT_TIMEOUT_SECS,
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit console logs as JSON instead of the human format
    pub json: bool,
    /// Directory for the daily-rolling NDJSON log file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
            dir: None,
        }
    }
}
