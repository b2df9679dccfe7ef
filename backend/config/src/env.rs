//! Environment variable loading for service and client configuration.
//!
//! Every loader has a `from_vars` twin taking an explicit map so tests never
//! touch the process environment. Empty values count as unset.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::defaults::*;
use crate::schema::{ClientConfig, LoggingConfig, ProviderKind, ServiceConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid number for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("Invalid bool for {name}: {value}")]
    InvalidBool { name: &'static str, value: String },
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Load `.env` from the working directory (or a parent) if one exists.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

impl ServiceConfig {
    /// Load service configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let vars = Vars(vars);
        Ok(Self {
            bind_address: vars.or_default("PHYASSIST_BIND", DEFAULT_BIND_ADDRESS),
            port: vars.parse_or_default("PORT", DEFAULT_PORT)?,
            provider: match vars.get("PHYASSIST_PROVIDER") {
                Some(raw) => raw.parse::<ProviderKind>()?,
                None => ProviderKind::Gemini,
            },
            api_key: vars.get("GEMINI_API_KEY"),
            gemini_model: vars.or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_base_url: trim_slash(vars.or_default("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL)),
            allowed_origin: trim_slash(
                vars.or_default("PHYASSIST_ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN),
            ),
            upstream_timeout_secs: vars
                .parse_or_default("PHYASSIST_UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)?,
            max_body_bytes: vars.parse_or_default("PHYASSIST_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            logging: LoggingConfig::from_vars(&vars)?,
        })
    }
}

impl ClientConfig {
    /// Load client configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let vars = Vars(vars);
        Ok(Self {
            api_base_url: vars.get("PHYASSIST_API_URL").map(trim_slash),
            timeout_secs: vars
                .parse_or_default("PHYASSIST_CLIENT_TIMEOUT_SECS", DEFAULT_CLIENT_TIMEOUT_SECS)?,
            logging: LoggingConfig::from_vars(&vars)?,
        })
    }
}

impl LoggingConfig {
    fn from_vars(vars: &Vars<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            level: vars.or_default("RUST_LOG", DEFAULT_LOG_LEVEL),
            json: vars.parse_bool_or_default("PHYASSIST_LOG_JSON", false)?,
            dir: vars.get("PHYASSIST_LOG_DIR"),
        })
    }
}

/* --------------------------- helpers --------------------------- */

struct Vars<'a>(&'a HashMap<String, String>);

impl Vars<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.0
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn parse_or_default<T: FromStr>(&self, key: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(v) => v.parse::<T>().map_err(|_| ConfigError::InvalidNumber {
                name: key,
                value: v,
            }),
            None => Ok(default),
        }
    }

    fn parse_bool_or_default(&self, key: &'static str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key) {
            Some(v) => match v.to_lowercase().as_str() {
                "1" | "true" | "yes" | "y" => Ok(true),
                "0" | "false" | "no" | "n" => Ok(false),
                _ => Err(ConfigError::InvalidBool { name: key, value: v }),
            },
            None => Ok(default),
        }
    }
}

fn trim_slash(value: String) -> String {
    value.trim_end_matches('/').to_string()
}
