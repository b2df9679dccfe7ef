//! Config redaction: produce safe-to-log config snapshots by masking sensitive fields.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static SENSITIVE_KEYS: &[&str] = &[
    "apiKey",
    "api_key",
    "apikey",
    "accessToken",
    "access_token",
    "token",
    "secret",
    "password",
];

/// Credentials pasted into URL query strings (`?key=...`).
static URL_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([?&](?:key|api_key|token)=)[^&\s]+").unwrap());

/// Redact a config JSON value, replacing sensitive fields with a short hint.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_string(s: &str, key: &str) -> Value {
    if is_sensitive_key(key) && !s.is_empty() {
        // Keep the first 4 chars as a hint.
        let hint = if s.chars().count() > 4 {
            format!("{}***", s.chars().take(4).collect::<String>())
        } else {
            "***".to_string()
        };
        return Value::String(hint);
    }

    Value::String(URL_KEY_PATTERN.replace_all(s, "${1}***").into_owned())
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) => redact_string(s, key),
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                result.insert(k.clone(), redact_recursive(v, k));
            }
            Value::Object(result)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ServiceConfig;
    use serde_json::json;

    #[test]
    fn redacts_api_key() {
        let cfg = ServiceConfig {
            api_key: Some("AIzaSyA-very-secret-value".to_string()),
            ..Default::default()
        };
        let redacted = cfg.redacted();
        let key = redacted["apiKey"].as_str().unwrap();
        assert_eq!(key, "AIza***");
    }

    #[test]
    fn redacts_key_in_url() {
        let v = json!({ "geminiBaseUrl": "https://example.com/v1?key=abc123&alt=json" });
        let redacted = redact(&v);
        assert_eq!(redacted["geminiBaseUrl"], "https://example.com/v1?key=***&alt=json");
    }

    #[test]
    fn passthrough_non_sensitive() {
        let v = json!({ "logging": { "level": "debug" } });
        let redacted = redact(&v);
        assert_eq!(redacted["logging"]["level"], "debug");
    }
}
