//! Default values applied when an environment variable is unset.

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://phyassist.netlify.app";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Upper bound on one upstream model call.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

/// Client-side timeout; longer than the upstream one so the service can answer first.
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 90;

/// 10 MiB, enough for a phone photo encoded as base64.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_LOG_LEVEL: &str = "info";
