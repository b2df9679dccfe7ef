//! Trusted-origin policy.
//!
//! The CORS layer tells browsers which origin may read responses; the guard
//! refuses cross-origin requests from anyone else before a handler runs.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::error::ApiError;
use crate::server::GatewayState;

/// CORS layer that admits exactly `allowed_origin`.
pub fn cors_layer(allowed_origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(allowed_origin)
        .map_err(|e| anyhow::anyhow!("invalid allowed origin {allowed_origin:?}: {e}"))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Rejects requests whose `Origin` header names any other origin.
///
/// Requests without an `Origin` header are not browser cross-origin calls
/// and pass through.
pub async fn guard_origin(
    State(state): State<GatewayState>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        if !origin_matches(origin, &state.config.allowed_origin) {
            warn!(origin = ?origin, "Rejected request from untrusted origin");
            return ApiError::OriginNotAllowed.into_response();
        }
    }
    next.run(request).await
}

fn origin_matches(origin: &HeaderValue, allowed: &str) -> bool {
    origin
        .to_str()
        .map(|o| o.trim_end_matches('/').eq_ignore_ascii_case(allowed.trim_end_matches('/')))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_comparison() {
        let allowed = "https://phyassist.netlify.app";
        assert!(origin_matches(
            &HeaderValue::from_static("https://phyassist.netlify.app"),
            allowed
        ));
        assert!(origin_matches(
            &HeaderValue::from_static("https://PhyAssist.netlify.app/"),
            allowed
        ));
        assert!(!origin_matches(
            &HeaderValue::from_static("https://evil.example"),
            allowed
        ));
        assert!(!origin_matches(
            &HeaderValue::from_static("http://phyassist.netlify.app"),
            allowed
        ));
        assert!(!origin_matches(&HeaderValue::from_static("null"), allowed));
    }

    #[test]
    fn rejects_unparseable_origin_config() {
        assert!(cors_layer("https://ok.example").is_ok());
        assert!(cors_layer("bad\norigin").is_err());
    }
}
