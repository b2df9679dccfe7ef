//! Main HTTP Gateway Server.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use phyassist_config::ServiceConfig;
use phyassist_tutor::FeedbackTutor;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::{feedback, health_api, origin};

/// Application state shared across routes. Built once, never mutated.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<ServiceConfig>,
    pub tutor: Arc<FeedbackTutor>,
}

impl GatewayState {
    pub fn new(config: ServiceConfig, tutor: FeedbackTutor) -> Self {
        Self {
            config: Arc::new(config),
            tutor: Arc::new(tutor),
        }
    }
}

/// Routes plus the origin policy, body limit, and request tracing.
pub fn build_router(state: GatewayState) -> Result<Router> {
    let cors = origin::cors_layer(&state.config.allowed_origin)?;
    let router = Router::new()
        .route("/api/feedback", post(feedback::post_feedback))
        .route("/api/health", get(health_api::get_health))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            origin::guard_origin,
        ))
        .layer(cors)
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    Ok(router)
}

/// Starts the Axum HTTP server and runs until Ctrl-C.
#[instrument(skip(state), fields(addr = %state.config.addr()))]
pub async fn start_server(state: GatewayState) -> Result<()> {
    let addr = state.config.addr();
    let app = build_router(state)?;

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Gateway HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use base64::{engine::general_purpose::STANDARD, Engine};
    use phyassist_tutor::providers::MockProvider;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    const ORIGIN: &str = "https://phyassist.netlify.app";

    fn router_with(mock: MockProvider) -> (Router, Arc<AtomicUsize>) {
        let calls = mock.call_counter();
        let state = GatewayState::new(
            ServiceConfig::default(),
            FeedbackTutor::new(Arc::new(mock)),
        );
        (build_router(state).unwrap(), calls)
    }

    fn feedback_request(origin: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/api/feedback")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(origin) = origin {
            builder = builder.header(header::ORIGIN, origin);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "question": "A 2 kg block is pushed with 10 N. Find a.",
            "image": STANDARD.encode([0x89, b'P', b'N', b'G']),
            "mimeType": "image/png",
        })
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn returns_model_text_verbatim() {
        let (app, calls) = router_with(MockProvider::new().with_response("Good start! $a = F/m$"));

        let response = app
            .oneshot(feedback_request(Some(ORIGIN), valid_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            ORIGIN
        );
        assert_eq!(
            json_body(response).await,
            json!({ "feedback": "Good start! $a = F/m$" })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_before_the_model() {
        for body in [
            json!({ "image": "aGk=", "mimeType": "image/png" }),
            json!({ "question": "Find a.", "mimeType": "image/png" }),
            json!({ "question": "Find a.", "image": "aGk=" }),
            json!({ "question": "   ", "image": "aGk=", "mimeType": "image/png" }),
            json!({ "question": "Find a.", "image": "", "mimeType": "image/png" }),
        ] {
            let (app, calls) = router_with(MockProvider::new());
            let response = app.oneshot(feedback_request(None, body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                json_body(response).await,
                json!({ "error": "Missing image, mimeType, or question in request." })
            );
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn invalid_image_and_mime_are_bad_requests() {
        let (app, calls) = router_with(MockProvider::new());
        let mut body = valid_body();
        body["image"] = json!("not base64!!");
        let response = app.oneshot(feedback_request(None, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "Image payload is not valid base64."
        );

        let (app, _) = router_with(MockProvider::new());
        let mut body = valid_body();
        body["mimeType"] = json!("image/gif");
        let response = app.oneshot(feedback_request(None, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upstream_failure_is_generic_500() {
        let (app, _) = router_with(MockProvider::new().failing("503 from upstream, key=AIzaSECRET"));

        let response = app
            .oneshot(feedback_request(Some(ORIGIN), valid_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "An internal error occurred while analyzing the solution." })
        );
    }

    #[tokio::test]
    async fn missing_model_credential_is_generic_500() {
        let state = GatewayState::new(ServiceConfig::default(), FeedbackTutor::unconfigured());
        let app = build_router(state).unwrap();

        let response = app
            .oneshot(feedback_request(None, valid_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn untrusted_origin_is_forbidden() {
        let (app, calls) = router_with(MockProvider::new());

        let response = app
            .oneshot(feedback_request(Some("https://evil.example"), valid_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
        assert_eq!(json_body(response).await, json!({ "error": "Origin not allowed." }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn preflight_from_trusted_origin() {
        let (app, calls) = router_with(MockProvider::new());

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/feedback")
            .header(header::ORIGIN, ORIGIN)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            ORIGIN
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let config = ServiceConfig {
            max_body_bytes: 64,
            ..ServiceConfig::default()
        };
        let mock = MockProvider::new();
        let calls = mock.call_counter();
        let app = build_router(GatewayState::new(config, FeedbackTutor::new(Arc::new(mock)))).unwrap();

        let mut body = valid_body();
        body["image"] = json!(STANDARD.encode(vec![0u8; 512]));
        let response = app.oneshot(feedback_request(None, body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Request body is too large." })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    fn raw_request(content_type: Option<&str>, body: &'static str) -> Request<Body> {
        let mut builder = Request::builder().method(Method::POST).uri("/api/feedback");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn undeclared_or_empty_body_reads_as_missing_fields() {
        let valid = r#"{"question":"Find a.","image":"aGk=","mimeType":"image/png"}"#;
        for request in [
            raw_request(None, valid),
            raw_request(Some("text/plain"), valid),
            raw_request(Some("application/json"), ""),
            raw_request(Some("application/json; charset=utf-8"), "  \n"),
            raw_request(Some("application/json"), r#"{"question":5,"image":"aGk=","mimeType":"image/png"}"#),
        ] {
            let (app, calls) = router_with(MockProvider::new());
            let response = app.oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                json_body(response).await,
                json!({ "error": "Missing image, mimeType, or question in request." })
            );
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn malformed_json_gets_error_envelope() {
        let (app, calls) = router_with(MockProvider::new());

        let response = app
            .oneshot(raw_request(Some("application/json"), r#"{"question":"Find a.","ima"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Request body is not valid JSON." })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn charset_parameter_is_accepted() {
        let (app, calls) = router_with(MockProvider::new().with_response("ok"));
        let body = valid_body().to_string();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/feedback")
            .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn health_reports_model_configuration() {
        let state = GatewayState::new(ServiceConfig::default(), FeedbackTutor::unconfigured());
        let app = build_router(state).unwrap();

        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "phyassist");
        assert_eq!(body["model_configured"], false);
    }
}
