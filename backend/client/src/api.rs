use std::time::Duration;

use phyassist_config::ClientConfig;
use phyassist_core::{FeedbackEnvelope, FeedbackPayload};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ClientError, SERVER_FALLBACK_MESSAGE};

/// HTTP client for `POST {api_base}/api/feedback`.
#[derive(Clone)]
pub struct FeedbackClient {
    client: Client,
    endpoint: String,
}

impl FeedbackClient {
    pub fn new(api_base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/feedback", api_base_url.trim_end_matches('/')),
        })
    }

    /// `None` when no API base URL is configured.
    pub fn from_config(config: &ClientConfig) -> Result<Option<Self>, ClientError> {
        config
            .api_base_url
            .as_deref()
            .map(|url| Self::new(url, config.timeout()))
            .transpose()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one request and returns the feedback text.
    ///
    /// On a non-success status the server's `error` field is used when
    /// present, otherwise a generic message.
    pub async fn submit(&self, payload: &FeedbackPayload) -> Result<String, ClientError> {
        debug!(endpoint = %self.endpoint, "Submitting feedback request");
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Feedback request did not complete");
                ClientError::Transport(e)
            })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            warn!(%status, "Feedback service returned an error");
            let message = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| SERVER_FALLBACK_MESSAGE.to_string());
            return Err(ClientError::Server(message));
        }

        match serde_json::from_slice::<FeedbackEnvelope>(&body) {
            Ok(FeedbackEnvelope::Success { feedback }) => Ok(feedback),
            Ok(FeedbackEnvelope::Failure { error }) => Err(ClientError::Server(error)),
            Err(e) => {
                warn!(error = %e, "Feedback response was not a valid envelope");
                Err(ClientError::Server(SERVER_FALLBACK_MESSAGE.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use phyassist_core::ImageMime;
    use serde_json::json;

    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn payload() -> FeedbackPayload {
        FeedbackPayload::new("Find a.", "aGk=", ImageMime::Png)
    }

    #[tokio::test]
    async fn posts_camel_case_payload() {
        let app = Router::new().route(
            "/api/feedback",
            post(|Json(body): Json<Value>| async move {
                let ok = body["question"] == "Find a."
                    && body["image"] == "aGk="
                    && body["mimeType"] == "image/png";
                if ok {
                    (StatusCode::OK, Json(json!({ "feedback": "Good start!" })))
                } else {
                    (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad shape" })))
                }
            }),
        );
        let base = spawn_stub(app).await;
        let client = FeedbackClient::new(&format!("{base}/"), Duration::from_secs(5)).unwrap();

        assert_eq!(client.endpoint(), format!("{base}/api/feedback"));
        assert_eq!(client.submit(&payload()).await.unwrap(), "Good start!");
    }

    #[tokio::test]
    async fn server_error_message_is_surfaced() {
        let app = Router::new().route(
            "/api/feedback",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An internal error occurred while analyzing the solution." })),
                )
            }),
        );
        let base = spawn_stub(app).await;
        let client = FeedbackClient::new(&base, Duration::from_secs(5)).unwrap();

        let err = client.submit(&payload()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "An internal error occurred while analyzing the solution."
        );
    }

    #[tokio::test]
    async fn error_without_body_uses_fallback() {
        let app = Router::new().route(
            "/api/feedback",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let base = spawn_stub(app).await;
        let client = FeedbackClient::new(&base, Duration::from_secs(5)).unwrap();

        let err = client.submit(&payload()).await.unwrap_err();
        assert_eq!(err.to_string(), SERVER_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = FeedbackClient::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        let err = client.submit(&payload()).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(err.to_string(), SERVER_FALLBACK_MESSAGE);
    }

    #[test]
    fn unset_url_builds_no_client() {
        let config = ClientConfig::default();
        assert!(FeedbackClient::from_config(&config).unwrap().is_none());
    }
}
