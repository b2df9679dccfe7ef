use std::sync::Arc;

use phyassist_config::ServiceConfig;
use phyassist_core::{FeedbackRequest, InlineImage, LlmProvider, LlmRequest, LlmResponse, TutorError};
use tracing::{debug, warn};

use crate::prompt::build_prompt;
use crate::providers;

/// Turns a validated feedback request into model feedback.
pub struct FeedbackTutor {
    provider: Option<Arc<dyn LlmProvider>>,
}

impl FeedbackTutor {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// A tutor with no model; every request fails with a configuration error.
    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    pub fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        let provider = providers::from_config(config)?;
        if provider.is_none() {
            warn!("GEMINI_API_KEY is not set; feedback requests will fail until it is configured");
        }
        Ok(Self { provider })
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn feedback(&self, request: FeedbackRequest) -> Result<LlmResponse, TutorError> {
        let Some(provider) = &self.provider else {
            return Err(TutorError::Config("no model provider configured".into()));
        };

        let llm_request = LlmRequest {
            prompt: build_prompt(&request.question),
            image: InlineImage {
                mime_type: request.mime_type,
                bytes: request.image_bytes,
            },
        };
        debug!(provider = provider.name(), "Requesting feedback");

        provider
            .complete(&llm_request)
            .await
            .map_err(|e| TutorError::Upstream {
                provider: provider.name().to_string(),
                message: format!("{e:#}"),
            })
    }
}
