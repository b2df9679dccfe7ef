use anyhow::Result;
use async_trait::async_trait;

use crate::feedback::ImageMime;

/// Trait for the generative model that writes the tutoring feedback.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "gemini", "mock").
    fn name(&self) -> &str;

    /// Send one prompt + image request and return the response text.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// Raw image bytes sent inline with the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: ImageMime,
    pub bytes: Vec<u8>,
}

/// Request to an LLM provider: a text prompt plus one inline image.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub prompt: String,
    pub image: InlineImage,
}

/// Response from an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub latency_ms: u64,
}
