use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use phyassist_core::{LlmProvider, LlmRequest, LlmResponse};

const DEFAULT_FEEDBACK: &str = "Good start! You used Newton's second law, $F = ma$.\n\
Rearrange it before substituting:\n\
$$a = \\frac{F}{m}$$\n\
Check that your units come out in $\\mathrm{m\\,s^{-2}}$.";

/// A provider that returns canned feedback without any network call.
pub struct MockProvider {
    fixed_response: Option<String>,
    failure: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            fixed_response: None,
            failure: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    /// Every call fails with this message.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Shared counter of `complete` calls.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, _req: &LlmRequest) -> Result<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        Ok(LlmResponse {
            content: self
                .fixed_response
                .clone()
                .unwrap_or_else(|| DEFAULT_FEEDBACK.to_string()),
            provider: "mock".to_string(),
            model: "mock".to_string(),
            latency_ms: 0,
        })
    }
}
