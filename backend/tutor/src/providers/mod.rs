pub mod gemini;
pub mod mock;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;

use std::sync::Arc;

use anyhow::Result;
use phyassist_config::{ProviderKind, ServiceConfig};
use phyassist_core::LlmProvider;

/// Build the provider selected by the service configuration.
///
/// Returns `None` when Gemini is selected but no API key is set.
pub fn from_config(config: &ServiceConfig) -> Result<Option<Arc<dyn LlmProvider>>> {
    match config.provider {
        ProviderKind::Mock => Ok(Some(Arc::new(MockProvider::new()))),
        ProviderKind::Gemini => {
            let Some(api_key) = config.api_key.as_deref() else {
                return Ok(None);
            };
            let provider = GeminiProvider::new(api_key, &config.gemini_model)
                .with_base_url(&config.gemini_base_url)
                .with_timeout(config.upstream_timeout())?;
            Ok(Some(Arc::new(provider)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemini_without_key_is_unconfigured() {
        let config = ServiceConfig {
            api_key: None,
            ..ServiceConfig::default()
        };
        assert!(from_config(&config).unwrap().is_none());
    }

    #[test]
    fn selects_provider_by_kind() {
        let gemini = ServiceConfig {
            api_key: Some("AIza-test".into()),
            ..ServiceConfig::default()
        };
        assert_eq!(from_config(&gemini).unwrap().unwrap().name(), "gemini");

        let mock = ServiceConfig {
            provider: ProviderKind::Mock,
            ..ServiceConfig::default()
        };
        assert_eq!(from_config(&mock).unwrap().unwrap().name(), "mock");
    }
}
