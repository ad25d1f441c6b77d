use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::ProviderAdapter;
use crate::application::services::FallbackOrchestrator;
use crate::presentation::config::ProvidersSettings;

use super::anthropic_adapter::AnthropicAdapter;
use super::openai_adapter::OpenAiAdapter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderFactoryError {
    #[error("missing API key: {0} provider requires a credential")]
    MissingApiKey(&'static str),
}

pub struct ProviderAdapterFactory;

impl ProviderAdapterFactory {
    pub fn create(
        kind: ProviderKind,
        settings: &ProvidersSettings,
    ) -> Result<Arc<dyn ProviderAdapter>, ProviderFactoryError> {
        let timeout = Duration::from_secs(settings.request_timeout_secs);

        match kind {
            ProviderKind::OpenAi => {
                let openai = &settings.openai;
                let key = openai
                    .api_key
                    .clone()
                    .filter(|k| !k.trim().is_empty())
                    .ok_or(ProviderFactoryError::MissingApiKey(kind.as_str()))?;
                let adapter =
                    OpenAiAdapter::new(key, openai.base_url.clone(), openai.model.clone(), timeout)
                        .with_token_limits(
                            openai.detection_max_tokens,
                            openai.completion_max_tokens,
                        )
                        .with_temperature(openai.temperature);
                tracing::info!(provider = kind.as_str(), "Configured OpenAI provider adapter");
                Ok(Arc::new(adapter))
            }
            ProviderKind::Anthropic => {
                let anthropic = &settings.anthropic;
                let key = anthropic
                    .api_key
                    .clone()
                    .filter(|k| !k.trim().is_empty())
                    .ok_or(ProviderFactoryError::MissingApiKey(kind.as_str()))?;
                let adapter = AnthropicAdapter::new(
                    key,
                    anthropic.base_url.clone(),
                    anthropic.model.clone(),
                    timeout,
                )
                .with_api_version(anthropic.api_version.clone())
                .with_token_limits(
                    anthropic.detection_max_tokens,
                    anthropic.completion_max_tokens,
                );
                tracing::info!(provider = kind.as_str(), "Configured Anthropic provider adapter");
                Ok(Arc::new(adapter))
            }
        }
    }

    /// OpenAI is the primary, Anthropic the secondary. Providers without a
    /// credential are left out of the chain.
    pub fn orchestrator(settings: &ProvidersSettings) -> FallbackOrchestrator {
        let primary = Self::configured(ProviderKind::OpenAi, settings);
        let secondaries = Self::configured(ProviderKind::Anthropic, settings)
            .into_iter()
            .collect();

        FallbackOrchestrator::new(
            primary,
            secondaries,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    fn configured(
        kind: ProviderKind,
        settings: &ProvidersSettings,
    ) -> Option<Arc<dyn ProviderAdapter>> {
        match Self::create(kind, settings) {
            Ok(adapter) => Some(adapter),
            Err(e) => {
                tracing::warn!(provider = kind.as_str(), error = %e, "Provider not configured");
                None
            }
        }
    }
}
