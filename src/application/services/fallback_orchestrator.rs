use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::application::ports::{ProviderAdapter, ProviderError};

use super::gateway_error::{GatewayError, ProviderFailure};

/// A unit of work the orchestrator can run against any provider in the chain.
#[async_trait]
pub trait ProviderTask: Send + Sync {
    type Output: Send;

    /// Short name used in logs.
    fn kind(&self) -> &'static str;

    async fn attempt(
        &self,
        provider: &dyn ProviderAdapter,
    ) -> Result<Self::Output, ProviderError>;

    /// Whether a successful but empty output should still send the request
    /// on to the next provider.
    fn falls_back_on_empty(&self) -> bool {
        false
    }

    fn is_empty(&self, _output: &Self::Output) -> bool {
        false
    }
}

#[derive(Debug)]
pub struct Accepted<T> {
    pub value: T,
    pub provider: &'static str,
}

/// Sequences provider attempts: primary first, then each secondary in order.
///
/// A later provider is tried only when the previous one failed, or when it
/// succeeded with an empty result and the task opts into empty-result
/// fallback. An empty success is kept unless a later provider produces a
/// non-empty one.
pub struct FallbackOrchestrator {
    primary: Option<Arc<dyn ProviderAdapter>>,
    chain: Vec<Arc<dyn ProviderAdapter>>,
    attempt_timeout: Duration,
}

impl FallbackOrchestrator {
    pub fn new(
        primary: Option<Arc<dyn ProviderAdapter>>,
        secondaries: Vec<Arc<dyn ProviderAdapter>>,
        attempt_timeout: Duration,
    ) -> Self {
        let chain = primary.iter().cloned().chain(secondaries).collect();
        Self {
            primary,
            chain,
            attempt_timeout,
        }
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub fn has_any(&self) -> bool {
        !self.chain.is_empty()
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.chain.iter().map(|p| p.name()).collect()
    }

    #[instrument(skip(self, task), fields(task = task.kind()))]
    pub async fn run<T: ProviderTask>(
        &self,
        task: &T,
    ) -> Result<Accepted<T::Output>, GatewayError> {
        let mut failures: Vec<ProviderFailure> = Vec::new();
        let mut empty_success: Option<Accepted<T::Output>> = None;

        for (position, provider) in self.chain.iter().enumerate() {
            let name = provider.name();

            let outcome = self.attempt_with_timeout(task, provider.as_ref()).await;

            match outcome {
                Ok(value) if task.falls_back_on_empty() && task.is_empty(&value) => {
                    info!(
                        provider = name,
                        "Provider returned an empty result, trying next provider"
                    );
                    if empty_success.is_none() {
                        empty_success = Some(Accepted {
                            value,
                            provider: name,
                        });
                    }
                }
                Ok(value) => {
                    info!(
                        provider = name,
                        fallback = position > 0,
                        "Provider result accepted"
                    );
                    return Ok(Accepted {
                        value,
                        provider: name,
                    });
                }
                Err(error) => {
                    warn!(provider = name, error = %error, "Provider attempt failed");
                    failures.push(ProviderFailure {
                        provider: name,
                        error,
                    });
                }
            }
        }

        if let Some(accepted) = empty_success {
            info!(
                provider = accepted.provider,
                failed_fallbacks = failures.len(),
                "No provider produced a non-empty result, keeping first empty result"
            );
            return Ok(accepted);
        }

        match failures.len() {
            0 => Err(GatewayError::Configuration(
                "No AI provider configured".to_string(),
            )),
            1 => Err(failures.remove(0).into()),
            _ => {
                warn!(attempts = failures.len(), "All providers failed");
                Err(GatewayError::AllProvidersFailed(failures))
            }
        }
    }

    async fn attempt_with_timeout<T: ProviderTask>(
        &self,
        task: &T,
        provider: &dyn ProviderAdapter,
    ) -> Result<T::Output, ProviderError> {
        tokio::time::timeout(self.attempt_timeout, task.attempt(provider))
            .await
            .unwrap_or_else(|_| {
                Err(ProviderError::Unavailable(format!(
                    "timed out after {} ms",
                    self.attempt_timeout.as_millis()
                )))
            })
    }
}
