use std::fmt;

use crate::application::ports::ProviderError;

/// One failed attempt in a fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub provider: &'static str,
    pub error: ProviderError,
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.error)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Configuration(String),
    #[error("{provider} request failed: {error}")]
    Provider {
        provider: &'static str,
        error: ProviderError,
    },
    #[error("AI request failed: all configured providers are unavailable ({})", join_failures(.0))]
    AllProvidersFailed(Vec<ProviderFailure>),
}

impl GatewayError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, GatewayError::Validation(_))
    }

    /// HTTP status the failure is reported with.
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() { 400 } else { 500 }
    }
}

impl From<ProviderFailure> for GatewayError {
    fn from(failure: ProviderFailure) -> Self {
        GatewayError::Provider {
            provider: failure.provider,
            error: failure.error,
        }
    }
}

fn join_failures(failures: &[ProviderFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
