use async_trait::async_trait;

use crate::domain::ImagePayload;

/// Free text returned by a reasoning provider, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply(pub String);

impl RawReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One upstream vision/language provider. Implementations own a single
/// endpoint and credential and never retry; the fallback orchestrator
/// decides what happens after a failure.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Stable tag reported back to clients as `aiServiceUsed`.
    fn name(&self) -> &'static str;

    async fn invoke_detection(
        &self,
        image: &ImagePayload,
        equipment_type: &str,
        categories: &[String],
        context_text: Option<&str>,
    ) -> Result<RawReply, ProviderError>;

    async fn invoke_completion(&self, prompt: &str) -> Result<RawReply, ProviderError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("unavailable: {0}")]
    Unavailable(String),
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}
