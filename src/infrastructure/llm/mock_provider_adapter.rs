use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{ProviderAdapter, ProviderError, RawReply};
use crate::domain::ImagePayload;

/// Scripted provider for tests and local runs: returns fixed replies and
/// counts how often each mode was invoked.
pub struct MockProviderAdapter {
    name: &'static str,
    detection_reply: Result<String, ProviderError>,
    completion_reply: Result<String, ProviderError>,
    delay: Option<Duration>,
    detection_calls: AtomicUsize,
    completion_calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

const EMPTY_DETECTION_REPLY: &str = r#"{"objects": [], "creditCard": null, "brick": null}"#;

impl MockProviderAdapter {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            detection_reply: Ok(EMPTY_DETECTION_REPLY.to_string()),
            completion_reply: Ok("{}".to_string()),
            delay: None,
            detection_calls: AtomicUsize::new(0),
            completion_calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn with_detection_reply(mut self, reply: impl Into<String>) -> Self {
        self.detection_reply = Ok(reply.into());
        self
    }

    pub fn with_detection_error(mut self, error: ProviderError) -> Self {
        self.detection_reply = Err(error);
        self
    }

    pub fn with_completion_reply(mut self, reply: impl Into<String>) -> Self {
        self.completion_reply = Ok(reply.into());
        self
    }

    pub fn with_completion_error(mut self, error: ProviderError) -> Self {
        self.completion_reply = Err(error);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn detection_calls(&self) -> usize {
        self.detection_calls.load(Ordering::SeqCst)
    }

    pub fn completion_calls(&self) -> usize {
        self.completion_calls.load(Ordering::SeqCst)
    }

    /// Prompt passed to the most recent detection or completion call.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .map(|prompt| prompt.clone())
            .unwrap_or_default()
    }

    fn remember(&self, prompt: String) {
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt);
        }
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ProviderAdapter for MockProviderAdapter {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn invoke_detection(
        &self,
        _image: &ImagePayload,
        equipment_type: &str,
        categories: &[String],
        context_text: Option<&str>,
    ) -> Result<RawReply, ProviderError> {
        self.detection_calls.fetch_add(1, Ordering::SeqCst);
        self.remember(super::prompts::build_detection_prompt(
            equipment_type,
            categories,
            context_text,
        ));
        self.pause().await;
        self.detection_reply.clone().map(RawReply::new)
    }

    async fn invoke_completion(&self, prompt: &str) -> Result<RawReply, ProviderError> {
        self.completion_calls.fetch_add(1, Ordering::SeqCst);
        self.remember(prompt.to_string());
        self.pause().await;
        self.completion_reply.clone().map(RawReply::new)
    }
}
