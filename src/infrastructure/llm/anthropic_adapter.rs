use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{ProviderAdapter, ProviderError, RawReply};
use crate::domain::ImagePayload;

use super::prompts::build_detection_prompt;
use super::provider_http::{check_status, read_envelope, transport_error};

const PROVIDER: &str = "claude";

/// Anthropic messages API. Images travel as base64 blocks tagged with their
/// media type.
pub struct AnthropicAdapter {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    api_version: String,
    detection_max_tokens: u32,
    completion_max_tokens: u32,
}

impl AnthropicAdapter {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.anthropic.com";
    pub const DEFAULT_MODEL: &'static str = "claude-3-5-sonnet-20241022";
    pub const DEFAULT_API_VERSION: &'static str = "2023-06-01";

    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            api_key,
            base_url: base_url
                .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| Self::DEFAULT_MODEL.to_string()),
            api_version: Self::DEFAULT_API_VERSION.to_string(),
            detection_max_tokens: 2000,
            completion_max_tokens: 800,
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_token_limits(mut self, detection: u32, completion: u32) -> Self {
        self.detection_max_tokens = detection;
        self.completion_max_tokens = completion;
        self
    }

    async fn messages(&self, body: serde_json::Value) -> Result<RawReply, ProviderError> {
        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        let response = check_status(PROVIDER, response).await?;
        let message: MessagesResponse = read_envelope(PROVIDER, response).await?;

        message
            .content
            .into_iter()
            .find_map(|block| block.text)
            .map(|text| RawReply::new(text.trim()))
            .ok_or_else(|| {
                ProviderError::MalformedReply("claude reply had no text block".to_string())
            })
    }
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    #[tracing::instrument(skip_all, fields(provider = PROVIDER, model = %self.model))]
    async fn invoke_detection(
        &self,
        image: &ImagePayload,
        equipment_type: &str,
        categories: &[String],
        context_text: Option<&str>,
    ) -> Result<RawReply, ProviderError> {
        let prompt = build_detection_prompt(equipment_type, categories, context_text);

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.detection_max_tokens,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "image",
                            "source": {
                                "type": "base64",
                                "media_type": image.media_type(),
                                "data": image.base64_data()
                            }
                        },
                        { "type": "text", "text": prompt }
                    ]
                }
            ]
        });

        tracing::debug!(
            media_type = image.media_type(),
            decoded_bytes = image.approx_decoded_len(),
            "Sending detection request to Anthropic"
        );
        self.messages(body).await
    }

    #[tracing::instrument(skip_all, fields(provider = PROVIDER, model = %self.model))]
    async fn invoke_completion(&self, prompt: &str) -> Result<RawReply, ProviderError> {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.completion_max_tokens,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        self.messages(body).await
    }
}
