use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{ProviderAdapter, ProviderError, RawReply};
use crate::domain::ImagePayload;

use super::prompts::{COMPLETION_SYSTEM_PROMPT, build_detection_prompt};
use super::provider_http::{check_status, read_envelope, transport_error};

const PROVIDER: &str = "openai";

/// OpenAI chat completions. Images travel inline as `image_url` data URIs.
pub struct OpenAiAdapter {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    detection_max_tokens: u32,
    completion_max_tokens: u32,
    temperature: f32,
}

impl OpenAiAdapter {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_MODEL: &'static str = "gpt-4o";

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
            detection_max_tokens: 2000,
            completion_max_tokens: 800,
            temperature: 0.1,
        }
    }

    pub fn with_token_limits(mut self, detection: u32, completion: u32) -> Self {
        self.detection_max_tokens = detection;
        self.completion_max_tokens = completion;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    async fn chat(&self, body: serde_json::Value) -> Result<RawReply, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        let response = check_status(PROVIDER, response).await?;
        let completion: ChatCompletion = read_envelope(PROVIDER, response).await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| RawReply::new(content.trim()))
            .ok_or_else(|| {
                ProviderError::MalformedReply("openai reply had no content".to_string())
            })
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
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
            "messages": [
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": prompt },
                        {
                            "type": "image_url",
                            "image_url": { "url": image.as_data_uri(), "detail": "high" }
                        }
                    ]
                }
            ],
            "max_tokens": self.detection_max_tokens,
            "temperature": self.temperature
        });

        tracing::debug!(
            image_bytes = image.encoded_len(),
            decoded_bytes = image.approx_decoded_len(),
            "Sending detection request to OpenAI"
        );
        self.chat(body).await
    }

    #[tracing::instrument(skip_all, fields(provider = PROVIDER, model = %self.model))]
    async fn invoke_completion(&self, prompt: &str) -> Result<RawReply, ProviderError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": COMPLETION_SYSTEM_PROMPT },
                { "role": "user", "content": prompt }
            ],
            "max_tokens": self.completion_max_tokens,
            "temperature": self.temperature
        });

        self.chat(body).await
    }
}
