mod anthropic_adapter;
mod mock_provider_adapter;
mod openai_adapter;
mod prompts;
mod provider_factory;
mod provider_http;

pub use anthropic_adapter::AnthropicAdapter;
pub use mock_provider_adapter::MockProviderAdapter;
pub use openai_adapter::OpenAiAdapter;
pub use prompts::{COMPLETION_SYSTEM_PROMPT, build_detection_prompt};
pub use provider_factory::{ProviderAdapterFactory, ProviderFactoryError, ProviderKind};
