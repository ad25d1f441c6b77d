mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AnthropicSettings, KnowledgeSettings, LimitsSettings, OpenAiSettings, ProvidersSettings,
    ServerSettings, Settings,
};
