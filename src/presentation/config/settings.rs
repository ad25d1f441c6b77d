use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;

/// Layered settings: `appsettings.toml`, then `appsettings.{env}.toml`, then
/// `APP_`-prefixed variables (`APP_PROVIDERS__OPENAI__MODEL`). Provider keys
/// and the database URL are also read from their conventional variables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub providers: ProvidersSettings,
    pub knowledge: KnowledgeSettings,
    pub limits: LimitsSettings,
}

impl Settings {
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("appsettings").required(false))
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("knowledge.default_categories"),
            )
            .set_override_option("providers.openai.api_key", non_empty_var("OPENAI_API_KEY"))?
            .set_override_option(
                "providers.anthropic.api_key",
                non_empty_var("ANTHROPIC_API_KEY"),
            )?
            .set_override_option("knowledge.database_url", non_empty_var("DATABASE_URL"))?
            .build()?
            .try_deserialize()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersSettings {
    pub openai: OpenAiSettings,
    pub anthropic: AnthropicSettings,
    pub request_timeout_secs: u64,
}

impl Default for ProvidersSettings {
    fn default() -> Self {
        Self {
            openai: OpenAiSettings::default(),
            anthropic: AnthropicSettings::default(),
            request_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub detection_max_tokens: u32,
    pub completion_max_tokens: u32,
    pub temperature: f32,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: None,
            detection_max_tokens: 2000,
            completion_max_tokens: 800,
            temperature: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnthropicSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_version: String,
    pub detection_max_tokens: u32,
    pub completion_max_tokens: u32,
}

impl Default for AnthropicSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: None,
            api_version: "2023-06-01".to_string(),
            detection_max_tokens: 2000,
            completion_max_tokens: 800,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KnowledgeSettings {
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Version marker preferred when several editions of a category exist.
    pub preferred_version: String,
    /// Categories consulted when a transcription request names none.
    pub default_categories: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: 5,
            preferred_version: "November 2025".to_string(),
            default_categories: vec!["pricebook".to_string()],
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsSettings {
    pub max_image_bytes: usize,
}

impl Default for LimitsSettings {
    fn default() -> Self {
        Self {
            max_image_bytes: 5 * 1024 * 1024,
        }
    }
}
