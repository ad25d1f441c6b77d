use crate::presentation::config::Environment;

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Filter directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

impl TracingConfig {
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment: environment.to_string(),
            ..Self::default()
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            filter: std::env::var("LOG_FILTER").ok().filter(|f| !f.trim().is_empty()),
        }
    }
}
