use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use super::TracingConfig;

pub const DEFAULT_FILTER: &str = "info,clearance_gateway=debug,tower_http=debug";

/// Directive applied when `RUST_LOG` is unset: `LOG_FILTER` if given,
/// otherwise [`DEFAULT_FILTER`].
pub fn filter_directive(config: &TracingConfig) -> &str {
    config.filter.as_deref().unwrap_or(DEFAULT_FILTER)
}

/// Installs the global subscriber. JSON output carries the current span so
/// every provider and knowledge log line keeps its `request_id`.
pub fn init_tracing(config: &TracingConfig, port: u16) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let json_layer = config.json_format.then(|| {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
    });
    let pretty_layer = (!config.json_format).then(|| {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .init();

    tracing::info!(
        port,
        environment = %config.environment,
        json_format = config.json_format,
        "Clearance gateway logging ready"
    );
}
