use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use clearance_gateway::application::ports::KnowledgeStore;
use clearance_gateway::infrastructure::observability::{TracingConfig, init_tracing};
use clearance_gateway::infrastructure::persistence::{PgKnowledgeStore, create_pool};
use clearance_gateway::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::for_environment(environment),
        settings.server.port,
    );

    let knowledge_store: Option<Arc<dyn KnowledgeStore>> =
        match settings.knowledge.database_url.as_deref() {
            Some(url) => match create_pool(
                url,
                settings.knowledge.max_connections,
                Duration::from_secs(settings.knowledge.timeout_secs),
            )
            .await
            {
                Ok(pool) => Some(Arc::new(PgKnowledgeStore::new(pool))),
                Err(e) => {
                    tracing::warn!(error = %e, "Knowledge store unavailable, running without it");
                    None
                }
            },
            None => {
                tracing::info!("No knowledge database configured");
                None
            }
        };

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host or port")?;

    let state = AppState::from_settings(settings, knowledge_store);
    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
