use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, instrument, warn};

use crate::application::ports::KnowledgeStoreError;

const CONNECT_ATTEMPTS: u32 = 6;
const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Opens the read-only pool behind [`super::PgKnowledgeStore`].
///
/// Retries with a capped backoff while the database comes up. Giving up is
/// reported as `ConnectionFailed`; the gateway then runs without knowledge.
#[instrument(skip(url))]
pub async fn create_pool(
    url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, KnowledgeStoreError> {
    let options = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout);
    let mut backoff = Duration::from_millis(500);

    for attempt in 1..=CONNECT_ATTEMPTS {
        match options.clone().connect(url).await {
            Ok(pool) => {
                info!(attempt, "Knowledge database reachable");
                return Ok(pool);
            }
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                warn!(
                    error = %e,
                    attempt,
                    backoff_ms = backoff.as_millis(),
                    "Knowledge database not reachable yet"
                );
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
            Err(e) => return Err(KnowledgeStoreError::ConnectionFailed(e.to_string())),
        }
    }

    Err(KnowledgeStoreError::ConnectionFailed(
        "no connection attempts made".to_string(),
    ))
}
