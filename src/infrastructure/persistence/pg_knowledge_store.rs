use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{KnowledgeStore, KnowledgeStoreError};
use crate::domain::KnowledgeEntry;

/// Reads the `knowledge` table: one row per category edition.
pub struct PgKnowledgeStore {
    pool: PgPool,
}

impl PgKnowledgeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct KnowledgeRow {
    category: String,
    content: String,
    version: Option<String>,
    effective_date: Option<NaiveDate>,
}

impl From<KnowledgeRow> for KnowledgeEntry {
    fn from(row: KnowledgeRow) -> Self {
        KnowledgeEntry::new(row.category, row.content, row.version, row.effective_date)
    }
}

#[async_trait]
impl KnowledgeStore for PgKnowledgeStore {
    #[instrument(skip(self))]
    async fn entries_for(
        &self,
        category: &str,
    ) -> Result<Vec<KnowledgeEntry>, KnowledgeStoreError> {
        let rows = sqlx::query_as::<_, KnowledgeRow>(
            r#"
            SELECT category, content, version, effective_date
            FROM knowledge
            WHERE category = $1
            ORDER BY COALESCE(effective_date::text, version) DESC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| KnowledgeStoreError::QueryFailed(e.to_string()))?;

        tracing::debug!(rows = rows.len(), "Loaded knowledge entries");
        Ok(rows.into_iter().map(KnowledgeEntry::from).collect())
    }
}
