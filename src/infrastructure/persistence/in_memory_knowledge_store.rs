use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::ports::{KnowledgeStore, KnowledgeStoreError};
use crate::domain::KnowledgeEntry;

/// Knowledge held in process. Used when no database is configured for local
/// runs, and by tests.
#[derive(Default)]
pub struct InMemoryKnowledgeStore {
    entries: HashMap<String, Vec<KnowledgeEntry>>,
    failing: Vec<String>,
}

impl InMemoryKnowledgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, entry: KnowledgeEntry) -> Self {
        self.entries
            .entry(entry.category.clone())
            .or_default()
            .push(entry);
        self
    }

    /// Lookups for `category` fail with a query error.
    pub fn with_failing_category(mut self, category: impl Into<String>) -> Self {
        self.failing.push(category.into());
        self
    }
}

#[async_trait]
impl KnowledgeStore for InMemoryKnowledgeStore {
    async fn entries_for(
        &self,
        category: &str,
    ) -> Result<Vec<KnowledgeEntry>, KnowledgeStoreError> {
        if self.failing.iter().any(|c| c == category) {
            return Err(KnowledgeStoreError::QueryFailed(format!(
                "category {category} is unavailable"
            )));
        }

        Ok(self.entries.get(category).cloned().unwrap_or_default())
    }
}
