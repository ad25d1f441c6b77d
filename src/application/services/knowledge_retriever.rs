use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, instrument, warn};

use crate::application::ports::{KnowledgeStore, KnowledgeStoreError};
use crate::domain::{KnowledgeEntry, KnowledgeSnapshot};

/// Picks one entry per category: the newest entry whose version label
/// contains `preferred_marker` (case-insensitive), else the newest entry.
pub fn select_entry(
    mut entries: Vec<KnowledgeEntry>,
    preferred_marker: &str,
) -> Option<KnowledgeEntry> {
    entries.sort_by(|a, b| b.recency_key().cmp(&a.recency_key()));

    let preferred = entries
        .iter()
        .position(|e| e.matches_version_marker(preferred_marker));

    match preferred {
        Some(index) => Some(entries.swap_remove(index)),
        None => entries.into_iter().next(),
    }
}

pub struct KnowledgeRetriever {
    store: Option<Arc<dyn KnowledgeStore>>,
    preferred_version: String,
    timeout: Duration,
}

impl KnowledgeRetriever {
    pub fn new(
        store: Option<Arc<dyn KnowledgeStore>>,
        preferred_version: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            preferred_version: preferred_version.into(),
            timeout,
        }
    }

    /// Fetches every category concurrently. A category that is missing,
    /// errors or times out is left out of the snapshot.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, categories: &[String]) -> KnowledgeSnapshot {
        let Some(store) = &self.store else {
            debug!("No knowledge store configured");
            return KnowledgeSnapshot::new();
        };

        let mut unique: Vec<&str> = Vec::with_capacity(categories.len());
        for category in categories {
            if !unique.contains(&category.as_str()) {
                unique.push(category);
            }
        }

        let lookups = unique.into_iter().map(|category| {
            let store = Arc::clone(store);
            async move {
                let result = tokio::time::timeout(self.timeout, store.entries_for(category))
                    .await
                    .unwrap_or_else(|_| {
                        Err(KnowledgeStoreError::TimedOut(self.timeout.as_millis()))
                    });
                (category, result)
            }
        });

        let mut snapshot = KnowledgeSnapshot::new();
        for (category, result) in join_all(lookups).await {
            match result {
                Ok(entries) => match select_entry(entries, &self.preferred_version) {
                    Some(entry) => {
                        debug!(
                            category,
                            version = entry.version_label(),
                            "Selected knowledge entry"
                        );
                        snapshot.insert(category.to_string(), entry);
                    }
                    None => debug!(category, "No knowledge stored for category"),
                },
                Err(e) => {
                    warn!(category, error = %e, "Knowledge lookup failed, omitting category");
                }
            }
        }

        snapshot
    }
}
