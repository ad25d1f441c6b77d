use async_trait::async_trait;

use crate::domain::KnowledgeEntry;

/// Read-only access to the versioned reference material store.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// All entries stored for `category`, in no guaranteed order.
    async fn entries_for(&self, category: &str)
    -> Result<Vec<KnowledgeEntry>, KnowledgeStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeStoreError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("timed out after {0} ms")]
    TimedOut(u128),
}
