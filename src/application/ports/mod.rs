mod knowledge_store;
mod provider_adapter;

pub use knowledge_store::{KnowledgeStore, KnowledgeStoreError};
pub use provider_adapter::{ProviderAdapter, ProviderError, RawReply};
