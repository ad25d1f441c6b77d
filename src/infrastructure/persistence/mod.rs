mod in_memory_knowledge_store;
mod pg_knowledge_store;
mod pg_pool;

pub use in_memory_knowledge_store::InMemoryKnowledgeStore;
pub use pg_knowledge_store::PgKnowledgeStore;
pub use pg_pool::create_pool;
