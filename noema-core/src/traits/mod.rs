pub mod embedding;
pub mod storage;

pub use embedding::EmbeddingProvider;
pub use storage::{
    BulkOps, BulkResult, ChunkStore, EdgeStore, HealthCheck, NodeStore, Page, PathFinder,
    StorageBackend, TransactionOps, VectorFilter, VectorStore,
};
