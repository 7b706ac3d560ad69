//! Layered configuration, one struct per subsystem, each `serde(default)`
//! so a partial TOML/JSON document only overrides the fields it mentions.

mod decay_config;
mod embedding_config;
mod ingestion_config;
mod orchestrator_config;
mod retrieval_config;
mod storage_config;

pub use decay_config::DecayConfig;
pub use embedding_config::EmbeddingConfig;
pub use ingestion_config::IngestionConfig;
pub use orchestrator_config::OrchestratorConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;
