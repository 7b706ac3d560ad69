use serde::{Deserialize, Serialize};

/// Ingestion-pipeline configuration.
///
/// # Examples
///
/// ```
/// use noema_core::config::IngestionConfig;
///
/// let config = IngestionConfig::default();
/// assert_eq!(config.chunk_size, 512);
/// assert_eq!(config.overlap, 100);
/// assert!(config.auto_extract_concepts);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Sliding-window chunk size, in characters. Default: 512.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks, in characters. Default: 100.
    pub overlap: usize,
    /// Whether to auto-extract concepts via the domain vocabulary.
    /// Default: true.
    pub auto_extract_concepts: bool,
    /// Number of concurrent ingestion workers. Default: 4.
    pub worker_count: usize,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            chunk_size: 512,
            overlap: 100,
            auto_extract_concepts: true,
            worker_count: 4,
        }
    }
}
