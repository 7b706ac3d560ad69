use serde::{Deserialize, Serialize};

/// Embedding-provider configuration.
///
/// # Examples
///
/// ```
/// use noema_core::config::EmbeddingConfig;
///
/// let config = EmbeddingConfig::default();
/// assert_eq!(config.dimensions, 768);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding vector dimensionality. Default: 768.
    pub dimensions: usize,
    /// Number of top terms returned by keyword extraction. Default: 10.
    pub keyword_top_k: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimensions: 768,
            keyword_top_k: 10,
        }
    }
}
