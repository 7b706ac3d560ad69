use serde::{Deserialize, Serialize};

/// Storage-layer configuration.
///
/// # Examples
///
/// ```
/// use noema_core::config::StorageConfig;
///
/// let config = StorageConfig::default();
/// assert!((config.vector_similarity_floor - 0.3).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which backend to use. One of `memory`, `graph`, `vector`, `hybrid`.
    /// Default: `"memory"`.
    pub backend: String,
    /// Results with cosine similarity below this floor are omitted from
    /// vector search. Default: 0.3.
    pub vector_similarity_floor: f64,
    /// Default page size for `list`. Default: 50.
    pub default_page_limit: usize,
    /// Default max traversal depth for `path`. Default: 10.
    pub default_max_path_depth: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            vector_similarity_floor: 0.3,
            default_page_limit: 50,
            default_max_path_depth: 10,
        }
    }
}
