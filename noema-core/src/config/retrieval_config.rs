use serde::{Deserialize, Serialize};

/// Semantic-query configuration.
///
/// # Examples
///
/// ```
/// use noema_core::config::RetrievalConfig;
///
/// let config = RetrievalConfig::default();
/// assert_eq!(config.default_limit, 10);
/// assert_eq!(config.prerequisite_depth, 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Default result count when a query omits `limit`. Default: 10.
    pub default_limit: usize,
    /// Default traversal depth for the prerequisite API. Default: 2.
    pub prerequisite_depth: usize,
    /// Similarity-comparison tolerance for |Δdifficulty| / |Δabstraction|.
    /// Default: 0.2.
    pub comparison_tolerance: f64,
    /// Difference threshold for |Δvolatility| to count as a "difference".
    /// Default: 0.3.
    pub volatility_difference_threshold: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            prerequisite_depth: 2,
            comparison_tolerance: 0.2,
            volatility_difference_threshold: 0.3,
        }
    }
}
