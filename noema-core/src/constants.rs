/// Noema system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum traversal depth for graph path-finding, a hard ceiling
/// independent of any caller-supplied `max_depth`.
pub const MAX_PATH_TRAVERSAL_DEPTH: usize = 50;

/// Maximum batch size for bulk create operations.
pub const MAX_BULK_BATCH_SIZE: usize = 1000;

/// Feature flags recognized by a host integration, per spec §6.
pub const FEATURE_VECTOR_SEARCH: bool = true;
pub const FEATURE_GRAPH_REASONING: bool = true;
pub const FEATURE_AUTO_CONCEPT_EXTRACTION: bool = true;
