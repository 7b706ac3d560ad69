use crate::errors::GraphResult;
use crate::model::{
    AbstractionLevel, DocumentChunk, Edge, EdgePatch, EmbeddingType, Node, NodeKind, NodePatch,
    Relation, SourceTier, VectorPayload,
};

/// A page of results, mirroring the response envelope's paginated-data
/// shape from spec §6: `{items, total, page, limit, has_more}`.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub has_more: bool,
}

/// Equality and set-membership filters over vector payload fields.
#[derive(Debug, Clone, Default)]
pub struct VectorFilter {
    /// Keep vectors whose `entity_refs` intersects this set.
    pub entity_refs: Option<Vec<String>>,
    pub source_tiers: Option<Vec<SourceTier>>,
    pub abstraction_levels: Option<Vec<AbstractionLevel>>,
    pub embedding_types: Option<Vec<EmbeddingType>>,
    pub collection: Option<String>,
}

impl VectorFilter {
    pub fn matches(&self, v: &VectorPayload) -> bool {
        if let Some(refs) = &self.entity_refs {
            if !refs.iter().any(|r| v.entity_refs.contains(r)) {
                return false;
            }
        }
        if let Some(tiers) = &self.source_tiers {
            if !tiers.contains(&v.source_tier) {
                return false;
            }
        }
        if let Some(levels) = &self.abstraction_levels {
            if !levels.contains(&v.abstraction_level) {
                return false;
            }
        }
        if let Some(types) = &self.embedding_types {
            if !types.contains(&v.embedding_type) {
                return false;
            }
        }
        if let Some(collection) = &self.collection {
            if &v.collection != collection {
                return false;
            }
        }
        true
    }
}

/// Outcome of a bulk create: the prefix of ids that succeeded plus an
/// aggregated error per failed index, per spec §4.C2's Bulk guarantee.
#[derive(Debug, Clone, Default)]
pub struct BulkResult {
    pub created_ids: Vec<String>,
    pub failures: Vec<(usize, String)>,
}

/// Node CRUD + list + search, per spec §4.C2.
pub trait NodeStore: Send + Sync {
    fn create_node(&self, node: &Node) -> GraphResult<()>;
    fn get_node(&self, id: &str) -> GraphResult<Option<Node>>;
    fn update_node(&self, id: &str, patch: &NodePatch) -> GraphResult<()>;
    /// Returns `true` if a node was deleted, `false` if it did not exist.
    fn delete_node(&self, id: &str) -> GraphResult<bool>;
    /// Ordered by `created_at` descending.
    fn list_nodes(&self, page: usize, limit: usize) -> GraphResult<Page<Node>>;
    /// Case-insensitive substring over name/description/canonical_name.
    /// Exact name matches sort first, description-only matches sort last.
    fn search_nodes_by_text(&self, query: &str, limit: usize) -> GraphResult<Vec<Node>>;
    fn nodes_by_type(&self, kind: NodeKind, limit: usize) -> GraphResult<Vec<Node>>;
}

/// Edge CRUD + directional/relation/path queries, per spec §4.C2.
pub trait EdgeStore: Send + Sync {
    fn create_edge(&self, edge: &Edge) -> GraphResult<()>;
    fn get_edge(&self, id: &str) -> GraphResult<Option<Edge>>;
    fn update_edge(&self, id: &str, patch: &EdgePatch) -> GraphResult<()>;
    fn delete_edge(&self, id: &str) -> GraphResult<bool>;
    fn edges_from(&self, node_id: &str) -> GraphResult<Vec<Edge>>;
    fn edges_to(&self, node_id: &str) -> GraphResult<Vec<Edge>>;
    fn edges_between(&self, a: &str, b: &str) -> GraphResult<Vec<Edge>>;
    fn edges_by_relation(&self, relation: Relation) -> GraphResult<Vec<Edge>>;
}

/// Shortest-path queries, split out from `EdgeStore` because a pure
/// vector backend can't support it at all (see `VectorOnlyBackend` /
/// `NotSupported`).
pub trait PathFinder: Send + Sync {
    /// Returns the edges of a shortest path by hop count, bounded by
    /// `max_depth`. Empty when no path exists.
    fn path(&self, from: &str, to: &str, max_depth: usize) -> GraphResult<Vec<Edge>>;
}

/// Vector CRUD + similarity search, per spec §4.C2/§4.C5.
pub trait VectorStore: Send + Sync {
    fn store_vector(&self, vector: &VectorPayload) -> GraphResult<()>;
    fn get_vector(&self, id: &str) -> GraphResult<Option<VectorPayload>>;
    /// Ranked by cosine descending; results below the backend's
    /// similarity floor are omitted.
    fn search_vectors(
        &self,
        embedding: &[f32],
        k: usize,
        filters: &VectorFilter,
    ) -> GraphResult<Vec<(VectorPayload, f64)>>;
    fn delete_vector(&self, id: &str) -> GraphResult<bool>;
    fn update_vector_decay(&self, id: &str, score: f64) -> GraphResult<()>;
}

/// Chunk CRUD + source/concept indexing, per spec §4.C2.
pub trait ChunkStore: Send + Sync {
    fn store_chunk(&self, chunk: &DocumentChunk) -> GraphResult<()>;
    fn chunks_by_source(&self, source_id: &str) -> GraphResult<Vec<DocumentChunk>>;
    fn chunks_by_concept(&self, concept_id: &str) -> GraphResult<Vec<DocumentChunk>>;
    fn delete_chunks_by_source(&self, source_id: &str) -> GraphResult<usize>;
}

/// Bulk insert, per spec §4.C2: a partial failure returns the prefix of
/// successful ids and an aggregated error over the rest, without rolling
/// back earlier inserts unless inside a transaction.
pub trait BulkOps: Send + Sync {
    fn bulk_create_nodes(&self, nodes: &[Node]) -> GraphResult<BulkResult>;
    fn bulk_create_edges(&self, edges: &[Edge]) -> GraphResult<BulkResult>;
}

/// Transaction boundary. Backends that cannot provide isolation document
/// this as a no-op and reject atomic multi-entity operations with
/// `GraphError::NotSupported`, per spec §4.C2.
pub trait TransactionOps: Send + Sync {
    /// Returns an opaque transaction handle.
    fn begin(&self) -> GraphResult<u64>;
    fn commit(&self, tx: u64) -> GraphResult<()>;
    fn rollback(&self, tx: u64) -> GraphResult<()>;
}

/// Liveness/readiness, per spec §4.C2.
pub trait HealthCheck: Send + Sync {
    fn health_check(&self) -> GraphResult<bool>;
    fn initialize(&self) -> GraphResult<()>;
    fn disconnect(&self) -> GraphResult<()>;
}

/// The full storage contract: one trait per capability, composed. A
/// backend that lacks a capability implements that sub-trait returning
/// `GraphError::NotSupported` from every method — see spec §9's
/// "Polymorphism" note and DESIGN.md.
pub trait StorageBackend:
    NodeStore + EdgeStore + PathFinder + VectorStore + ChunkStore + BulkOps + TransactionOps + HealthCheck
{
}

impl<T> StorageBackend for T where
    T: NodeStore + EdgeStore + PathFinder + VectorStore + ChunkStore + BulkOps + TransactionOps + HealthCheck
{
}
