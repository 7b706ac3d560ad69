use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use noema_core::errors::{GraphError, GraphResult};
use noema_core::model::{DocumentChunk, Edge, EdgePatch, Node, NodeKind, NodePatch, Relation, Unit, VectorPayload};
use noema_core::traits::{
    BulkOps, BulkResult, ChunkStore, EdgeStore, HealthCheck, NodeStore, Page, PathFinder,
    TransactionOps, VectorFilter, VectorStore,
};

use crate::search::cosine;

#[derive(Default)]
struct Collection {
    dimension: usize,
    vectors: HashMap<String, VectorPayload>,
}

/// A collection-keyed in-memory vector store. Carries no graph topology;
/// every `NodeStore`/`EdgeStore`/`PathFinder`/`ChunkStore` method returns
/// `GraphError::NotSupported`, per spec §4.C5.
pub struct VectorBackend {
    collections: RwLock<HashMap<String, Collection>>,
    similarity_floor: f64,
}

impl VectorBackend {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            similarity_floor: 0.3,
        }
    }

    pub fn with_similarity_floor(mut self, floor: f64) -> Self {
        self.similarity_floor = floor;
        self
    }
}

impl Default for VectorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorBackend {
    /// Ids of every stored vector whose `entity_refs` contains `entity_id`.
    /// Used by `HybridComposer::delete_node`'s cascade; not part of
    /// `VectorStore` because it isn't a similarity query.
    pub fn vectors_referencing(&self, entity_id: &str) -> Vec<String> {
        let collections = self.collections.read().unwrap();
        collections
            .values()
            .flat_map(|c| c.vectors.values())
            .filter(|v| v.entity_refs.iter().any(|r| r == entity_id))
            .map(|v| v.id.clone())
            .collect()
    }
}

impl VectorStore for VectorBackend {
    fn store_vector(&self, vector: &VectorPayload) -> GraphResult<()> {
        let mut collections = self.collections.write().unwrap();
        let entry = collections.entry(vector.collection.clone()).or_insert_with(|| Collection {
            dimension: vector.embedding.len(),
            vectors: HashMap::new(),
        });
        if entry.vectors.is_empty() {
            entry.dimension = vector.embedding.len();
        } else if entry.dimension != vector.embedding.len() {
            return Err(GraphError::Validation(format!(
                "collection {} expects dimension {}, got {}",
                vector.collection,
                entry.dimension,
                vector.embedding.len()
            )));
        }
        entry.vectors.insert(vector.id.clone(), vector.clone());
        Ok(())
    }

    fn get_vector(&self, id: &str) -> GraphResult<Option<VectorPayload>> {
        let collections = self.collections.read().unwrap();
        Ok(collections.values().find_map(|c| c.vectors.get(id)).cloned())
    }

    fn search_vectors(&self, embedding: &[f32], k: usize, filters: &VectorFilter) -> GraphResult<Vec<(VectorPayload, f64)>> {
        let collections = self.collections.read().unwrap();
        let iter: Box<dyn Iterator<Item = &VectorPayload>> = match &filters.collection {
            Some(name) => Box::new(collections.get(name).into_iter().flat_map(|c| c.vectors.values())),
            None => Box::new(collections.values().flat_map(|c| c.vectors.values())),
        };
        let mut scored: Vec<(VectorPayload, f64)> = iter
            .filter(|v| filters.matches(v))
            .map(|v| (v.clone(), cosine(embedding, &v.embedding)))
            .filter(|(_, score)| *score >= self.similarity_floor)
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }

    fn delete_vector(&self, id: &str) -> GraphResult<bool> {
        let mut collections = self.collections.write().unwrap();
        Ok(collections.values_mut().any(|c| c.vectors.remove(id).is_some()))
    }

    fn update_vector_decay(&self, id: &str, score: f64) -> GraphResult<()> {
        let mut collections = self.collections.write().unwrap();
        for collection in collections.values_mut() {
            if let Some(vector) = collection.vectors.get_mut(id) {
                vector.decay_score = Some(Unit::new(score));
                vector.updated_at = Utc::now();
                return Ok(());
            }
        }
        Err(GraphError::NotFound(format!("vector {id} not found")))
    }
}

const NO_TOPOLOGY: &str = "vector backend carries no graph topology";

impl NodeStore for VectorBackend {
    fn create_node(&self, _node: &Node) -> GraphResult<()> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn get_node(&self, _id: &str) -> GraphResult<Option<Node>> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn update_node(&self, _id: &str, _patch: &NodePatch) -> GraphResult<()> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn delete_node(&self, _id: &str) -> GraphResult<bool> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn list_nodes(&self, _page: usize, _limit: usize) -> GraphResult<Page<Node>> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn search_nodes_by_text(&self, _query: &str, _limit: usize) -> GraphResult<Vec<Node>> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn nodes_by_type(&self, _kind: NodeKind, _limit: usize) -> GraphResult<Vec<Node>> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
}

impl EdgeStore for VectorBackend {
    fn create_edge(&self, _edge: &Edge) -> GraphResult<()> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn get_edge(&self, _id: &str) -> GraphResult<Option<Edge>> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn update_edge(&self, _id: &str, _patch: &EdgePatch) -> GraphResult<()> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn delete_edge(&self, _id: &str) -> GraphResult<bool> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn edges_from(&self, _node_id: &str) -> GraphResult<Vec<Edge>> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn edges_to(&self, _node_id: &str) -> GraphResult<Vec<Edge>> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn edges_between(&self, _a: &str, _b: &str) -> GraphResult<Vec<Edge>> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn edges_by_relation(&self, _relation: Relation) -> GraphResult<Vec<Edge>> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
}

impl PathFinder for VectorBackend {
    fn path(&self, _from: &str, _to: &str, _max_depth: usize) -> GraphResult<Vec<Edge>> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
}

impl ChunkStore for VectorBackend {
    fn store_chunk(&self, _chunk: &DocumentChunk) -> GraphResult<()> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn chunks_by_source(&self, _source_id: &str) -> GraphResult<Vec<DocumentChunk>> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn chunks_by_concept(&self, _concept_id: &str) -> GraphResult<Vec<DocumentChunk>> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn delete_chunks_by_source(&self, _source_id: &str) -> GraphResult<usize> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
}

impl BulkOps for VectorBackend {
    fn bulk_create_nodes(&self, _nodes: &[Node]) -> GraphResult<BulkResult> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
    fn bulk_create_edges(&self, _edges: &[Edge]) -> GraphResult<BulkResult> {
        Err(GraphError::NotSupported(NO_TOPOLOGY.into()))
    }
}

impl TransactionOps for VectorBackend {
    fn begin(&self) -> GraphResult<u64> {
        Err(GraphError::NotSupported("vector backend has no transaction isolation".into()))
    }
    fn commit(&self, _tx: u64) -> GraphResult<()> {
        Err(GraphError::NotSupported("vector backend has no transaction isolation".into()))
    }
    fn rollback(&self, _tx: u64) -> GraphResult<()> {
        Err(GraphError::NotSupported("vector backend has no transaction isolation".into()))
    }
}

impl HealthCheck for VectorBackend {
    fn health_check(&self) -> GraphResult<bool> {
        Ok(true)
    }
    fn initialize(&self) -> GraphResult<()> {
        Ok(())
    }
    fn disconnect(&self) -> GraphResult<()> {
        Ok(())
    }
}
