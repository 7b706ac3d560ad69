use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::Utc;

use noema_core::errors::{GraphError, GraphResult};
use noema_core::model::{
    DocumentChunk, Edge, EdgePatch, Node, NodeKind, NodePatch, Relation, VectorPayload,
};
use noema_core::traits::{
    BulkOps, BulkResult, ChunkStore, EdgeStore, HealthCheck, NodeStore, Page, PathFinder,
    TransactionOps, VectorFilter, VectorStore,
};

use crate::search::{cosine, search_nodes_by_text};

use super::path::bfs_path;

#[derive(Clone, Default)]
struct State {
    nodes: HashMap<String, Node>,
    edges: HashMap<String, Edge>,
    vectors: HashMap<String, VectorPayload>,
    collection_dims: HashMap<String, usize>,
    chunks: HashMap<String, DocumentChunk>,
}

/// The reference storage backend (spec §4.C3): four maps keyed by id,
/// guarded by one `RwLock` so every caller sees linearizable reads and
/// writes. Text search is a linear scan; `path` is breadth-first,
/// bounded by `max_depth`; transactions are whole-state snapshots since
/// nothing here is large enough to warrant a write-ahead log.
pub struct InProcessBackend {
    state: RwLock<State>,
    snapshots: RwLock<HashMap<u64, State>>,
    next_tx: AtomicU64,
    similarity_floor: f64,
}

impl InProcessBackend {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            snapshots: RwLock::new(HashMap::new()),
            next_tx: AtomicU64::new(1),
            similarity_floor: 0.3,
        }
    }

    pub fn with_similarity_floor(mut self, floor: f64) -> Self {
        self.similarity_floor = floor;
        self
    }
}

impl Default for InProcessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore for InProcessBackend {
    fn create_node(&self, node: &Node) -> GraphResult<()> {
        node.validate().map_err(GraphError::Validation)?;
        let mut state = self.state.write().unwrap();
        if state.nodes.contains_key(&node.id) {
            return Err(GraphError::Conflict(format!("node {} already exists", node.id)));
        }
        state.nodes.insert(node.id.clone(), node.clone());
        Ok(())
    }

    fn get_node(&self, id: &str) -> GraphResult<Option<Node>> {
        Ok(self.state.read().unwrap().nodes.get(id).cloned())
    }

    fn update_node(&self, id: &str, patch: &NodePatch) -> GraphResult<()> {
        let mut state = self.state.write().unwrap();
        let node = state
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NotFound(format!("node {id} not found")))?;
        if let Some(name) = &patch.name {
            node.name = name.clone();
        }
        if let Some(description) = &patch.description {
            node.description = description.clone();
        }
        if let Some(confidence) = patch.cognitive_state_confidence {
            node.cognitive_state.confidence = confidence;
        }
        if let Some(domain) = &patch.domain {
            node.domain = Some(domain.clone());
        }
        if let Some(grounding) = &patch.grounding {
            for source_ref in &grounding.source_refs {
                if !node.grounding.source_refs.contains(source_ref) {
                    node.grounding.source_refs.push(source_ref.clone());
                }
            }
            for implementation_ref in &grounding.implementation_refs {
                if !node.grounding.implementation_refs.contains(implementation_ref) {
                    node.grounding.implementation_refs.push(implementation_ref.clone());
                }
            }
        }
        node.updated_at = Utc::now();
        node.validate().map_err(GraphError::Validation)?;
        Ok(())
    }

    fn delete_node(&self, id: &str) -> GraphResult<bool> {
        let mut state = self.state.write().unwrap();
        let removed = state.nodes.remove(id).is_some();
        if removed {
            state
                .edges
                .retain(|_, e| e.from_node != id && e.to_node != id);
        }
        Ok(removed)
    }

    fn list_nodes(&self, page: usize, limit: usize) -> GraphResult<Page<Node>> {
        let state = self.state.read().unwrap();
        let mut all: Vec<&Node> = state.nodes.values().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = all.len();
        let start = page.saturating_mul(limit).min(total);
        let end = (start + limit).min(total);
        let items = all[start..end].iter().map(|n| (*n).clone()).collect();
        Ok(Page {
            items,
            total,
            page,
            limit,
            has_more: end < total,
        })
    }

    fn search_nodes_by_text(&self, query: &str, limit: usize) -> GraphResult<Vec<Node>> {
        let state = self.state.read().unwrap();
        Ok(search_nodes_by_text(state.nodes.values(), query, limit))
    }

    fn nodes_by_type(&self, kind: NodeKind, limit: usize) -> GraphResult<Vec<Node>> {
        let state = self.state.read().unwrap();
        let mut matches: Vec<&Node> = state.nodes.values().filter(|n| n.kind == kind).collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches.into_iter().take(limit).cloned().collect())
    }
}

impl EdgeStore for InProcessBackend {
    fn create_edge(&self, edge: &Edge) -> GraphResult<()> {
        edge.validate().map_err(GraphError::Validation)?;
        let mut state = self.state.write().unwrap();
        if state.edges.contains_key(&edge.id) {
            return Err(GraphError::Conflict(format!("edge {} already exists", edge.id)));
        }
        if !state.nodes.contains_key(&edge.from_node) {
            return Err(GraphError::NotFound(format!("node {} not found", edge.from_node)));
        }
        if !state.nodes.contains_key(&edge.to_node) {
            return Err(GraphError::NotFound(format!("node {} not found", edge.to_node)));
        }
        state.edges.insert(edge.id.clone(), edge.clone());
        Ok(())
    }

    fn get_edge(&self, id: &str) -> GraphResult<Option<Edge>> {
        Ok(self.state.read().unwrap().edges.get(id).cloned())
    }

    fn update_edge(&self, id: &str, patch: &EdgePatch) -> GraphResult<()> {
        let mut state = self.state.write().unwrap();
        let edge = state
            .edges
            .get_mut(id)
            .ok_or_else(|| GraphError::NotFound(format!("edge {id} not found")))?;
        if let Some(confidence) = patch.confidence {
            edge.confidence = confidence;
        }
        if let Some(conflicting) = patch.conflicting {
            edge.conflicting = Some(conflicting);
        }
        edge.temporal.last_used_at = Utc::now();
        Ok(())
    }

    fn delete_edge(&self, id: &str) -> GraphResult<bool> {
        Ok(self.state.write().unwrap().edges.remove(id).is_some())
    }

    fn edges_from(&self, node_id: &str) -> GraphResult<Vec<Edge>> {
        Ok(self
            .state
            .read()
            .unwrap()
            .edges
            .values()
            .filter(|e| e.from_node == node_id)
            .cloned()
            .collect())
    }

    fn edges_to(&self, node_id: &str) -> GraphResult<Vec<Edge>> {
        Ok(self
            .state
            .read()
            .unwrap()
            .edges
            .values()
            .filter(|e| e.to_node == node_id)
            .cloned()
            .collect())
    }

    fn edges_between(&self, a: &str, b: &str) -> GraphResult<Vec<Edge>> {
        Ok(self
            .state
            .read()
            .unwrap()
            .edges
            .values()
            .filter(|e| (e.from_node == a && e.to_node == b) || (e.from_node == b && e.to_node == a))
            .cloned()
            .collect())
    }

    fn edges_by_relation(&self, relation: Relation) -> GraphResult<Vec<Edge>> {
        Ok(self
            .state
            .read()
            .unwrap()
            .edges
            .values()
            .filter(|e| e.relation == relation)
            .cloned()
            .collect())
    }
}

impl PathFinder for InProcessBackend {
    fn path(&self, from: &str, to: &str, max_depth: usize) -> GraphResult<Vec<Edge>> {
        let state = self.state.read().unwrap();
        Ok(bfs_path(state.edges.values(), from, to, max_depth))
    }
}

impl VectorStore for InProcessBackend {
    fn store_vector(&self, vector: &VectorPayload) -> GraphResult<()> {
        let mut state = self.state.write().unwrap();
        let dim = vector.embedding.len();
        if let Some(&existing_dim) = state.collection_dims.get(&vector.collection) {
            if existing_dim != dim {
                return Err(GraphError::Validation(format!(
                    "collection {} expects dimension {existing_dim}, got {dim}",
                    vector.collection
                )));
            }
        } else {
            state.collection_dims.insert(vector.collection.clone(), dim);
        }
        state.vectors.insert(vector.id.clone(), vector.clone());
        Ok(())
    }

    fn get_vector(&self, id: &str) -> GraphResult<Option<VectorPayload>> {
        Ok(self.state.read().unwrap().vectors.get(id).cloned())
    }

    fn search_vectors(
        &self,
        embedding: &[f32],
        k: usize,
        filters: &VectorFilter,
    ) -> GraphResult<Vec<(VectorPayload, f64)>> {
        let state = self.state.read().unwrap();
        let mut scored: Vec<(VectorPayload, f64)> = state
            .vectors
            .values()
            .filter(|v| filters.matches(v))
            .map(|v| (v.clone(), cosine(embedding, &v.embedding)))
            .filter(|(_, score)| *score >= self.similarity_floor)
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }

    fn delete_vector(&self, id: &str) -> GraphResult<bool> {
        Ok(self.state.write().unwrap().vectors.remove(id).is_some())
    }

    fn update_vector_decay(&self, id: &str, score: f64) -> GraphResult<()> {
        let mut state = self.state.write().unwrap();
        let vector = state
            .vectors
            .get_mut(id)
            .ok_or_else(|| GraphError::NotFound(format!("vector {id} not found")))?;
        vector.decay_score = Some(noema_core::model::Unit::new(score));
        vector.updated_at = Utc::now();
        Ok(())
    }
}

impl ChunkStore for InProcessBackend {
    fn store_chunk(&self, chunk: &DocumentChunk) -> GraphResult<()> {
        self.state.write().unwrap().chunks.insert(chunk.id.clone(), chunk.clone());
        Ok(())
    }

    fn chunks_by_source(&self, source_id: &str) -> GraphResult<Vec<DocumentChunk>> {
        Ok(self
            .state
            .read()
            .unwrap()
            .chunks
            .values()
            .filter(|c| c.source_id == source_id)
            .cloned()
            .collect())
    }

    fn chunks_by_concept(&self, concept_id: &str) -> GraphResult<Vec<DocumentChunk>> {
        Ok(self
            .state
            .read()
            .unwrap()
            .chunks
            .values()
            .filter(|c| c.concept_ids.iter().any(|id| id == concept_id))
            .cloned()
            .collect())
    }

    fn delete_chunks_by_source(&self, source_id: &str) -> GraphResult<usize> {
        let mut state = self.state.write().unwrap();
        let before = state.chunks.len();
        state.chunks.retain(|_, c| c.source_id != source_id);
        Ok(before - state.chunks.len())
    }
}

impl BulkOps for InProcessBackend {
    fn bulk_create_nodes(&self, nodes: &[Node]) -> GraphResult<BulkResult> {
        let mut result = BulkResult::default();
        for (i, node) in nodes.iter().enumerate() {
            match self.create_node(node) {
                Ok(()) => result.created_ids.push(node.id.clone()),
                Err(e) => result.failures.push((i, e.to_string())),
            }
        }
        Ok(result)
    }

    fn bulk_create_edges(&self, edges: &[Edge]) -> GraphResult<BulkResult> {
        let mut result = BulkResult::default();
        for (i, edge) in edges.iter().enumerate() {
            match self.create_edge(edge) {
                Ok(()) => result.created_ids.push(edge.id.clone()),
                Err(e) => result.failures.push((i, e.to_string())),
            }
        }
        Ok(result)
    }
}

impl TransactionOps for InProcessBackend {
    fn begin(&self) -> GraphResult<u64> {
        let tx = self.next_tx.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.state.read().unwrap().clone();
        self.snapshots.write().unwrap().insert(tx, snapshot);
        Ok(tx)
    }

    fn commit(&self, tx: u64) -> GraphResult<()> {
        self.snapshots
            .write()
            .unwrap()
            .remove(&tx)
            .ok_or_else(|| GraphError::NotFound(format!("transaction {tx} not found")))?;
        Ok(())
    }

    fn rollback(&self, tx: u64) -> GraphResult<()> {
        let snapshot = self
            .snapshots
            .write()
            .unwrap()
            .remove(&tx)
            .ok_or_else(|| GraphError::NotFound(format!("transaction {tx} not found")))?;
        *self.state.write().unwrap() = snapshot;
        Ok(())
    }
}

impl HealthCheck for InProcessBackend {
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
