use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::Utc;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use noema_core::errors::{GraphError, GraphResult};
use noema_core::model::{
    DocumentChunk, Edge, EdgePatch, Node, NodeKind, NodePatch, Relation, VectorPayload,
};
use noema_core::traits::{
    BulkOps, BulkResult, ChunkStore, EdgeStore, HealthCheck, NodeStore, Page, PathFinder,
    TransactionOps, VectorFilter, VectorStore,
};

use crate::search::search_nodes_by_text;

#[derive(Clone, Default)]
struct Indices {
    by_kind: HashMap<NodeKind, HashSet<String>>,
    by_name: HashMap<String, HashSet<String>>,
    by_relation: HashMap<Relation, HashSet<EdgeIndex>>,
    chunks_by_source: HashMap<String, HashSet<String>>,
    chunks_by_concept: HashMap<String, HashSet<String>>,
}

#[derive(Clone)]
struct State {
    graph: StableDiGraph<Node, Edge>,
    node_idx: HashMap<String, NodeIndex>,
    edge_idx: HashMap<String, EdgeIndex>,
    chunks: HashMap<String, DocumentChunk>,
    indices: Indices,
}

impl Default for State {
    fn default() -> Self {
        Self {
            graph: StableDiGraph::new(),
            node_idx: HashMap::new(),
            edge_idx: HashMap::new(),
            chunks: HashMap::new(),
            indices: Indices::default(),
        }
    }
}

/// A `petgraph`-backed store for nodes, edges, chunks, and paths — the
/// topology half of the hybrid composer (spec §4.C4/§4.C6). Carries no
/// vectors; every `VectorStore` method returns `GraphError::NotSupported`.
pub struct GraphBackend {
    state: RwLock<State>,
    snapshots: RwLock<HashMap<u64, State>>,
    next_tx: AtomicU64,
}

impl GraphBackend {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            snapshots: RwLock::new(HashMap::new()),
            next_tx: AtomicU64::new(1),
        }
    }
}

impl Default for GraphBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore for GraphBackend {
    fn create_node(&self, node: &Node) -> GraphResult<()> {
        node.validate().map_err(GraphError::Validation)?;
        let mut state = self.state.write().unwrap();
        if state.node_idx.contains_key(&node.id) {
            return Err(GraphError::Conflict(format!("node {} already exists", node.id)));
        }
        let idx = state.graph.add_node(node.clone());
        state.node_idx.insert(node.id.clone(), idx);
        state.indices.by_kind.entry(node.kind).or_default().insert(node.id.clone());
        state
            .indices
            .by_name
            .entry(node.name.to_lowercase())
            .or_default()
            .insert(node.id.clone());
        Ok(())
    }

    fn get_node(&self, id: &str) -> GraphResult<Option<Node>> {
        let state = self.state.read().unwrap();
        Ok(state.node_idx.get(id).and_then(|idx| state.graph.node_weight(*idx)).cloned())
    }

    fn update_node(&self, id: &str, patch: &NodePatch) -> GraphResult<()> {
        let mut state = self.state.write().unwrap();
        let idx = *state
            .node_idx
            .get(id)
            .ok_or_else(|| GraphError::NotFound(format!("node {id} not found")))?;
        let old_name = state.graph.node_weight(idx).unwrap().name.to_lowercase();
        let node = state.graph.node_weight_mut(idx).unwrap();
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
        if patch.name.is_some() {
            let new_name = node.name.to_lowercase();
            state.indices.by_name.entry(old_name).or_default().remove(id);
            state.indices.by_name.entry(new_name).or_default().insert(id.to_string());
        }
        Ok(())
    }

    fn delete_node(&self, id: &str) -> GraphResult<bool> {
        let mut state = self.state.write().unwrap();
        let Some(idx) = state.node_idx.remove(id) else {
            return Ok(false);
        };
        if let Some(node) = state.graph.node_weight(idx).cloned() {
            state.indices.by_kind.entry(node.kind).or_default().remove(id);
            state.indices.by_name.entry(node.name.to_lowercase()).or_default().remove(id);
        }
        let incident: Vec<EdgeIndex> = state.graph.edges(idx).map(|e| e.id()).chain(
            state.graph.edges_directed(idx, Direction::Incoming).map(|e| e.id()),
        ).collect();
        for edge_idx in incident {
            if let Some(edge) = state.graph.edge_weight(edge_idx).cloned() {
                state.edge_idx.remove(&edge.id);
                state.indices.by_relation.entry(edge.relation).or_default().remove(&edge_idx);
            }
        }
        state.graph.remove_node(idx);
        Ok(true)
    }

    fn list_nodes(&self, page: usize, limit: usize) -> GraphResult<Page<Node>> {
        let state = self.state.read().unwrap();
        let mut all: Vec<&Node> = state.graph.node_weights().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = all.len();
        let start = page.saturating_mul(limit).min(total);
        let end = (start + limit).min(total);
        let items = all[start..end].iter().map(|n| (*n).clone()).collect();
        Ok(Page { items, total, page, limit, has_more: end < total })
    }

    fn search_nodes_by_text(&self, query: &str, limit: usize) -> GraphResult<Vec<Node>> {
        let state = self.state.read().unwrap();
        Ok(search_nodes_by_text(state.graph.node_weights(), query, limit))
    }

    fn nodes_by_type(&self, kind: NodeKind, limit: usize) -> GraphResult<Vec<Node>> {
        let state = self.state.read().unwrap();
        let Some(ids) = state.indices.by_kind.get(&kind) else {
            return Ok(Vec::new());
        };
        let mut matches: Vec<&Node> = ids
            .iter()
            .filter_map(|id| state.node_idx.get(id))
            .filter_map(|idx| state.graph.node_weight(*idx))
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches.into_iter().take(limit).cloned().collect())
    }
}

impl EdgeStore for GraphBackend {
    fn create_edge(&self, edge: &Edge) -> GraphResult<()> {
        edge.validate().map_err(GraphError::Validation)?;
        let mut state = self.state.write().unwrap();
        if state.edge_idx.contains_key(&edge.id) {
            return Err(GraphError::Conflict(format!("edge {} already exists", edge.id)));
        }
        let from_idx = *state
            .node_idx
            .get(&edge.from_node)
            .ok_or_else(|| GraphError::NotFound(format!("node {} not found", edge.from_node)))?;
        let to_idx = *state
            .node_idx
            .get(&edge.to_node)
            .ok_or_else(|| GraphError::NotFound(format!("node {} not found", edge.to_node)))?;
        let edge_idx = state.graph.add_edge(from_idx, to_idx, edge.clone());
        state.edge_idx.insert(edge.id.clone(), edge_idx);
        state.indices.by_relation.entry(edge.relation).or_default().insert(edge_idx);
        Ok(())
    }

    fn get_edge(&self, id: &str) -> GraphResult<Option<Edge>> {
        let state = self.state.read().unwrap();
        Ok(state.edge_idx.get(id).and_then(|idx| state.graph.edge_weight(*idx)).cloned())
    }

    fn update_edge(&self, id: &str, patch: &EdgePatch) -> GraphResult<()> {
        let mut state = self.state.write().unwrap();
        let idx = *state
            .edge_idx
            .get(id)
            .ok_or_else(|| GraphError::NotFound(format!("edge {id} not found")))?;
        let edge = state
            .graph
            .edge_weight_mut(idx)
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
        let mut state = self.state.write().unwrap();
        let Some(idx) = state.edge_idx.remove(id) else {
            return Ok(false);
        };
        if let Some(edge) = state.graph.edge_weight(idx).cloned() {
            state.indices.by_relation.entry(edge.relation).or_default().remove(&idx);
        }
        state.graph.remove_edge(idx);
        Ok(true)
    }

    fn edges_from(&self, node_id: &str) -> GraphResult<Vec<Edge>> {
        let state = self.state.read().unwrap();
        let Some(&idx) = state.node_idx.get(node_id) else {
            return Ok(Vec::new());
        };
        Ok(state.graph.edges(idx).map(|e| e.weight().clone()).collect())
    }

    fn edges_to(&self, node_id: &str) -> GraphResult<Vec<Edge>> {
        let state = self.state.read().unwrap();
        let Some(&idx) = state.node_idx.get(node_id) else {
            return Ok(Vec::new());
        };
        Ok(state.graph.edges_directed(idx, Direction::Incoming).map(|e| e.weight().clone()).collect())
    }

    fn edges_between(&self, a: &str, b: &str) -> GraphResult<Vec<Edge>> {
        let state = self.state.read().unwrap();
        Ok(state
            .graph
            .edge_weights()
            .filter(|e| (e.from_node == a && e.to_node == b) || (e.from_node == b && e.to_node == a))
            .cloned()
            .collect())
    }

    fn edges_by_relation(&self, relation: Relation) -> GraphResult<Vec<Edge>> {
        let state = self.state.read().unwrap();
        let Some(ids) = state.indices.by_relation.get(&relation) else {
            return Ok(Vec::new());
        };
        Ok(ids.iter().filter_map(|idx| state.graph.edge_weight(*idx)).cloned().collect())
    }
}

impl PathFinder for GraphBackend {
    fn path(&self, from: &str, to: &str, max_depth: usize) -> GraphResult<Vec<Edge>> {
        use std::collections::VecDeque;

        let state = self.state.read().unwrap();
        if from == to {
            return Ok(Vec::new());
        }
        let (Some(&from_idx), Some(&to_idx)) = (state.node_idx.get(from), state.node_idx.get(to)) else {
            return Ok(Vec::new());
        };

        let mut visited: HashSet<NodeIndex> = HashSet::new();
        visited.insert(from_idx);
        let mut queue: VecDeque<(NodeIndex, Vec<EdgeIndex>)> = VecDeque::new();
        queue.push_back((from_idx, Vec::new()));

        while let Some((node, path)) = queue.pop_front() {
            if path.len() >= max_depth {
                continue;
            }
            let mut neighbors: Vec<(NodeIndex, EdgeIndex)> = state
                .graph
                .edges(node)
                .map(|e| (e.target(), e.id()))
                .collect();
            for e in state.graph.edges_directed(node, Direction::Incoming) {
                if !state.graph.edge_weight(e.id()).unwrap().dynamics.directional {
                    neighbors.push((e.source(), e.id()));
                }
            }
            for (next, edge_idx) in neighbors {
                if next == to_idx {
                    let mut full = path.clone();
                    full.push(edge_idx);
                    return Ok(full.into_iter().filter_map(|i| state.graph.edge_weight(i)).cloned().collect());
                }
                if visited.insert(next) {
                    let mut extended = path.clone();
                    extended.push(edge_idx);
                    queue.push_back((next, extended));
                }
            }
        }
        Ok(Vec::new())
    }
}

impl VectorStore for GraphBackend {
    fn store_vector(&self, _vector: &VectorPayload) -> GraphResult<()> {
        Err(GraphError::NotSupported("graph backend does not store vectors".into()))
    }

    fn get_vector(&self, _id: &str) -> GraphResult<Option<VectorPayload>> {
        Err(GraphError::NotSupported("graph backend does not store vectors".into()))
    }

    fn search_vectors(&self, _embedding: &[f32], _k: usize, _filters: &VectorFilter) -> GraphResult<Vec<(VectorPayload, f64)>> {
        Err(GraphError::NotSupported("graph backend does not store vectors".into()))
    }

    fn delete_vector(&self, _id: &str) -> GraphResult<bool> {
        Err(GraphError::NotSupported("graph backend does not store vectors".into()))
    }

    fn update_vector_decay(&self, _id: &str, _score: f64) -> GraphResult<()> {
        Err(GraphError::NotSupported("graph backend does not store vectors".into()))
    }
}

impl ChunkStore for GraphBackend {
    fn store_chunk(&self, chunk: &DocumentChunk) -> GraphResult<()> {
        let mut state = self.state.write().unwrap();
        state.indices.chunks_by_source.entry(chunk.source_id.clone()).or_default().insert(chunk.id.clone());
        for concept in &chunk.concept_ids {
            state.indices.chunks_by_concept.entry(concept.clone()).or_default().insert(chunk.id.clone());
        }
        state.chunks.insert(chunk.id.clone(), chunk.clone());
        Ok(())
    }

    fn chunks_by_source(&self, source_id: &str) -> GraphResult<Vec<DocumentChunk>> {
        let state = self.state.read().unwrap();
        let Some(ids) = state.indices.chunks_by_source.get(source_id) else {
            return Ok(Vec::new());
        };
        Ok(ids.iter().filter_map(|id| state.chunks.get(id)).cloned().collect())
    }

    fn chunks_by_concept(&self, concept_id: &str) -> GraphResult<Vec<DocumentChunk>> {
        let state = self.state.read().unwrap();
        let Some(ids) = state.indices.chunks_by_concept.get(concept_id) else {
            return Ok(Vec::new());
        };
        Ok(ids.iter().filter_map(|id| state.chunks.get(id)).cloned().collect())
    }

    fn delete_chunks_by_source(&self, source_id: &str) -> GraphResult<usize> {
        let mut state = self.state.write().unwrap();
        let Some(ids) = state.indices.chunks_by_source.remove(source_id) else {
            return Ok(0);
        };
        for id in &ids {
            state.chunks.remove(id);
        }
        Ok(ids.len())
    }
}

impl BulkOps for GraphBackend {
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

impl TransactionOps for GraphBackend {
    fn begin(&self) -> GraphResult<u64> {
        let tx = self.next_tx.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.state.read().unwrap().clone();
        self.snapshots.write().unwrap().insert(tx, snapshot);
        Ok(tx)
    }

    fn commit(&self, tx: u64) -> GraphResult<()> {
        self.snapshots.write().unwrap().remove(&tx).ok_or_else(|| GraphError::NotFound(format!("transaction {tx} not found")))?;
        Ok(())
    }

    fn rollback(&self, tx: u64) -> GraphResult<()> {
        let snapshot = self.snapshots.write().unwrap().remove(&tx).ok_or_else(|| GraphError::NotFound(format!("transaction {tx} not found")))?;
        *self.state.write().unwrap() = snapshot;
        Ok(())
    }
}

impl HealthCheck for GraphBackend {
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
