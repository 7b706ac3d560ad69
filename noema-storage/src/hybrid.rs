//! Hybrid composer (spec §4.C6): a `GraphBackend` plus a `VectorBackend`,
//! routed per the spec's table — node/edge/chunk/path go to the graph,
//! vector ops go to the vector store, and `delete_node` cascades into
//! both.

use noema_core::errors::GraphResult;
use noema_core::model::{
    DocumentChunk, Edge, EdgePatch, Node, NodeKind, NodePatch, Relation, VectorPayload,
};
use noema_core::traits::{
    BulkOps, BulkResult, ChunkStore, EdgeStore, HealthCheck, NodeStore, Page, PathFinder,
    TransactionOps, VectorFilter, VectorStore,
};

use crate::graph::GraphBackend;
use crate::vector::VectorBackend;

/// Composes a graph backend and a vector backend into the one
/// `StorageBackend` callers see. Holds concrete types, not trait
/// objects, since these two backends are the composer's whole world.
pub struct HybridComposer {
    graph: GraphBackend,
    vector: VectorBackend,
}

impl HybridComposer {
    pub fn new() -> Self {
        Self {
            graph: GraphBackend::new(),
            vector: VectorBackend::new(),
        }
    }

    /// Create a node and, if supplied, its embedding, as one logical
    /// unit: if the embedding write fails the node is removed again so
    /// callers never observe a node with no vector when one was asked
    /// for.
    pub fn create_node_with_embedding(&self, node: &Node, embedding: Option<&VectorPayload>) -> GraphResult<()> {
        self.graph.create_node(node)?;
        if let Some(vector) = embedding {
            if let Err(e) = self.vector.store_vector(vector) {
                let _ = self.graph.delete_node(&node.id);
                return Err(e);
            }
        }
        Ok(())
    }
}

impl Default for HybridComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore for HybridComposer {
    fn create_node(&self, node: &Node) -> GraphResult<()> {
        self.graph.create_node(node)
    }

    fn get_node(&self, id: &str) -> GraphResult<Option<Node>> {
        self.graph.get_node(id)
    }

    fn update_node(&self, id: &str, patch: &NodePatch) -> GraphResult<()> {
        self.graph.update_node(id, patch)
    }

    /// Deletes the node and its edges from the graph, then best-effort
    /// deletes any vectors referencing it. A vector that fails to
    /// delete is surfaced as a warning, not an error: the node is
    /// already gone and cannot be un-deleted to compensate.
    fn delete_node(&self, id: &str) -> GraphResult<bool> {
        let deleted = self.graph.delete_node(id)?;
        if deleted {
            for vector_id in self.vector.vectors_referencing(id) {
                if let Err(e) = self.vector.delete_vector(&vector_id) {
                    tracing::warn!(node_id = id, vector_id = %vector_id, error = %e, "failed to cascade-delete vector for deleted node");
                }
            }
        }
        Ok(deleted)
    }

    fn list_nodes(&self, page: usize, limit: usize) -> GraphResult<Page<Node>> {
        self.graph.list_nodes(page, limit)
    }

    fn search_nodes_by_text(&self, query: &str, limit: usize) -> GraphResult<Vec<Node>> {
        self.graph.search_nodes_by_text(query, limit)
    }

    fn nodes_by_type(&self, kind: NodeKind, limit: usize) -> GraphResult<Vec<Node>> {
        self.graph.nodes_by_type(kind, limit)
    }
}

impl EdgeStore for HybridComposer {
    fn create_edge(&self, edge: &Edge) -> GraphResult<()> {
        self.graph.create_edge(edge)
    }
    fn get_edge(&self, id: &str) -> GraphResult<Option<Edge>> {
        self.graph.get_edge(id)
    }
    fn update_edge(&self, id: &str, patch: &EdgePatch) -> GraphResult<()> {
        self.graph.update_edge(id, patch)
    }
    fn delete_edge(&self, id: &str) -> GraphResult<bool> {
        self.graph.delete_edge(id)
    }
    fn edges_from(&self, node_id: &str) -> GraphResult<Vec<Edge>> {
        self.graph.edges_from(node_id)
    }
    fn edges_to(&self, node_id: &str) -> GraphResult<Vec<Edge>> {
        self.graph.edges_to(node_id)
    }
    fn edges_between(&self, a: &str, b: &str) -> GraphResult<Vec<Edge>> {
        self.graph.edges_between(a, b)
    }
    fn edges_by_relation(&self, relation: Relation) -> GraphResult<Vec<Edge>> {
        self.graph.edges_by_relation(relation)
    }
}

impl PathFinder for HybridComposer {
    fn path(&self, from: &str, to: &str, max_depth: usize) -> GraphResult<Vec<Edge>> {
        self.graph.path(from, to, max_depth)
    }
}

impl VectorStore for HybridComposer {
    fn store_vector(&self, vector: &VectorPayload) -> GraphResult<()> {
        self.vector.store_vector(vector)
    }
    fn get_vector(&self, id: &str) -> GraphResult<Option<VectorPayload>> {
        self.vector.get_vector(id)
    }
    fn search_vectors(&self, embedding: &[f32], k: usize, filters: &VectorFilter) -> GraphResult<Vec<(VectorPayload, f64)>> {
        self.vector.search_vectors(embedding, k, filters)
    }
    fn delete_vector(&self, id: &str) -> GraphResult<bool> {
        self.vector.delete_vector(id)
    }
    fn update_vector_decay(&self, id: &str, score: f64) -> GraphResult<()> {
        self.vector.update_vector_decay(id, score)
    }
}

impl ChunkStore for HybridComposer {
    fn store_chunk(&self, chunk: &DocumentChunk) -> GraphResult<()> {
        self.graph.store_chunk(chunk)
    }
    fn chunks_by_source(&self, source_id: &str) -> GraphResult<Vec<DocumentChunk>> {
        self.graph.chunks_by_source(source_id)
    }
    fn chunks_by_concept(&self, concept_id: &str) -> GraphResult<Vec<DocumentChunk>> {
        self.graph.chunks_by_concept(concept_id)
    }
    fn delete_chunks_by_source(&self, source_id: &str) -> GraphResult<usize> {
        self.graph.delete_chunks_by_source(source_id)
    }
}

impl BulkOps for HybridComposer {
    fn bulk_create_nodes(&self, nodes: &[Node]) -> GraphResult<BulkResult> {
        self.graph.bulk_create_nodes(nodes)
    }
    fn bulk_create_edges(&self, edges: &[Edge]) -> GraphResult<BulkResult> {
        self.graph.bulk_create_edges(edges)
    }
}

impl TransactionOps for HybridComposer {
    fn begin(&self) -> GraphResult<u64> {
        self.graph.begin()
    }
    fn commit(&self, tx: u64) -> GraphResult<()> {
        self.graph.commit(tx)
    }
    fn rollback(&self, tx: u64) -> GraphResult<()> {
        self.graph.rollback(tx)
    }
}

impl HealthCheck for HybridComposer {
    fn health_check(&self) -> GraphResult<bool> {
        Ok(self.graph.health_check()? && self.vector.health_check()?)
    }

    fn initialize(&self) -> GraphResult<()> {
        self.graph.initialize()?;
        self.vector.initialize()
    }

    fn disconnect(&self) -> GraphResult<()> {
        self.graph.disconnect()?;
        self.vector.disconnect()
    }
}
