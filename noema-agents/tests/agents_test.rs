use std::collections::HashSet;
use std::sync::RwLock;

use noema_agents::{missing_prerequisites, propose_alignment, propose_contradictions, propose_from_ingestion, propose_gaps};
use noema_core::errors::{GraphError, GraphResult};
use noema_core::model::{Edge, EdgePatch, Level, Node, NodeKind, NodePatch, ProposalTarget, Relation, Unit};
use noema_core::traits::{EdgeStore, NodeStore, Page};
use noema_ingestion::IngestedDocument;

struct FakeGraph {
    nodes: RwLock<Vec<Node>>,
    edges: RwLock<Vec<Edge>>,
}

impl NodeStore for FakeGraph {
    fn create_node(&self, node: &Node) -> GraphResult<()> {
        self.nodes.write().unwrap().push(node.clone());
        Ok(())
    }
    fn get_node(&self, id: &str) -> GraphResult<Option<Node>> {
        Ok(self.nodes.read().unwrap().iter().find(|n| n.id == id).cloned())
    }
    fn update_node(&self, _id: &str, _patch: &NodePatch) -> GraphResult<()> {
        Ok(())
    }
    fn delete_node(&self, _id: &str) -> GraphResult<bool> {
        Ok(false)
    }
    fn list_nodes(&self, _page: usize, _limit: usize) -> GraphResult<Page<Node>> {
        Err(GraphError::NotSupported("fake".into()))
    }
    fn search_nodes_by_text(&self, query: &str, _limit: usize) -> GraphResult<Vec<Node>> {
        let q = query.to_lowercase();
        Ok(self.nodes.read().unwrap().iter().filter(|n| n.name.to_lowercase() == q).cloned().collect())
    }
    fn nodes_by_type(&self, _kind: NodeKind, _limit: usize) -> GraphResult<Vec<Node>> {
        Err(GraphError::NotSupported("fake".into()))
    }
}

impl EdgeStore for FakeGraph {
    fn create_edge(&self, edge: &Edge) -> GraphResult<()> {
        self.edges.write().unwrap().push(edge.clone());
        Ok(())
    }
    fn get_edge(&self, _id: &str) -> GraphResult<Option<Edge>> {
        Err(GraphError::NotSupported("fake".into()))
    }
    fn update_edge(&self, _id: &str, _patch: &EdgePatch) -> GraphResult<()> {
        Err(GraphError::NotSupported("fake".into()))
    }
    fn delete_edge(&self, _id: &str) -> GraphResult<bool> {
        Ok(false)
    }
    fn edges_from(&self, _node_id: &str) -> GraphResult<Vec<Edge>> {
        Err(GraphError::NotSupported("fake".into()))
    }
    fn edges_to(&self, node_id: &str) -> GraphResult<Vec<Edge>> {
        Ok(self.edges.read().unwrap().iter().filter(|e| e.to_node == node_id).cloned().collect())
    }
    fn edges_between(&self, _a: &str, _b: &str) -> GraphResult<Vec<Edge>> {
        Err(GraphError::NotSupported("fake".into()))
    }
    fn edges_by_relation(&self, _relation: Relation) -> GraphResult<Vec<Edge>> {
        Err(GraphError::NotSupported("fake".into()))
    }
}

#[test]
fn ingestion_agent_only_proposes_genuinely_new_concepts() {
    let graph = FakeGraph { nodes: RwLock::new(vec![Node::new("n1", NodeKind::Concept, "transformer")]), edges: RwLock::new(vec![]) };
    let document = IngestedDocument {
        source_id: "doc-1".to_string(),
        chunks: Vec::new(),
        concepts: vec!["transformer".to_string(), "attention".to_string()],
        embeddings: Vec::new(),
    };
    let proposals = propose_from_ingestion(&document, &graph).unwrap();
    assert_eq!(proposals.len(), 1);
}

#[test]
fn alignment_and_contradiction_agents_run_over_the_same_snapshot() {
    let nodes = vec![Node::new("n1", NodeKind::Concept, "transformer"), Node::new("n2", NodeKind::Concept, "transformers")];
    let edges = vec![Edge::new("e1", "n1", "n2", Relation::CompetesWith)];

    let merges = propose_alignment(&nodes, 0.85);
    assert_eq!(merges.len(), 1);

    let conflicts = propose_contradictions(&edges);
    assert_eq!(conflicts.len(), 1);
    match &conflicts[0].target {
        ProposalTarget::FlagConflict { node_a, node_b } => {
            assert_eq!(node_a, "n1");
            assert_eq!(node_b, "n2");
        }
        _ => panic!("expected FlagConflict"),
    }
}

#[test]
fn curriculum_and_research_agents_compose_over_a_small_graph() {
    let target = Node::new("target", NodeKind::Concept, "transformers");
    let mut prereq = Node::new("prereq", NodeKind::Concept, "attention");
    prereq.level = Level { difficulty: Unit::new(0.3), ..prereq.level };
    let isolated = Node::new("isolated", NodeKind::Concept, "unrelated topic");

    let edge = Edge::new("e1", "prereq", "target", Relation::Requires);
    let graph = FakeGraph { nodes: RwLock::new(vec![target, prereq, isolated.clone()]), edges: RwLock::new(vec![edge.clone()]) };

    let missing = missing_prerequisites(&graph, &graph, "target", &HashSet::new()).unwrap();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].id, "prereq");

    let all_nodes = graph.nodes.read().unwrap().clone();
    let all_edges = graph.edges.read().unwrap().clone();
    let gaps = propose_gaps(&all_nodes, &all_edges);
    assert!(gaps.iter().any(|p| matches!(&p.target, ProposalTarget::UpdateNode { id, .. } if id == &isolated.id)));
}
