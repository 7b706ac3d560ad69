//! Orchestrator: proposal queue owner and execution dispatcher, spec.md
//! §4.C12. Holds no storage reference itself — every entry point takes
//! `&dyn NodeStore`/`&dyn EdgeStore`, the same decomposed-trait-object
//! style `noema-retrieval` and `noema-agents` use, rather than a single
//! `&dyn StorageBackend` handle.

use uuid::Uuid;

use noema_core::errors::{GraphError, GraphResult};
use noema_core::model::{AgentProposal, Edge, Grounding, Node, NodePatch, ProposalStatus, ProposalTarget, Relation, Unit};
use noema_core::traits::{EdgeStore, NodeStore};

use crate::queue::ProposalQueue;

pub use noema_core::config::OrchestratorConfig;

/// Generated-vs-auto-approved proposal counts from a full-workflow run,
/// per spec.md §4.C12's "Full-workflow" paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowSummary {
    pub generated: usize,
    pub auto_approved: usize,
}

pub struct Orchestrator {
    pub queue: ProposalQueue,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(config: OrchestratorConfig) -> Self {
        Self { queue: ProposalQueue::new(), config }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Insert a proposal; auto-approve and execute immediately if its
    /// confidence meets the configured threshold. Execution failure
    /// transitions the proposal to `rejected` with the error recorded
    /// in `reasoning` rather than propagating — the orchestrator never
    /// crashes on a single bad proposal.
    pub fn enqueue(&self, proposal: AgentProposal, nodes: &dyn NodeStore, edges: &dyn EdgeStore) {
        let id = proposal.id.clone();
        let confidence = proposal.confidence.value();
        if self.config.log_proposals {
            tracing::info!(proposal_id = %id, agent_type = ?proposal.agent_type, confidence, "proposal enqueued");
        }
        self.queue.insert(proposal);

        if confidence >= self.config.auto_approve_confidence {
            self.queue.set_status(&id, ProposalStatus::Approved, None);
            if let Err(err) = self.execute(&id, nodes, edges) {
                self.queue.set_status(&id, ProposalStatus::Rejected, Some(err.to_string()));
            }
        }
    }

    /// Reject a proposal without executing it.
    pub fn reject(&self, id: &str) {
        self.queue.set_status(id, ProposalStatus::Rejected, None);
    }

    /// Dispatch a queued proposal's target to storage.
    pub fn execute(&self, id: &str, nodes: &dyn NodeStore, edges: &dyn EdgeStore) -> GraphResult<()> {
        let proposal = self
            .queue
            .get(id)
            .ok_or_else(|| GraphError::NotFound(format!("proposal {id} not found")))?;

        match &proposal.target {
            ProposalTarget::CreateNode { node } => nodes.create_node(node),
            ProposalTarget::UpdateNode { id, patch } => nodes.update_node(id, patch),
            ProposalTarget::CreateEdge { edge } => edges.create_edge(edge),
            ProposalTarget::UpdateEdge { id, patch } => edges.update_edge(id, patch),
            ProposalTarget::MergeNodes { node_a, node_b } => merge_nodes(nodes, edges, node_a, node_b),
            ProposalTarget::FlagConflict { node_a, node_b } => flag_conflict(edges, node_a, node_b, proposal.confidence),
        }
    }

    /// Runs Alignment, Contradiction, and Research over the current
    /// storage snapshot, in that order, enqueuing (and where eligible,
    /// auto-approving) every proposal they generate.
    pub fn run_full_workflow(
        &self,
        nodes_store: &dyn NodeStore,
        edges_store: &dyn EdgeStore,
        alignment_threshold: f64,
    ) -> GraphResult<WorkflowSummary> {
        let all_nodes = fetch_all_nodes(nodes_store)?;
        let all_edges = fetch_all_edges(edges_store)?;

        let mut proposals = noema_agents::propose_alignment(&all_nodes, alignment_threshold);
        proposals.extend(noema_agents::propose_contradictions(&all_edges));
        proposals.extend(noema_agents::propose_gaps(&all_nodes, &all_edges));

        let generated = proposals.len();
        let mut auto_approved = 0;
        for proposal in proposals {
            if proposal.confidence.value() >= self.config.auto_approve_confidence {
                auto_approved += 1;
            }
            self.enqueue(proposal, nodes_store, edges_store);
        }

        Ok(WorkflowSummary { generated, auto_approved })
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(OrchestratorConfig::default())
    }
}

/// Pages through every node in the store. `NodeStore` has no unbounded
/// "list all" primitive, so this walks `list_nodes` until `has_more` is
/// false.
pub(crate) fn fetch_all_nodes(store: &dyn NodeStore) -> GraphResult<Vec<Node>> {
    const PAGE_SIZE: usize = 200;
    let mut all = Vec::new();
    let mut page = 0;
    loop {
        let result = store.list_nodes(page, PAGE_SIZE)?;
        let has_more = result.has_more;
        all.extend(result.items);
        if !has_more {
            break;
        }
        page += 1;
    }
    Ok(all)
}

/// `EdgeStore` has no unbounded "list all" primitive either, only
/// relation/endpoint-scoped queries, so this sweeps every relation label
/// and dedupes by edge id.
fn fetch_all_edges(store: &dyn EdgeStore) -> GraphResult<Vec<Edge>> {
    let mut all = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for relation in Relation::ALL {
        for edge in store.edges_by_relation(relation)? {
            if seen.insert(edge.id.clone()) {
                all.push(edge);
            }
        }
    }
    Ok(all)
}

/// `merge_nodes`: locate both nodes, keep the higher-confidence one as
/// canonical, union the duplicate's grounding into it, delete the
/// duplicate, and rewrite every edge incident on the duplicate to point
/// at the canonical node instead — deduplicating by (from, to, relation)
/// so a merge never produces two edges with the same shape.
fn merge_nodes(nodes: &dyn NodeStore, edges: &dyn EdgeStore, node_a: &str, node_b: &str) -> GraphResult<()> {
    let a = nodes.get_node(node_a)?.ok_or_else(|| GraphError::NotFound(format!("node {node_a} not found")))?;
    let b = nodes.get_node(node_b)?.ok_or_else(|| GraphError::NotFound(format!("node {node_b} not found")))?;

    let (canonical, duplicate) = if a.cognitive_state.confidence.value() >= b.cognitive_state.confidence.value() {
        (a, b)
    } else {
        (b, a)
    };

    let grounding_patch = NodePatch {
        grounding: Some(Grounding {
            source_refs: duplicate.grounding.source_refs.clone(),
            implementation_refs: duplicate.grounding.implementation_refs.clone(),
        }),
        ..NodePatch::default()
    };
    nodes.update_node(&canonical.id, &grounding_patch)?;

    let mut incident = edges.edges_from(&duplicate.id)?;
    incident.extend(edges.edges_to(&duplicate.id)?);

    let rewritten: Vec<Edge> = incident
        .into_iter()
        .map(|edge| retarget_edge(&edge, &duplicate.id, &canonical.id))
        .filter(|edge| edge.from_node != edge.to_node)
        .collect();

    nodes.delete_node(&duplicate.id)?;

    for edge in rewritten {
        let already_present = edges
            .edges_between(&edge.from_node, &edge.to_node)?
            .iter()
            .any(|existing| existing.from_node == edge.from_node && existing.to_node == edge.to_node && existing.relation == edge.relation);
        if !already_present {
            edges.create_edge(&edge)?;
        }
    }

    Ok(())
}

/// Clones `edge` with a fresh id, replacing whichever endpoint equals
/// `duplicate_id` with `canonical_id`.
fn retarget_edge(edge: &Edge, duplicate_id: &str, canonical_id: &str) -> Edge {
    let mut retargeted = edge.clone();
    retargeted.id = format!("edge-{}", Uuid::new_v4());
    if retargeted.from_node == duplicate_id {
        retargeted.from_node = canonical_id.to_string();
    }
    if retargeted.to_node == duplicate_id {
        retargeted.to_node = canonical_id.to_string();
    }
    retargeted
}

/// `flag_conflict`: an inhibitory, conflicting `competes_with` edge
/// between the two named nodes, carrying the proposal's own confidence.
fn flag_conflict(edges: &dyn EdgeStore, node_a: &str, node_b: &str, confidence: Unit) -> GraphResult<()> {
    let mut edge = Edge::new(format!("edge-{}", Uuid::new_v4()), node_a, node_b, Relation::CompetesWith);
    edge.dynamics.inhibitory = true;
    edge.conflicting = Some(true);
    edge.confidence = confidence;
    edges.create_edge(&edge)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::RwLock;

    use noema_core::errors::GraphResult as GR;
    use noema_core::model::{AgentType, CognitiveState, EdgePatch, Node, NodeKind, Unit as U};
    use noema_core::traits::Page;

    use super::*;

    #[derive(Default)]
    struct FakeGraph {
        nodes: RwLock<HashMap<String, Node>>,
        edges: RwLock<HashMap<String, Edge>>,
    }

    impl NodeStore for FakeGraph {
        fn create_node(&self, node: &Node) -> GR<()> {
            self.nodes.write().unwrap().insert(node.id.clone(), node.clone());
            Ok(())
        }
        fn get_node(&self, id: &str) -> GR<Option<Node>> {
            Ok(self.nodes.read().unwrap().get(id).cloned())
        }
        fn update_node(&self, id: &str, patch: &NodePatch) -> GR<()> {
            let mut nodes = self.nodes.write().unwrap();
            let node = nodes.get_mut(id).ok_or_else(|| GraphError::NotFound(id.to_string()))?;
            if let Some(grounding) = &patch.grounding {
                for r in &grounding.source_refs {
                    if !node.grounding.source_refs.contains(r) {
                        node.grounding.source_refs.push(r.clone());
                    }
                }
            }
            Ok(())
        }
        fn delete_node(&self, id: &str) -> GR<bool> {
            let removed = self.nodes.write().unwrap().remove(id).is_some();
            if removed {
                self.edges.write().unwrap().retain(|_, e| e.from_node != id && e.to_node != id);
            }
            Ok(removed)
        }
        fn list_nodes(&self, page: usize, limit: usize) -> GR<Page<Node>> {
            let mut all: Vec<Node> = self.nodes.read().unwrap().values().cloned().collect();
            all.sort_by_key(|n| n.id.clone());
            let total = all.len();
            let start = (page * limit).min(total);
            let end = (start + limit).min(total);
            Ok(Page { items: all[start..end].to_vec(), total, page, limit, has_more: end < total })
        }
        fn search_nodes_by_text(&self, _query: &str, _limit: usize) -> GR<Vec<Node>> {
            Ok(Vec::new())
        }
        fn nodes_by_type(&self, _kind: NodeKind, _limit: usize) -> GR<Vec<Node>> {
            Ok(Vec::new())
        }
    }

    impl EdgeStore for FakeGraph {
        fn create_edge(&self, edge: &Edge) -> GR<()> {
            self.edges.write().unwrap().insert(edge.id.clone(), edge.clone());
            Ok(())
        }
        fn get_edge(&self, id: &str) -> GR<Option<Edge>> {
            Ok(self.edges.read().unwrap().get(id).cloned())
        }
        fn update_edge(&self, _id: &str, _patch: &EdgePatch) -> GR<()> {
            Ok(())
        }
        fn delete_edge(&self, id: &str) -> GR<bool> {
            Ok(self.edges.write().unwrap().remove(id).is_some())
        }
        fn edges_from(&self, node_id: &str) -> GR<Vec<Edge>> {
            Ok(self.edges.read().unwrap().values().filter(|e| e.from_node == node_id).cloned().collect())
        }
        fn edges_to(&self, node_id: &str) -> GR<Vec<Edge>> {
            Ok(self.edges.read().unwrap().values().filter(|e| e.to_node == node_id).cloned().collect())
        }
        fn edges_between(&self, a: &str, b: &str) -> GR<Vec<Edge>> {
            Ok(self
                .edges
                .read()
                .unwrap()
                .values()
                .filter(|e| (e.from_node == a && e.to_node == b) || (e.from_node == b && e.to_node == a))
                .cloned()
                .collect())
        }
        fn edges_by_relation(&self, relation: Relation) -> GR<Vec<Edge>> {
            Ok(self.edges.read().unwrap().values().filter(|e| e.relation == relation).cloned().collect())
        }
    }

    fn node_with_confidence(id: &str, confidence: f64) -> Node {
        let mut n = Node::new(id, NodeKind::Concept, id);
        n.cognitive_state = CognitiveState { confidence: U::new(confidence), ..n.cognitive_state };
        n
    }

    fn proposal(target: ProposalTarget, confidence: f64) -> AgentProposal {
        AgentProposal::new(format!("p-{}", Uuid::new_v4()), AgentType::Alignment, target, "test", Unit::new(confidence))
    }

    #[test]
    fn a_high_confidence_proposal_is_auto_approved_and_executed_exactly_once() {
        let graph = FakeGraph::default();
        let orchestrator = Orchestrator::default();
        let node = Node::new("n1", NodeKind::Concept, "n1");
        let p = proposal(ProposalTarget::CreateNode { node: node.clone() }, 0.97);
        let id = p.id.clone();
        orchestrator.enqueue(p, &graph, &graph);

        assert_eq!(orchestrator.queue.get(&id).unwrap().status, ProposalStatus::Approved);
        assert!(graph.nodes.read().unwrap().contains_key("n1"));
    }

    #[test]
    fn a_low_confidence_proposal_stays_proposed_and_unexecuted() {
        let graph = FakeGraph::default();
        let orchestrator = Orchestrator::default();
        let node = Node::new("n1", NodeKind::Concept, "n1");
        let p = proposal(ProposalTarget::CreateNode { node }, 0.80);
        let id = p.id.clone();
        orchestrator.enqueue(p, &graph, &graph);

        assert_eq!(orchestrator.queue.get(&id).unwrap().status, ProposalStatus::Proposed);
        assert!(!graph.nodes.read().unwrap().contains_key("n1"));
    }

    #[test]
    fn auto_approval_threshold_scenario_separates_two_proposals_by_status() {
        let graph = FakeGraph::default();
        let config = OrchestratorConfig { auto_approve_confidence: 0.95, log_proposals: false };
        let orchestrator = Orchestrator::new(config);

        let high = proposal(ProposalTarget::CreateNode { node: Node::new("n1", NodeKind::Concept, "n1") }, 0.97);
        let low = proposal(ProposalTarget::CreateNode { node: Node::new("n2", NodeKind::Concept, "n2") }, 0.80);
        let low_id = low.id.clone();

        orchestrator.enqueue(high, &graph, &graph);
        orchestrator.enqueue(low, &graph, &graph);

        let proposed = orchestrator.queue.by_status(ProposalStatus::Proposed);
        assert_eq!(proposed.len(), 1);
        assert_eq!(proposed[0].id, low_id);
    }

    #[test]
    fn execution_failure_rejects_the_proposal_instead_of_panicking() {
        let graph = FakeGraph::default();
        let orchestrator = Orchestrator::default();
        let p = proposal(ProposalTarget::UpdateNode { id: "missing".into(), patch: NodePatch::default() }, 0.99);
        let id = p.id.clone();
        orchestrator.enqueue(p, &graph, &graph);
        assert_eq!(orchestrator.queue.get(&id).unwrap().status, ProposalStatus::Rejected);
        assert!(orchestrator.queue.get(&id).unwrap().reasoning.contains("not found"));
    }

    #[test]
    fn merge_nodes_unions_grounding_and_keeps_the_higher_confidence_node() {
        let graph = FakeGraph::default();
        let mut a = node_with_confidence("a", 0.9);
        a.grounding.source_refs.push("paper-a".into());
        let mut b = node_with_confidence("b", 0.4);
        b.grounding.source_refs.push("paper-b".into());
        graph.create_node(&a).unwrap();
        graph.create_node(&b).unwrap();
        graph.create_edge(&Edge::new("e1", "b", "other", Relation::Uses)).unwrap();

        merge_nodes(&graph, &graph, "a", "b").unwrap();

        assert!(graph.get_node("b").unwrap().is_none());
        let canonical = graph.get_node("a").unwrap().unwrap();
        assert!(canonical.grounding.source_refs.contains(&"paper-a".to_string()));
        assert!(canonical.grounding.source_refs.contains(&"paper-b".to_string()));

        let rewritten = graph.edges_from("a").unwrap();
        assert!(rewritten.iter().any(|e| e.to_node == "other"));
    }

    #[test]
    fn flag_conflict_creates_an_inhibitory_competing_edge() {
        let graph = FakeGraph::default();
        flag_conflict(&graph, "n1", "n2", Unit::new(0.8)).unwrap();
        let edges = graph.edges_from("n1").unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].relation, Relation::CompetesWith);
        assert!(edges[0].dynamics.inhibitory);
        assert_eq!(edges[0].conflicting, Some(true));
    }

    #[test]
    fn full_workflow_auto_approved_count_never_exceeds_generated_count() {
        let graph = FakeGraph::default();
        graph.create_node(&node_with_confidence("n1", 0.9)).unwrap();
        graph.create_node(&node_with_confidence("n2", 0.2)).unwrap();
        let orchestrator = Orchestrator::default();
        let summary = orchestrator.run_full_workflow(&graph, &graph, 0.85).unwrap();
        assert!(summary.auto_approved <= summary.generated);
    }
}
