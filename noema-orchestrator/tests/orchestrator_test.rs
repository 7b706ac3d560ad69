use noema_core::config::OrchestratorConfig;
use noema_core::model::{AgentProposal, AgentType, Node, NodeKind, NodePatch, ProposalStatus, ProposalTarget, Unit};
use noema_core::traits::{NodeStore, TransactionOps};
use noema_orchestrator::{rollback, Orchestrator};
use noema_storage::InProcessBackend;

fn proposal(id: &str, target: ProposalTarget, confidence: f64) -> AgentProposal {
    AgentProposal::new(id, AgentType::Alignment, target, "test", Unit::new(confidence))
}

// Orchestrator receiving two proposals at confidences 0.97 and 0.80 under
// a 0.95 threshold: the first is approved and executed, the second stays
// proposed, and a proposed-status query returns only the second.
#[test]
fn auto_approval_separates_high_and_low_confidence_proposals() {
    let storage = InProcessBackend::new();
    let config = OrchestratorConfig { auto_approve_confidence: 0.95, log_proposals: false };
    let orchestrator = Orchestrator::new(config);

    let high = proposal("p-high", ProposalTarget::CreateNode { node: Node::new("n1", NodeKind::Concept, "n1") }, 0.97);
    let low = proposal("p-low", ProposalTarget::CreateNode { node: Node::new("n2", NodeKind::Concept, "n2") }, 0.80);

    orchestrator.enqueue(high, &storage, &storage);
    orchestrator.enqueue(low, &storage, &storage);

    assert_eq!(orchestrator.queue.get("p-high").unwrap().status, ProposalStatus::Approved);
    assert!(storage.get_node("n1").unwrap().is_some());

    let proposed = orchestrator.queue.by_status(ProposalStatus::Proposed);
    assert_eq!(proposed.len(), 1);
    assert_eq!(proposed[0].id, "p-low");
    assert!(storage.get_node("n2").unwrap().is_none());
}

#[test]
fn an_auto_approved_proposal_executes_exactly_once() {
    let storage = InProcessBackend::new();
    let orchestrator = Orchestrator::default();
    let p = proposal("p1", ProposalTarget::CreateNode { node: Node::new("n1", NodeKind::Concept, "n1") }, 0.99);
    orchestrator.enqueue(p, &storage, &storage);

    // Re-executing explicitly must fail (node already exists) rather than
    // silently double-creating it — the auto-approve path only executes once.
    let err = orchestrator.execute("p1", &storage, &storage);
    assert!(err.is_err());
}

#[test]
fn merge_nodes_proposal_consolidates_duplicate_and_rewrites_edges() {
    let storage = InProcessBackend::new();
    let mut a = Node::new("a", NodeKind::Concept, "transformer");
    a.cognitive_state.confidence = Unit::new(0.9);
    let mut b = Node::new("b", NodeKind::Concept, "transformers");
    b.cognitive_state.confidence = Unit::new(0.4);
    storage.create_node(&a).unwrap();
    storage.create_node(&b).unwrap();

    let merge = proposal("p-merge", ProposalTarget::MergeNodes { node_a: "a".to_string(), node_b: "b".to_string() }, 0.99);
    orchestrator_apply(&storage, merge);

    assert!(storage.get_node("b").unwrap().is_none());
    assert!(storage.get_node("a").unwrap().is_some());
}

fn orchestrator_apply(storage: &InProcessBackend, proposal: AgentProposal) {
    let orchestrator = Orchestrator::default();
    orchestrator.enqueue(proposal, storage, storage);
}

#[test]
fn full_workflow_generated_count_is_at_least_the_auto_approved_count() {
    let storage = InProcessBackend::new();
    storage.create_node(&Node::new("n1", NodeKind::Concept, "transformer")).unwrap();
    storage.create_node(&Node::new("n2", NodeKind::Concept, "transformers")).unwrap();

    let orchestrator = Orchestrator::default();
    let summary = orchestrator.run_full_workflow(&storage, &storage, 0.5).unwrap();
    assert!(summary.generated >= summary.auto_approved);
}

#[test]
fn rollback_deletes_every_node_tagged_with_the_job_id() {
    let storage = InProcessBackend::new();
    let mut n1 = Node::new("n1", NodeKind::Concept, "from batch");
    n1.grounding.source_refs.push("job-7".to_string());
    let n2 = Node::new("n2", NodeKind::Concept, "untouched");
    storage.create_node(&n1).unwrap();
    storage.create_node(&n2).unwrap();

    let deleted = rollback(&storage, &storage, "job-7").unwrap();
    assert_eq!(deleted, 1);
    assert!(storage.get_node("n1").unwrap().is_none());
    assert!(storage.get_node("n2").unwrap().is_some());
}

#[test]
fn update_node_proposal_with_an_empty_patch_is_a_genuine_no_op() {
    let storage = InProcessBackend::new();
    let node = Node::new("n1", NodeKind::Concept, "transformer");
    storage.create_node(&node).unwrap();
    let before = storage.get_node("n1").unwrap().unwrap();

    let informational = proposal("p-info", ProposalTarget::UpdateNode { id: "n1".to_string(), patch: NodePatch::default() }, 0.99);
    orchestrator_apply(&storage, informational);

    let after = storage.get_node("n1").unwrap().unwrap();
    assert_eq!(before.name, after.name);
    assert_eq!(before.description, after.description);
}
