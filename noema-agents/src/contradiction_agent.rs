//! Contradiction agent, spec.md §4.C11.
//!
//! Scans edges for `competes_with`/`fails_on` relations and proposes
//! flagging the pair as conflicting.

use uuid::Uuid;

use noema_core::model::{AgentProposal, AgentType, Edge, ProposalTarget, Relation, Unit};

const GAP_CONFIDENCE_LOW: f64 = 0.70;
const GAP_CONFIDENCE_HIGH: f64 = 0.90;

/// Map an edge's own confidence into the `[0.70, 0.90]` band a
/// contradiction proposal carries, per spec.md §4.C11.
fn derived_confidence(edge_confidence: f64) -> f64 {
    GAP_CONFIDENCE_LOW + edge_confidence.clamp(0.0, 1.0) * (GAP_CONFIDENCE_HIGH - GAP_CONFIDENCE_LOW)
}

/// One `flag_conflict` proposal per edge whose relation is
/// `competes_with` or `fails_on`.
pub fn propose_contradictions(edges: &[Edge]) -> Vec<AgentProposal> {
    edges
        .iter()
        .filter(|e| matches!(e.relation, Relation::CompetesWith | Relation::FailsOn))
        .map(|e| {
            AgentProposal::new(
                format!("proposal-{}", Uuid::new_v4()),
                AgentType::Contradiction,
                ProposalTarget::FlagConflict { node_a: e.from_node.clone(), node_b: e.to_node.clone() },
                format!("edge {} ({:?}) between {} and {} may indicate a conflict", e.id, e.relation, e.from_node, e.to_node),
                Unit::new(derived_confidence(e.confidence.value())),
            )
        })
        .collect()
}
