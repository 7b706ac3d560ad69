//! Research agent, spec.md §4.C11.
//!
//! Surfaces low-confidence or disconnected nodes as knowledge gaps.
//! Like the curriculum agent, these are informational-only proposals
//! (see `curriculum_agent.rs`'s doc comment for the no-op `UpdateNode`
//! representation rationale).

use std::collections::HashMap;

use uuid::Uuid;

use noema_core::model::{AgentProposal, AgentType, Edge, Node, NodePatch, ProposalTarget, Unit};

const LOW_CONFIDENCE_THRESHOLD: f64 = 0.70;
const GAP_CONFIDENCE_LOW: f64 = 0.60;
const GAP_CONFIDENCE_HIGH: f64 = 0.70;

fn incident_counts(edges: &[Edge]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for edge in edges {
        *counts.entry(edge.from_node.clone()).or_insert(0) += 1;
        *counts.entry(edge.to_node.clone()).or_insert(0) += 1;
    }
    counts
}

/// Gap confidence scales inversely with the node's own confidence: a
/// near-zero-confidence node produces a near-`0.70` gap proposal, a
/// node just under the threshold produces a near-`0.60` one.
fn gap_confidence(node_confidence: f64) -> f64 {
    let factor = 1.0 - (node_confidence.clamp(0.0, LOW_CONFIDENCE_THRESHOLD) / LOW_CONFIDENCE_THRESHOLD);
    GAP_CONFIDENCE_LOW + factor * (GAP_CONFIDENCE_HIGH - GAP_CONFIDENCE_LOW)
}

/// One gap proposal per node with `confidence < 0.70` or with no
/// incident edges at all.
pub fn propose_gaps(nodes: &[Node], edges: &[Edge]) -> Vec<AgentProposal> {
    let counts = incident_counts(edges);
    nodes
        .iter()
        .filter(|n| n.cognitive_state.confidence.value() < LOW_CONFIDENCE_THRESHOLD || counts.get(&n.id).copied().unwrap_or(0) == 0)
        .map(|n| {
            let reason = if counts.get(&n.id).copied().unwrap_or(0) == 0 {
                format!("\"{}\" has no incident edges", n.name)
            } else {
                format!("\"{}\" has low confidence ({:.2})", n.name, n.cognitive_state.confidence.value())
            };
            AgentProposal::new(
                format!("proposal-{}", Uuid::new_v4()),
                AgentType::Research,
                ProposalTarget::UpdateNode { id: n.id.clone(), patch: NodePatch::default() },
                reason,
                Unit::new(gap_confidence(n.cognitive_state.confidence.value())),
            )
        })
        .collect()
}
