//! Curriculum agent, spec.md §4.C11.
//!
//! BFS backwards from a target node through `requires`/`depends_on`
//! edges, collecting prerequisites the learner doesn't already know,
//! ordered by ascending difficulty. Informational only: the proposal's
//! target carries a no-op node patch (see DESIGN.md — `ProposalTarget`
//! has no dedicated informational variant, and an empty `NodePatch`
//! genuinely mutates nothing when executed, matching "no storage
//! mutation by default").

use std::collections::HashSet;

use uuid::Uuid;

use noema_core::errors::GraphResult;
use noema_core::model::{AgentProposal, AgentType, Node, NodePatch, ProposalTarget, Relation, Unit};
use noema_core::traits::{EdgeStore, NodeStore};

const CURRICULUM_RELATIONS: [Relation; 2] = [Relation::Requires, Relation::DependsOn];
const CURRICULUM_PROPOSAL_CONFIDENCE: f64 = 0.75;

/// The prerequisite list for `target`, sorted ascending by
/// `level.difficulty`, excluding ids already in `known`.
pub fn missing_prerequisites(
    edges: &dyn EdgeStore,
    nodes: &dyn NodeStore,
    target: &str,
    known: &HashSet<String>,
) -> GraphResult<Vec<Node>> {
    let mut visited: HashSet<String> = HashSet::from([target.to_string()]);
    let mut frontier = vec![target.to_string()];
    let mut missing = Vec::new();

    while !frontier.is_empty() {
        let mut next_frontier = Vec::new();
        for node_id in &frontier {
            for edge in edges.edges_to(node_id)? {
                if !CURRICULUM_RELATIONS.contains(&edge.relation) || !visited.insert(edge.from_node.clone()) {
                    continue;
                }
                if let Some(node) = nodes.get_node(&edge.from_node)? {
                    if !known.contains(&node.id) {
                        missing.push(node);
                    }
                }
                next_frontier.push(edge.from_node);
            }
        }
        frontier = next_frontier;
    }

    missing.sort_by(|a, b| a.level.difficulty.value().partial_cmp(&b.level.difficulty.value()).unwrap());
    Ok(missing)
}

/// One informational proposal per missing prerequisite.
pub fn propose_curriculum(
    edges: &dyn EdgeStore,
    nodes: &dyn NodeStore,
    target: &str,
    known: &HashSet<String>,
) -> GraphResult<Vec<AgentProposal>> {
    let missing = missing_prerequisites(edges, nodes, target, known)?;
    Ok(missing
        .into_iter()
        .map(|node| {
            AgentProposal::new(
                format!("proposal-{}", Uuid::new_v4()),
                AgentType::Curriculum,
                ProposalTarget::UpdateNode { id: node.id.clone(), patch: NodePatch::default() },
                format!("\"{}\" is an unmet prerequisite of \"{target}\" (difficulty {:.2})", node.name, node.level.difficulty.value()),
                Unit::new(CURRICULUM_PROPOSAL_CONFIDENCE),
            )
        })
        .collect())
}
