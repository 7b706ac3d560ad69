//! Prerequisite traversal API, spec.md §4.C10.
//!
//! Walks incoming edges whose relation is one of `requires`,
//! `depends_on`, or `requires_for_debugging` up to a fixed depth,
//! collecting the source nodes encountered — a level-order BFS over
//! `EdgeStore::edges_to`, deduplicated against nodes already visited.

use std::collections::HashSet;

use noema_core::errors::GraphResult;
use noema_core::model::{Node, Relation};
use noema_core::traits::{EdgeStore, NodeStore};

const PREREQUISITE_RELATIONS: [Relation; 3] = [Relation::Requires, Relation::DependsOn, Relation::RequiresForDebugging];

/// Nodes reachable from `start` by walking prerequisite edges backward,
/// up to `depth` hops. `start` itself is never included.
pub fn prerequisites(
    edges: &dyn EdgeStore,
    nodes: &dyn NodeStore,
    start: &str,
    depth: usize,
) -> GraphResult<Vec<Node>> {
    let mut visited: HashSet<String> = HashSet::from([start.to_string()]);
    let mut frontier = vec![start.to_string()];
    let mut result = Vec::new();

    for _ in 0..depth {
        let mut next_frontier = Vec::new();
        for node_id in &frontier {
            for edge in edges.edges_to(node_id)? {
                if !PREREQUISITE_RELATIONS.contains(&edge.relation) {
                    continue;
                }
                if visited.insert(edge.from_node.clone()) {
                    if let Some(node) = nodes.get_node(&edge.from_node)? {
                        result.push(node);
                    }
                    next_frontier.push(edge.from_node);
                }
            }
        }
        if next_frontier.is_empty() {
            break;
        }
        frontier = next_frontier;
    }

    Ok(result)
}
