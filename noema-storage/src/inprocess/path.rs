use std::collections::{HashMap, HashSet, VecDeque};

use noema_core::model::Edge;

/// Breadth-first shortest path by hop count, bounded by `max_depth` hops.
/// Edges are traversed `from_node -> to_node`; non-directional edges are
/// also traversed in reverse. Returns the edges of the first path found,
/// or empty if none exists within the bound.
pub fn bfs_path<'a>(edges: impl Iterator<Item = &'a Edge>, from: &str, to: &str, max_depth: usize) -> Vec<Edge> {
    if from == to {
        return Vec::new();
    }

    let mut adjacency: HashMap<&str, Vec<&Edge>> = HashMap::new();
    let edges: Vec<&Edge> = edges.collect();
    for edge in &edges {
        adjacency.entry(edge.from_node.as_str()).or_default().push(edge);
        if !edge.dynamics.directional {
            adjacency.entry(edge.to_node.as_str()).or_default().push(edge);
        }
    }

    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(from);
    let mut queue: VecDeque<(&str, Vec<&Edge>)> = VecDeque::new();
    queue.push_back((from, Vec::new()));

    while let Some((node, path)) = queue.pop_front() {
        if path.len() >= max_depth {
            continue;
        }
        let Some(neighbors) = adjacency.get(node) else {
            continue;
        };
        for edge in neighbors {
            let next = if edge.from_node == node { edge.to_node.as_str() } else { edge.from_node.as_str() };
            if next == to {
                let mut full = path.clone();
                full.push(*edge);
                return full.into_iter().cloned().collect();
            }
            if visited.insert(next) {
                let mut extended = path.clone();
                extended.push(*edge);
                queue.push_back((next, extended));
            }
        }
    }

    Vec::new()
}
