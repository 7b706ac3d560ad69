//! Semantic query pipeline, spec.md §4.C10: candidate gather → filter →
//! rank → explain.

use noema_core::config::RetrievalConfig;
use noema_core::errors::GraphResult;
use noema_core::model::{Node, NodeKind};
use noema_core::traits::NodeStore;
use tracing::debug;

/// Node-kind / difficulty / abstraction filters applied after candidate
/// gathering. Source-tier filtering lives on the vector side
/// (`VectorFilter` in `noema-core::traits`), not here: `Node` — the type
/// `searchByText` returns — carries no source-tier field in this model,
/// only `VectorPayload` does, so there is nothing on a node candidate to
/// filter against.
#[derive(Debug, Clone, Default)]
pub struct QueryFilters {
    pub kinds: Option<Vec<NodeKind>>,
    pub difficulty_range: Option<(f64, f64)>,
    pub abstraction_range: Option<(f64, f64)>,
}

impl QueryFilters {
    fn matches(&self, node: &Node) -> bool {
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&node.kind) {
                return false;
            }
        }
        if let Some((lo, hi)) = self.difficulty_range {
            let d = node.level.difficulty.value();
            if d < lo || d > hi {
                return false;
            }
        }
        if let Some((lo, hi)) = self.abstraction_range {
            let a = node.level.abstraction.value();
            if a < lo || a > hi {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct SemanticQuery {
    pub query: String,
    pub limit: Option<usize>,
    pub filters: Option<QueryFilters>,
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QueryResult {
    pub nodes: Vec<Node>,
    pub explanation: String,
}

fn rank_key(query: &str, node: &Node) -> (bool, u64, u64) {
    let exact = node.name.eq_ignore_ascii_case(query);
    // Sort descending on (exact, confidence, strength); floats don't
    // implement Ord, so quantize to a comparable integer.
    let confidence = (node.cognitive_state.confidence.value() * 1_000_000.0) as u64;
    let strength = (node.cognitive_state.strength.value() * 1_000_000.0) as u64;
    (exact, confidence, strength)
}

fn explain(query: &str, ranked: &[Node]) -> String {
    let Some(top) = ranked.first() else {
        return format!("No results found for \"{query}\".");
    };
    let related: Vec<&str> = ranked.iter().skip(1).take(2).map(|n| n.name.as_str()).collect();
    if related.is_empty() {
        format!("Top match for \"{query}\" is {}.", top.name)
    } else {
        format!("Top match for \"{query}\" is {}, related to {}.", top.name, related.join(" and "))
    }
}

/// Run the full semantic-query pipeline against a node store.
pub fn run_query(storage: &dyn NodeStore, query: &SemanticQuery, config: &RetrievalConfig) -> GraphResult<QueryResult> {
    let limit = query.limit.unwrap_or(config.default_limit);
    let candidates = storage.search_nodes_by_text(&query.query, limit)?;
    debug!(candidates = candidates.len(), query = %query.query, "semantic query gathered candidates");

    let mut filtered: Vec<Node> = match &query.filters {
        Some(filters) => candidates.into_iter().filter(|n| filters.matches(n)).collect(),
        None => candidates,
    };

    filtered.sort_by(|a, b| rank_key(&query.query, b).cmp(&rank_key(&query.query, a)));

    let explanation = explain(&query.query, &filtered);
    Ok(QueryResult { nodes: filtered, explanation })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use noema_core::errors::GraphError;
    use noema_core::model::{CognitiveState, Temporal, Unit};
    use noema_core::traits::Page;
    use std::sync::RwLock;

    struct FakeStore {
        nodes: RwLock<Vec<Node>>,
    }

    impl NodeStore for FakeStore {
        fn create_node(&self, node: &Node) -> GraphResult<()> {
            self.nodes.write().unwrap().push(node.clone());
            Ok(())
        }
        fn get_node(&self, id: &str) -> GraphResult<Option<Node>> {
            Ok(self.nodes.read().unwrap().iter().find(|n| n.id == id).cloned())
        }
        fn update_node(&self, _id: &str, _patch: &noema_core::model::NodePatch) -> GraphResult<()> {
            Err(GraphError::NotSupported("fake store".into()))
        }
        fn delete_node(&self, _id: &str) -> GraphResult<bool> {
            Ok(false)
        }
        fn list_nodes(&self, _page: usize, _limit: usize) -> GraphResult<Page<Node>> {
            Err(GraphError::NotSupported("fake store".into()))
        }
        fn search_nodes_by_text(&self, query: &str, limit: usize) -> GraphResult<Vec<Node>> {
            let q = query.to_lowercase();
            Ok(self
                .nodes
                .read()
                .unwrap()
                .iter()
                .filter(|n| n.name.to_lowercase().contains(&q) || n.description.to_lowercase().contains(&q))
                .take(limit)
                .cloned()
                .collect())
        }
        fn nodes_by_type(&self, _kind: NodeKind, _limit: usize) -> GraphResult<Vec<Node>> {
            Err(GraphError::NotSupported("fake store".into()))
        }
    }

    fn node(id: &str, name: &str, confidence: f64, strength: f64) -> Node {
        let mut n = Node::new(id, NodeKind::Concept, name);
        n.cognitive_state = CognitiveState { confidence: Unit::new(confidence), strength: Unit::new(strength), ..n.cognitive_state };
        n.temporal = Temporal::new(Utc::now());
        n
    }

    #[test]
    fn exact_name_match_ranks_first() {
        let store = FakeStore { nodes: RwLock::new(vec![node("n1", "attention mechanisms", 0.9, 0.9), node("n2", "attention", 0.5, 0.5)]) };
        let query = SemanticQuery { query: "attention".to_string(), ..Default::default() };
        let result = run_query(&store, &query, &RetrievalConfig::default()).unwrap();
        assert_eq!(result.nodes[0].id, "n2");
    }

    #[test]
    fn ties_on_exact_match_break_by_confidence_then_strength() {
        let store = FakeStore {
            nodes: RwLock::new(vec![node("n1", "transformer", 0.6, 0.9), node("n2", "transformer", 0.9, 0.1)]),
        };
        let query = SemanticQuery { query: "transformer".to_string(), ..Default::default() };
        let result = run_query(&store, &query, &RetrievalConfig::default()).unwrap();
        assert_eq!(result.nodes[0].id, "n2");
    }

    #[test]
    fn filters_restrict_candidates_by_node_kind() {
        let mut algo = node("n1", "gradient descent", 0.8, 0.8);
        algo.kind = NodeKind::Algorithm;
        let store = FakeStore { nodes: RwLock::new(vec![algo, node("n2", "gradient descent explained", 0.5, 0.5)]) };
        let query = SemanticQuery {
            query: "gradient".to_string(),
            filters: Some(QueryFilters { kinds: Some(vec![NodeKind::Algorithm]), ..Default::default() }),
            ..Default::default()
        };
        let result = run_query(&store, &query, &RetrievalConfig::default()).unwrap();
        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.nodes[0].id, "n1");
    }

    #[test]
    fn explanation_names_the_top_match_and_up_to_two_related() {
        let store = FakeStore {
            nodes: RwLock::new(vec![node("n1", "transformer", 0.9, 0.9), node("n2", "attention", 0.8, 0.8), node("n3", "embedding", 0.1, 0.1)]),
        };
        let query = SemanticQuery { query: "e".to_string(), limit: Some(10), ..Default::default() };
        let result = run_query(&store, &query, &RetrievalConfig::default()).unwrap();
        assert!(result.explanation.contains("transformer"));
    }

    #[test]
    fn no_candidates_yields_an_empty_explanation_message() {
        let store = FakeStore { nodes: RwLock::new(vec![]) };
        let query = SemanticQuery { query: "nothing".to_string(), ..Default::default() };
        let result = run_query(&store, &query, &RetrievalConfig::default()).unwrap();
        assert!(result.nodes.is_empty());
        assert!(result.explanation.contains("No results"));
    }
}
