//! Node comparison API, spec.md §4.C10.

use noema_core::config::RetrievalConfig;
use noema_core::model::Node;

#[derive(Debug, Clone, Default)]
pub struct NodeComparison {
    pub similarities: Vec<String>,
    pub differences: Vec<String>,
}

/// Compare two nodes along the five signals spec.md §4.C10 names:
/// same kind, close difficulty, close abstraction, and shared domain as
/// similarities; higher confidence, production use, and a volatility
/// gap as differences.
pub fn compare_nodes(a: &Node, b: &Node, config: &RetrievalConfig) -> NodeComparison {
    let mut similarities = Vec::new();
    let mut differences = Vec::new();

    if a.kind == b.kind {
        similarities.push(format!("both are {:?} nodes", a.kind));
    }

    let delta_difficulty = (a.level.difficulty.value() - b.level.difficulty.value()).abs();
    if delta_difficulty < config.comparison_tolerance {
        similarities.push("comparable difficulty".to_string());
    }

    let delta_abstraction = (a.level.abstraction.value() - b.level.abstraction.value()).abs();
    if delta_abstraction < config.comparison_tolerance {
        similarities.push("comparable abstraction level".to_string());
    }

    if let (Some(da), Some(db)) = (&a.domain, &b.domain) {
        if da == db {
            similarities.push(format!("same domain ({da})"));
        }
    }

    let ca = a.cognitive_state.confidence.value();
    let cb = b.cognitive_state.confidence.value();
    if ca != cb {
        let (higher, lower) = if ca > cb { (&a.name, &b.name) } else { (&b.name, &a.name) };
        differences.push(format!("{higher} has higher confidence than {lower}"));
    }

    if a.real_world.used_in_production != b.real_world.used_in_production {
        let (used, not_used) = if a.real_world.used_in_production { (&a.name, &b.name) } else { (&b.name, &a.name) };
        differences.push(format!("{used} is used in production, {not_used} is not"));
    }

    let delta_volatility = (a.level.volatility.value() - b.level.volatility.value()).abs();
    if delta_volatility > config.volatility_difference_threshold {
        differences.push("volatility differs significantly".to_string());
    }

    NodeComparison { similarities, differences }
}
