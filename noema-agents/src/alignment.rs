//! Alignment agent, spec.md §4.C11.
//!
//! For each unordered pair of nodes whose names are near-duplicates
//! (Levenshtein-ratio similarity at or above a threshold), proposes
//! merging them. Grounded on `strsim::normalized_levenshtein`, the same
//! crate/function the alignment-adjacent examples use for name matching.

use uuid::Uuid;

use noema_core::model::{AgentProposal, AgentType, Node, ProposalTarget, Unit};

pub const DEFAULT_ALIGNMENT_THRESHOLD: f64 = 0.85;

/// One `merge_nodes` proposal per pair of nodes whose name similarity
/// meets `threshold`, confidence set to that similarity.
pub fn propose_alignment(nodes: &[Node], threshold: f64) -> Vec<AgentProposal> {
    let mut proposals = Vec::new();
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let a = &nodes[i];
            let b = &nodes[j];
            let similarity = strsim::normalized_levenshtein(&a.name.to_lowercase(), &b.name.to_lowercase());
            if similarity >= threshold {
                proposals.push(AgentProposal::new(
                    format!("proposal-{}", Uuid::new_v4()),
                    AgentType::Alignment,
                    ProposalTarget::MergeNodes { node_a: a.id.clone(), node_b: b.id.clone() },
                    format!("\"{}\" and \"{}\" are {:.0}% similar by name", a.name, b.name, similarity * 100.0),
                    Unit::new(similarity),
                ));
            }
        }
    }
    proposals
}

#[cfg(test)]
mod tests {
    use super::*;
    use noema_core::model::NodeKind;

    #[test]
    fn proposes_a_merge_for_near_duplicate_names() {
        let nodes = vec![Node::new("n1", NodeKind::Concept, "transformer"), Node::new("n2", NodeKind::Concept, "transformers")];
        let proposals = propose_alignment(&nodes, DEFAULT_ALIGNMENT_THRESHOLD);
        assert_eq!(proposals.len(), 1);
        match &proposals[0].target {
            ProposalTarget::MergeNodes { node_a, node_b } => {
                assert_eq!(node_a, "n1");
                assert_eq!(node_b, "n2");
            }
            _ => panic!("expected MergeNodes"),
        }
    }

    #[test]
    fn does_not_propose_a_merge_below_threshold() {
        let nodes = vec![Node::new("n1", NodeKind::Concept, "transformer"), Node::new("n2", NodeKind::Concept, "recurrent network")];
        let proposals = propose_alignment(&nodes, DEFAULT_ALIGNMENT_THRESHOLD);
        assert!(proposals.is_empty());
    }

    #[test]
    fn confidence_equals_the_similarity_score() {
        let nodes = vec![Node::new("n1", NodeKind::Concept, "transformer"), Node::new("n2", NodeKind::Concept, "transformers")];
        let proposals = propose_alignment(&nodes, 0.5);
        let expected = strsim::normalized_levenshtein("transformer", "transformers");
        assert!((proposals[0].confidence.value() - expected).abs() < 1e-9);
    }

    #[test]
    fn each_unordered_pair_is_considered_once() {
        let nodes = vec![
            Node::new("n1", NodeKind::Concept, "alpha"),
            Node::new("n2", NodeKind::Concept, "alpha"),
            Node::new("n3", NodeKind::Concept, "alpha"),
        ];
        let proposals = propose_alignment(&nodes, DEFAULT_ALIGNMENT_THRESHOLD);
        assert_eq!(proposals.len(), 3);
    }
}
