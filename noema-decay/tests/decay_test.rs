use chrono::Utc;

use noema_core::config::DecayConfig;
use noema_core::model::{EmbeddingType, Node, NodeKind, VectorPayload};
use noema_decay::DecayEngine;

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| (*x as f64) * (*y as f64)).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[test]
fn invariant_9_reinforcement_saturates_in_the_limit() {
    let engine = DecayEngine::new(DecayConfig::default());
    let mut node = Node::new("n1", NodeKind::Concept, "n1");
    node.cognitive_state.strength = noema_core::model::Unit::new(0.1);
    for _ in 0..50 {
        let (state, temporal) = engine.reinforce(&node, Utc::now());
        node.cognitive_state = state;
        node.temporal = temporal;
    }
    assert!((node.cognitive_state.strength.value() - 1.0).abs() < 1e-6);
}

#[test]
fn full_pass_consolidates_a_cluster_into_one_synthesized_vector_and_concept_node() {
    let engine = DecayEngine::new(DecayConfig::default());
    let a = VectorPayload::new("a", vec![1.0, 0.0], EmbeddingType::ConceptEmbedding, "c1");
    let b = VectorPayload::new("b", vec![0.98, 0.02], EmbeddingType::ConceptEmbedding, "c1");
    let refs = vec![&a, &b];

    let results = engine.consolidate(&refs, cosine, |cluster| format!("merged-{}", cluster.len()));

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.source_vector_ids.len(), 2);
    assert_eq!(result.abstraction_node.kind, NodeKind::Abstraction);
}

#[test]
fn single_flight_guard_and_scheduler_compose() {
    let engine = DecayEngine::new(DecayConfig::default());
    let now = Utc::now();
    assert!(engine.should_run(now));
    assert!(engine.try_begin_pass());
    engine.end_pass(now);
    assert!(!engine.should_run(now));
}
