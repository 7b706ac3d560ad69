//! Vector consolidation: replace a cluster of similar vectors with one
//! synthesized parent plus an abstraction concept node, spec.md §4.C7.

use chrono::Utc;

use noema_core::model::{
    AbstractionLevel, CognitiveState, EmbeddingType, Grounding, Node, NodeKind, SourceTier, Unit,
    VectorPayload,
};

/// A candidate cluster plus the vector the engine synthesizes from it and
/// the concept node it mints to anchor the abstraction in the graph.
#[derive(Debug, Clone)]
pub struct ConsolidationResult {
    pub synthesized_vector: VectorPayload,
    pub abstraction_node: Node,
    pub source_vector_ids: Vec<String>,
}

/// Dimension-wise mean embedding. Panics if vectors disagree on
/// dimension or the slice is empty — callers only invoke this on
/// clusters already validated to share a collection/dimension.
fn mean_embedding(vectors: &[&VectorPayload]) -> Vec<f32> {
    let dim = vectors[0].embedding.len();
    let mut sum = vec![0.0f32; dim];
    for v in vectors {
        for (i, value) in v.embedding.iter().enumerate() {
            sum[i] += value;
        }
    }
    let n = vectors.len() as f32;
    sum.into_iter().map(|s| s / n).collect()
}

/// Build the synthesized vector and abstraction node for one cluster.
/// Cluster membership (similarity above `theta`) is the caller's
/// responsibility — this function only performs the synthesis.
pub fn consolidate(cluster: &[&VectorPayload], concept_name: impl Into<String>) -> ConsolidationResult {
    assert!(cluster.len() >= 2, "a consolidation cluster needs at least 2 members");

    let embedding = mean_embedding(cluster);
    let min_confidence = cluster.iter().map(|v| v.confidence.value()).fold(f64::INFINITY, f64::min);
    let confidence = Unit::new(0.95 * min_confidence);

    let mut entity_refs: Vec<String> = cluster.iter().flat_map(|v| v.entity_refs.clone()).collect();
    entity_refs.sort();
    entity_refs.dedup();

    let shares_lower_tier = cluster.iter().all(|v| v.abstraction_level == cluster[0].abstraction_level);
    let abstraction_level = if shares_lower_tier { cluster[0].abstraction_level.promote() } else { AbstractionLevel::Math };

    let source_tier = cluster[0].source_tier;
    let collection = cluster[0].collection.clone();

    let synthesized_id = format!("consolidated-{}", uuid::Uuid::new_v4());
    let mut synthesized_vector = VectorPayload::new(synthesized_id.clone(), embedding, EmbeddingType::ConceptEmbedding, collection);
    synthesized_vector.confidence = confidence;
    synthesized_vector.entity_refs = entity_refs.clone();
    synthesized_vector.abstraction_level = abstraction_level;
    synthesized_vector.source_tier = source_tier;

    let concept_name = concept_name.into();
    let mut abstraction_node = Node::new(format!("concept-{}", uuid::Uuid::new_v4()), NodeKind::Abstraction, concept_name);
    abstraction_node.cognitive_state = CognitiveState { confidence, ..CognitiveState::default() };
    abstraction_node.grounding = Grounding { source_refs: entity_refs, implementation_refs: Vec::new() };
    abstraction_node.updated_at = Utc::now();

    ConsolidationResult {
        synthesized_vector,
        abstraction_node,
        source_vector_ids: cluster.iter().map(|v| v.id.clone()).collect(),
    }
}

fn greedy_cluster<'a>(vectors: &[&'a VectorPayload], theta: f64, cosine: impl Fn(&[f32], &[f32]) -> f64) -> Vec<Vec<&'a VectorPayload>> {
    let mut remaining: Vec<&VectorPayload> = vectors.to_vec();
    let mut clusters = Vec::new();

    while let Some(seed) = remaining.first().copied() {
        let (matched, unmatched): (Vec<_>, Vec<_>) =
            remaining.into_iter().partition(|v| v.id == seed.id || cosine(&seed.embedding, &v.embedding) >= theta);
        remaining = unmatched;
        if matched.len() >= 2 {
            clusters.push(matched);
        }
    }
    clusters
}

/// Find every cluster of ≥2 vectors above `theta` (default 0.7) sharing a
/// collection, via greedy single-link clustering seeded from whichever
/// vector comes first. Collections are consolidated independently.
pub fn find_clusters<'a>(vectors: &[&'a VectorPayload], theta: f64, cosine: impl Fn(&[f32], &[f32]) -> f64 + Copy) -> Vec<Vec<&'a VectorPayload>> {
    let mut by_collection: std::collections::HashMap<&str, Vec<&VectorPayload>> = std::collections::HashMap::new();
    for v in vectors {
        by_collection.entry(v.collection.as_str()).or_default().push(v);
    }
    by_collection.into_values().flat_map(|group| greedy_cluster(&group, theta, cosine)).collect()
}
