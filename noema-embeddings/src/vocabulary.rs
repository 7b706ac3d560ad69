//! Static domain vocabulary with precomputed IDF weights, spec.md §4.C8.
//!
//! Terms outside this list fall back to a neutral IDF of 1.0 — the corpus
//! these weights were derived from is CS/ML domain text (concepts,
//! algorithms, papers), matching the sample content in spec.md §4's
//! scenarios (transformer, attention, gradient descent).

/// `(term, idf)` pairs. IDF values are illustrative precomputed weights:
/// rarer, more specific terms score higher.
pub const VOCABULARY: &[(&str, f32)] = &[
    ("transformer", 2.8),
    ("attention", 2.4),
    ("gradient", 2.1),
    ("descent", 2.1),
    ("algorithm", 1.6),
    ("concept", 1.3),
    ("embedding", 2.5),
    ("vector", 1.8),
    ("network", 1.5),
    ("neural", 2.0),
    ("optimization", 2.2),
    ("inference", 2.3),
    ("backpropagation", 3.1),
    ("regularization", 2.9),
    ("convolution", 2.7),
    ("recurrent", 2.6),
    ("tokenization", 2.4),
    ("normalization", 2.2),
    ("activation", 1.9),
    ("architecture", 1.7),
    ("hyperparameter", 2.8),
    ("overfitting", 2.6),
    ("dataset", 1.4),
    ("benchmark", 1.8),
    ("latency", 1.9),
    ("throughput", 2.0),
    ("quantization", 2.9),
    ("distillation", 2.9),
    ("reinforcement", 2.3),
    ("supervised", 1.8),
];

/// Neutral IDF applied to terms not present in the static vocabulary.
pub const DEFAULT_IDF: f32 = 1.0;

/// Look up a term's precomputed IDF, falling back to `DEFAULT_IDF`.
pub fn idf_for(term: &str) -> f32 {
    VOCABULARY
        .iter()
        .find(|(vocab_term, _)| *vocab_term == term)
        .map(|(_, idf)| *idf)
        .unwrap_or(DEFAULT_IDF)
}
