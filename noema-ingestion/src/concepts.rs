//! Stage 5 — concept extraction, spec.md §4.C9.
//!
//! A fixed domain vocabulary distinct from `noema_embeddings::vocabulary`
//! (that one backs TF-IDF weighting; this one names the concepts the
//! pipeline tags chunks with). Entries are case-insensitive substrings,
//! multi-word terms included, checked longest-first so e.g. `"gradient
//! descent"` is reported in place of a bare `"gradient"` match.

pub const CONCEPT_VOCABULARY: &[&str] = &[
    "gradient descent",
    "neural network",
    "transformer",
    "attention",
    "backpropagation",
    "embedding",
    "tokenization",
    "overfitting",
    "regularization",
    "convolution",
    "reinforcement learning",
    "supervised learning",
    "unsupervised learning",
    "decision tree",
    "random forest",
    "clustering",
    "dimensionality reduction",
];

/// Match `text` against the domain vocabulary, case-insensitively,
/// returning each hit's canonical (lowercase) form. Invariant: every
/// returned concept is a literal (case-insensitive) substring of `text`.
pub fn extract_concepts(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut terms: Vec<&str> = CONCEPT_VOCABULARY.to_vec();
    terms.sort_by_key(|t| std::cmp::Reverse(t.len()));

    let mut found: Vec<String> = Vec::new();
    for term in terms {
        // Skip a shorter term that is itself a substring of a longer
        // term already accepted (e.g. "attention" inside an already
        // matched "attention framework") so a single mention isn't
        // double-counted under two vocabulary entries.
        if lower.contains(term) && !found.iter().any(|accepted| accepted.contains(term)) {
            found.push(term.to_string());
        }
    }
    found
}

/// Tag a chunk's content with the intersection of document-level
/// extracted concepts and the chunk's own content — invariant 7:
/// every concept listed on a chunk is a substring of that chunk.
pub fn tag_chunk(chunk_content: &str, document_concepts: &[String]) -> Vec<String> {
    let lower = chunk_content.to_lowercase();
    document_concepts.iter().filter(|c| lower.contains(c.as_str())).cloned().collect()
}
