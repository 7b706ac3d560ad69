//! # noema-embeddings
//!
//! The deterministic embedding/text core (spec.md §4.C8): tokenization,
//! a TF-IDF fallback `EmbeddingProvider`, cosine similarity, and keyword
//! extraction. No network calls, no model weights — always available.

pub mod cosine;
pub mod keywords;
pub mod tfidf;
pub mod tokenize;
pub mod vocabulary;

pub use cosine::cosine;
pub use keywords::top_keywords;
pub use tfidf::TfIdfProvider;
pub use tokenize::tokenize;
