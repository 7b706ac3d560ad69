//! Orchestrates the six ingestion stages into one document-level
//! operation, spec.md §4.C9.
//!
//! All-or-nothing per document (spec.md §7's error-propagation
//! paragraph): a failure embedding any chunk discards the whole
//! document rather than storing partial chunks.

use chrono::Utc;
use uuid::Uuid;

use noema_core::config::IngestionConfig;
use noema_core::errors::{GraphError, GraphResult};
use noema_core::model::chunk::DocumentChunk;
use noema_core::model::scalar::Unit;
use noema_core::traits::EmbeddingProvider;

use crate::chunk::chunk_text;
use crate::claim;
use crate::concepts::{extract_concepts, tag_chunk};
use crate::parse::parse;
use crate::section::detect_section;

/// Result of ingesting one document: the source id, its chunks, the
/// distinct set of concepts found across all of them, and each chunk's
/// raw embedding keyed by the chunk's `embedding_id` (storing the
/// vector itself is the caller's job — the ingestion agent writes it
/// through `VectorStore`, per spec.md §4.C11).
#[derive(Debug, Clone)]
pub struct IngestedDocument {
    pub source_id: String,
    pub chunks: Vec<DocumentChunk>,
    pub concepts: Vec<String>,
    pub embeddings: Vec<(String, Vec<f32>)>,
}

/// Run the full pipeline: parse → chunk → section → claim → concepts →
/// embed. `source_id` identifies the document; `embedder` is the
/// injected embedding provider (C8's TF-IDF fallback or an external
/// one, per spec.md §4.C8's non-goal of shipping a production model).
pub fn ingest_document(
    raw: &str,
    source_id: &str,
    config: &IngestionConfig,
    embedder: &dyn EmbeddingProvider,
) -> GraphResult<IngestedDocument> {
    let parsed = parse(raw);
    let windows = chunk_text(&parsed, config.chunk_size, config.overlap);

    let document_concepts = if config.auto_extract_concepts { extract_concepts(&parsed) } else { Vec::new() };

    let now = Utc::now();
    let mut chunks = Vec::with_capacity(windows.len());
    let mut embeddings = Vec::with_capacity(windows.len());
    let mut all_concepts: Vec<String> = Vec::new();

    for window in &windows {
        let section = detect_section(&parsed, window.start);
        let claim_type = claim::classify(&window.content);
        let tags = if config.auto_extract_concepts { tag_chunk(&window.content, &document_concepts) } else { Vec::new() };

        for tag in &tags {
            if !all_concepts.contains(tag) {
                all_concepts.push(tag.clone());
            }
        }

        let embedding = embedder
            .embed(&window.content)
            .map_err(|e| GraphError::Execution(format!("embedding failed for document {source_id}: {e}")))?;
        let embedding_id = format!("emb-{}", Uuid::new_v4());
        embeddings.push((embedding_id.clone(), embedding));

        let mut record = DocumentChunk::new(format!("chunk-{}", Uuid::new_v4()), window.content.clone(), source_id.to_string());
        record.section = section;
        record.claim_type = claim_type;
        record.concept_ids = tags;
        record.embedding_id = Some(embedding_id);
        record.confidence = Unit::new(0.8);
        record.created_at = now;
        chunks.push(record);
    }

    Ok(IngestedDocument { source_id: source_id.to_string(), chunks, concepts: all_concepts, embeddings })
}
