use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scalar::Unit;

/// The claim a document chunk makes, classified by
/// `noema-ingestion`'s heuristic classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    Definition,
    Method,
    Result,
    Limitation,
    Assumption,
    Unknown,
}

/// A window of a source document, produced by the ingestion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: String,
    pub content: String,
    pub source_id: String,
    pub section: String,
    pub claim_type: ClaimType,
    pub concept_ids: Vec<String>,
    pub embedding_id: Option<String>,
    pub confidence: Unit,
    pub created_at: DateTime<Utc>,
}

impl DocumentChunk {
    pub fn new(id: impl Into<String>, content: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            source_id: source_id.into(),
            section: "introduction".to_string(),
            claim_type: ClaimType::Unknown,
            concept_ids: Vec::new(),
            embedding_id: None,
            confidence: Unit::new(0.7),
            created_at: Utc::now(),
        }
    }
}
