use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scalar::Unit;

/// The six embedding content categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingType {
    ConceptEmbedding,
    MethodExplanation,
    PaperClaim,
    FailureCase,
    CodePattern,
    Comparison,
}

/// The four abstraction levels a vector's source material sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbstractionLevel {
    Theory,
    Math,
    Intuition,
    Code,
}

impl AbstractionLevel {
    /// One tier up, per the consolidation promotion rule in spec §4.C7:
    /// `code -> intuition`, everything else `-> math`.
    pub fn promote(self) -> Self {
        match self {
            Self::Code => Self::Intuition,
            _ => Self::Math,
        }
    }
}

/// The four source-provenance tiers, `T1` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceTier {
    T1,
    T2,
    T3,
    T4,
}

/// A fixed-dimension embedding plus the metadata needed to filter and
/// decay it. All vectors within one collection share dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorPayload {
    pub id: String,
    pub embedding: Vec<f32>,
    pub embedding_type: EmbeddingType,
    pub collection: String,
    pub entity_refs: Vec<String>,
    pub confidence: Unit,
    pub abstraction_level: AbstractionLevel,
    pub source_tier: SourceTier,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub decay_score: Option<Unit>,
}

impl VectorPayload {
    pub fn new(
        id: impl Into<String>,
        embedding: Vec<f32>,
        embedding_type: EmbeddingType,
        collection: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            embedding,
            embedding_type,
            collection: collection.into(),
            entity_refs: Vec::new(),
            confidence: Unit::new(0.8),
            abstraction_level: AbstractionLevel::Intuition,
            source_tier: SourceTier::T3,
            created_at: now,
            updated_at: now,
            decay_score: None,
        }
    }
}
