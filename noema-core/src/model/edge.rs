use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scalar::Unit;

/// The nineteen relation labels an edge may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    DependsOn,
    Abstracts,
    Implements,
    Replaces,
    Suppresses,
    InterferesWith,
    RequiresForDebugging,
    Optimizes,
    CausesFailureIn,
    Uses,
    Improves,
    Generalizes,
    Specializes,
    Requires,
    FailsOn,
    IntroducedIn,
    EvaluatedOn,
    CompetesWith,
    DerivedFrom,
}

impl Relation {
    /// Total number of relation labels.
    pub const COUNT: usize = 19;

    /// All variants, for iteration and validation.
    pub const ALL: [Relation; 19] = [
        Self::DependsOn,
        Self::Abstracts,
        Self::Implements,
        Self::Replaces,
        Self::Suppresses,
        Self::InterferesWith,
        Self::RequiresForDebugging,
        Self::Optimizes,
        Self::CausesFailureIn,
        Self::Uses,
        Self::Improves,
        Self::Generalizes,
        Self::Specializes,
        Self::Requires,
        Self::FailsOn,
        Self::IntroducedIn,
        Self::EvaluatedOn,
        Self::CompetesWith,
        Self::DerivedFrom,
    ];
}

/// Edge strength/decay/reinforcement weighting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weight {
    pub strength: Unit,
    pub decay_rate: f64,
    pub reinforcement_rate: f64,
}

impl Default for Weight {
    fn default() -> Self {
        Self {
            strength: Unit::new(1.0),
            decay_rate: 0.0,
            reinforcement_rate: 0.1,
        }
    }
}

/// Whether an edge inhibits its target and whether it is directed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Dynamics {
    pub inhibitory: bool,
    pub directional: bool,
}

/// Edge creation/last-use timestamps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeTemporal {
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl EdgeTemporal {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            last_used_at: now,
        }
    }
}

/// A directed (when `dynamics.directional`) relationship between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub from_node: String,
    pub to_node: String,
    pub relation: Relation,
    pub weight: Weight,
    pub dynamics: Dynamics,
    pub temporal: EdgeTemporal,
    pub confidence: Unit,
    pub conflicting: Option<bool>,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        from_node: impl Into<String>,
        to_node: impl Into<String>,
        relation: Relation,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            from_node: from_node.into(),
            to_node: to_node.into(),
            relation,
            weight: Weight::default(),
            dynamics: Dynamics {
                inhibitory: false,
                directional: true,
            },
            temporal: EdgeTemporal::new(now),
            confidence: Unit::new(0.8),
            conflicting: None,
        }
    }

    /// Validate invariant 2 from spec §8: endpoints are distinct ids
    /// (existence is checked by the storage backend, not the model).
    pub fn validate(&self) -> Result<(), String> {
        if self.from_node.is_empty() || self.to_node.is_empty() {
            return Err(format!("edge {}: endpoints must be non-empty", self.id));
        }
        Ok(())
    }
}
