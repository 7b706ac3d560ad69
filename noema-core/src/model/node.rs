use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scalar::Unit;

/// The nine kinds of knowledge node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Concept,
    Algorithm,
    System,
    Api,
    Paper,
    Tool,
    FailureMode,
    Optimization,
    Abstraction,
}

impl NodeKind {
    /// Total number of node kinds.
    pub const COUNT: usize = 9;

    /// All variants, for iteration and validation.
    pub const ALL: [NodeKind; 9] = [
        Self::Concept,
        Self::Algorithm,
        Self::System,
        Self::Api,
        Self::Paper,
        Self::Tool,
        Self::FailureMode,
        Self::Optimization,
        Self::Abstraction,
    ];
}

/// Abstraction/difficulty/volatility, all in `[0,1]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Level {
    pub abstraction: Unit,
    pub difficulty: Unit,
    pub volatility: Unit,
}

impl Default for Level {
    fn default() -> Self {
        Self {
            abstraction: Unit::new(0.5),
            difficulty: Unit::new(0.5),
            volatility: Unit::new(0.2),
        }
    }
}

/// Strength/activation/decay_rate/confidence — the node's temporal cognitive
/// state, mutated by the decay engine and by reinforcement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CognitiveState {
    pub strength: Unit,
    pub activation: Unit,
    /// Per-node decay rate override. `None` means "use `base_lambda`".
    pub decay_rate: Option<f64>,
    pub confidence: Unit,
}

impl Default for CognitiveState {
    fn default() -> Self {
        Self {
            strength: Unit::new(1.0),
            activation: Unit::new(0.0),
            decay_rate: None,
            confidence: Unit::new(0.5),
        }
    }
}

/// Introduced/last-reinforced/peak-relevance timestamps.
///
/// Invariant: `introduced_at <= last_reinforced_at`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Temporal {
    pub introduced_at: DateTime<Utc>,
    pub last_reinforced_at: DateTime<Utc>,
    pub peak_relevance_at: DateTime<Utc>,
}

impl Temporal {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            introduced_at: now,
            last_reinforced_at: now,
            peak_relevance_at: now,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.introduced_at <= self.last_reinforced_at
    }
}

/// Real-world relevance signals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RealWorld {
    pub used_in_production: bool,
    pub companies_using: u64,
    pub avg_salary_weight: Unit,
    pub interview_frequency: Unit,
}

impl Default for RealWorld {
    fn default() -> Self {
        Self {
            used_in_production: false,
            companies_using: 0,
            avg_salary_weight: Unit::ZERO,
            interview_frequency: Unit::ZERO,
        }
    }
}

/// Source and implementation provenance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grounding {
    /// Ordered sequence of source URIs (papers, docs, articles).
    pub source_refs: Vec<String>,
    /// Ordered sequence of implementation URIs (repos, files).
    pub implementation_refs: Vec<String>,
}

/// Node ids of known failure modes and misconceptions attached to this node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FailureSurface {
    pub common_bugs: Vec<String>,
    pub misconceptions: Vec<String>,
}

/// A knowledge-graph node: a cognitive entity with temporal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub name: String,
    pub description: String,
    pub level: Level,
    pub cognitive_state: CognitiveState,
    pub temporal: Temporal,
    pub real_world: RealWorld,
    pub grounding: Grounding,
    pub failure_surface: FailureSurface,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub canonical_name: Option<String>,
    pub first_appearance_year: Option<i32>,
    pub domain: Option<String>,
}

impl Node {
    /// Construct a new node with fresh bookkeeping timestamps.
    pub fn new(id: impl Into<String>, kind: NodeKind, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            description: String::new(),
            level: Level::default(),
            cognitive_state: CognitiveState::default(),
            temporal: Temporal::new(now),
            real_world: RealWorld::default(),
            grounding: Grounding::default(),
            failure_surface: FailureSurface::default(),
            created_at: now,
            updated_at: now,
            canonical_name: None,
            first_appearance_year: None,
            domain: None,
        }
    }

    /// Validate every invariant from spec §3/§8-invariant-1.
    ///
    /// `Unit`-typed fields are clamped by construction and so can never
    /// fail their range check; the remaining invariant is the temporal
    /// ordering constraint.
    pub fn validate(&self) -> Result<(), String> {
        if !self.temporal.is_valid() {
            return Err(format!(
                "node {}: introduced_at ({}) must be <= last_reinforced_at ({})",
                self.id, self.temporal.introduced_at, self.temporal.last_reinforced_at
            ));
        }
        Ok(())
    }
}
