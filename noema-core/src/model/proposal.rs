use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::edge::Edge;
use super::node::{Grounding, Node};
use super::scalar::Unit;

/// Which agent produced a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    Ingestion,
    Alignment,
    Contradiction,
    Curriculum,
    Research,
}

/// A proposal's place in its (monotonic) lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Proposed,
    Approved,
    Rejected,
}

/// A partial update to a node: only the fields present are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cognitive_state_confidence: Option<Unit>,
    pub domain: Option<String>,
    /// When present, unioned into the target node's existing grounding
    /// rather than replacing it outright — see the merge-nodes executor
    /// in noema-orchestrator, the only producer of a non-`None` value here.
    pub grounding: Option<Grounding>,
}

/// A partial update to an edge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgePatch {
    pub confidence: Option<Unit>,
    pub conflicting: Option<bool>,
}

/// The intended change a proposal describes, modeled as a sum type with one
/// variant per `AgentProposal::action` — see spec.md §9's explicit design
/// note against an untagged-union target. Each variant carries only the
/// fields its executor needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ProposalTarget {
    CreateNode { node: Node },
    UpdateNode { id: String, patch: NodePatch },
    CreateEdge { edge: Edge },
    UpdateEdge { id: String, patch: EdgePatch },
    MergeNodes { node_a: String, node_b: String },
    FlagConflict { node_a: String, node_b: String },
}

/// A reversible, value-typed description of an intended change to the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProposal {
    pub id: String,
    pub agent_type: AgentType,
    pub target: ProposalTarget,
    pub reasoning: String,
    pub confidence: Unit,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
}

impl AgentProposal {
    pub fn new(
        id: impl Into<String>,
        agent_type: AgentType,
        target: ProposalTarget,
        reasoning: impl Into<String>,
        confidence: Unit,
    ) -> Self {
        Self {
            id: id.into(),
            agent_type,
            target,
            reasoning: reasoning.into(),
            confidence,
            status: ProposalStatus::Proposed,
            created_at: Utc::now(),
        }
    }
}
