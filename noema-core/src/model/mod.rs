pub mod chunk;
pub mod edge;
pub mod node;
pub mod proposal;
pub mod scalar;
pub mod vector;

pub use chunk::{ClaimType, DocumentChunk};
pub use edge::{Dynamics, Edge, EdgeTemporal, Relation, Weight};
pub use node::{CognitiveState, FailureSurface, Grounding, Level, Node, NodeKind, RealWorld, Temporal};
pub use proposal::{AgentProposal, AgentType, EdgePatch, NodePatch, ProposalStatus, ProposalTarget};
pub use scalar::Unit;
pub use vector::{AbstractionLevel, EmbeddingType, SourceTier, VectorPayload};
