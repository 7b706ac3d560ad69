//! # noema-core
//!
//! Foundation crate for the Noema knowledge-graph engine.
//! Defines the data model, storage/embedding traits, errors, and config.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod model;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use errors::{GraphError, GraphResult};
pub use model::{
    AgentProposal, AgentType, Edge, Node, NodeKind, ProposalStatus, ProposalTarget, Relation,
    Unit, VectorPayload,
};
