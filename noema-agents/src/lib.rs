//! The five proposal-generating agents. See spec.md §4.C11.
//!
//! All five are pure functions over a storage snapshot — none hold
//! mutable state and none write to storage directly.

pub mod alignment;
pub mod contradiction_agent;
pub mod curriculum_agent;
pub mod ingestion_agent;
pub mod research_agent;

pub use alignment::propose_alignment;
pub use contradiction_agent::propose_contradictions;
pub use curriculum_agent::{missing_prerequisites, propose_curriculum};
pub use ingestion_agent::propose_from_ingestion;
pub use research_agent::propose_gaps;
