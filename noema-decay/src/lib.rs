//! # noema-decay
//!
//! The memory-decay/reinforcement/consolidation engine (spec.md §4.C7):
//! exponential strength decay, reinforcement on access, vector decay
//! scoring, and cluster consolidation. Pure over snapshots — it never
//! touches storage itself.

pub mod consolidation;
pub mod engine;
pub mod formula;

pub use engine::DecayEngine;
