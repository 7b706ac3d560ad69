//! # noema-storage
//!
//! Pluggable storage backends implementing `noema_core::traits::StorageBackend`:
//! an in-process reference backend (C3), a graph backend (C4), a vector
//! backend (C5), and a hybrid composer of the latter two (C6).

pub mod graph;
pub mod hybrid;
pub mod inprocess;
pub mod search;
pub mod vector;

pub use graph::GraphBackend;
pub use hybrid::HybridComposer;
pub use inprocess::InProcessBackend;
pub use vector::VectorBackend;
