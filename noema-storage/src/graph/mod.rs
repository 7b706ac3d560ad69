//! Graph-only backend (spec §4.C4): a `petgraph` directed graph plus the
//! secondary indices the spec calls out by name, backing nodes, edges,
//! chunks, and paths. No vector support — see `VectorStore` impl.

mod backend;

pub use backend::GraphBackend;
