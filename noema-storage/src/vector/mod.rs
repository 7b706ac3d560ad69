//! Vector-only backend (spec §4.C5): collections of fixed-dimension
//! embeddings. No node/edge/chunk/path support — see the `NodeStore`,
//! `EdgeStore`, `PathFinder`, and `ChunkStore` impls.

mod backend;

pub use backend::VectorBackend;
