//! In-process reference backend (spec §4.C3): four maps keyed by id,
//! linear-scan text/vector search, BFS path-finding, single-writer-per-map
//! concurrency via `RwLock`.

mod backend;
mod path;

pub use backend::InProcessBackend;
