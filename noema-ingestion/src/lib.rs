//! Document ingestion pipeline — parse, chunk, classify, tag, embed.
//! See spec.md §4.C9.

pub mod chunk;
pub mod claim;
pub mod concepts;
pub mod parse;
pub mod pipeline;
pub mod section;

pub use chunk::{chunk_text, Chunk};
pub use claim::classify;
pub use concepts::extract_concepts;
pub use parse::parse;
pub use pipeline::{ingest_document, IngestedDocument};
pub use section::detect_section;
