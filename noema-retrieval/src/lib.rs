//! Semantic query, node comparison, and prerequisite traversal.
//! See spec.md §4.C10.

pub mod compare;
pub mod prerequisites;
pub mod query;

pub use compare::{compare_nodes, NodeComparison};
pub use prerequisites::prerequisites;
pub use query::{run_query, QueryFilters, QueryResult, SemanticQuery};
