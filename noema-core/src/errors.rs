//! Error kinds surfaced by the core, per spec §7.
//!
//! A single flat `thiserror` enum rather than per-subsystem enums
//! aggregated by a union — every component in this workspace shares the
//! same seven kinds, so one enum is the more faithful fit (see DESIGN.md).

use thiserror::Error;

/// Every fallible operation in the workspace returns `GraphResult<T>`.
pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    /// Input fails a data-model invariant or range constraint.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Referenced id does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Id collision on create.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Operation unavailable on this backend.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Deadline exceeded.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Health check failed or transport error.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Proposal execution failure; recorded on the proposal, not propagated.
    #[error("execution error: {0}")]
    Execution(String),
}

impl GraphError {
    /// HTTP status code a host integration should map this error to,
    /// per spec §7's "User-visible behavior" table.
    pub fn status_code(&self) -> u16 {
        match self {
            GraphError::Validation(_) => 400,
            GraphError::NotFound(_) => 404,
            GraphError::Conflict(_) => 409,
            GraphError::NotSupported(_) => 501,
            GraphError::BackendUnavailable(_) => 503,
            GraphError::Timeout(_) => 504,
            GraphError::Execution(_) => 500,
        }
    }
}
