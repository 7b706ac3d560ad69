//! Proposal queue, execution dispatch, and batch-ingestion scheduling,
//! spec.md §4.C12 / §5.

pub mod batch;
pub mod engine;
pub mod queue;

pub use batch::{rollback, BatchCoordinator, BatchJob, BatchJobStatus, DocumentProcessor, DocumentTask, DEFAULT_WORKER_COUNT};
pub use engine::{Orchestrator, OrchestratorConfig, WorkflowSummary};
pub use queue::ProposalQueue;
