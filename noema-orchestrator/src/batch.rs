//! Batch ingestion, spec.md §5's "Batch ingestion" paragraph: a job map
//! (the second of the two pieces of shared mutable state this crate
//! owns, alongside the proposal queue) plus a `tokio::task` worker pool
//! of default size 4 pulling documents from a bounded channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::mpsc;

use noema_core::errors::GraphResult;
use noema_core::traits::{NodeStore, TransactionOps};

use crate::engine::fetch_all_nodes;

pub const DEFAULT_WORKER_COUNT: usize = 4;

/// One document awaiting ingestion as part of a batch job.
#[derive(Debug, Clone)]
pub struct DocumentTask {
    pub job_id: String,
    pub source_id: String,
    pub raw_text: String,
}

/// Caller-supplied ingestion-and-store step for a single document.
/// Kept as a trait rather than a plain closure so it can be shared
/// across worker tasks behind an `Arc`.
pub trait DocumentProcessor: Send + Sync {
    fn process(&self, task: &DocumentTask) -> GraphResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchJobStatus {
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone)]
pub struct BatchJob {
    pub id: String,
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub errors: Vec<String>,
    pub status: BatchJobStatus,
}

impl BatchJob {
    fn new(id: String, total: usize) -> Self {
        Self {
            id,
            total,
            processed: 0,
            failed: 0,
            started_at: Utc::now(),
            ended_at: None,
            errors: Vec::new(),
            status: BatchJobStatus::Running,
        }
    }
}

/// Owns the batch-job map and per-job cancellation flags. Each is
/// guarded by its own structure (`DashMap`/`Arc<AtomicBool>`) rather
/// than one global lock, per spec.md §5's "Shared resources" paragraph.
#[derive(Default)]
pub struct BatchCoordinator {
    jobs: DashMap<String, Arc<Mutex<BatchJob>>>,
    cancel_flags: DashMap<String, Arc<AtomicBool>>,
}

impl BatchCoordinator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn get_job(&self, job_id: &str) -> Option<BatchJob> {
        self.jobs.get(job_id).map(|j| j.lock().unwrap().clone())
    }

    /// Registers a job and spawns its worker pool in the background;
    /// returns immediately with the job id. Progress is observed via
    /// `get_job`.
    pub fn submit_job(
        &self,
        job_id: impl Into<String>,
        documents: Vec<DocumentTask>,
        processor: Arc<dyn DocumentProcessor>,
        workers: usize,
    ) -> String {
        let job_id = job_id.into();
        let job = Arc::new(Mutex::new(BatchJob::new(job_id.clone(), documents.len())));
        self.jobs.insert(job_id.clone(), job.clone());
        let cancel_flag = Arc::new(AtomicBool::new(false));
        self.cancel_flags.insert(job_id.clone(), cancel_flag.clone());

        let worker_count = workers.max(1);
        tokio::spawn(run_job(job, cancel_flag, documents, processor, worker_count));
        job_id
    }

    /// Marks the job failed and stops feeding it further documents. A
    /// worker mid-document finishes that document (it may be short)
    /// before observing the flag.
    pub fn cancel_job(&self, job_id: &str) {
        if let Some(flag) = self.cancel_flags.get(job_id) {
            flag.store(true, Ordering::SeqCst);
        }
        if let Some(job) = self.jobs.get(job_id) {
            let mut job = job.lock().unwrap();
            job.status = BatchJobStatus::Failed;
            job.ended_at = Some(Utc::now());
        }
    }
}

async fn run_job(
    job: Arc<Mutex<BatchJob>>,
    cancel_flag: Arc<AtomicBool>,
    documents: Vec<DocumentTask>,
    processor: Arc<dyn DocumentProcessor>,
    worker_count: usize,
) {
    let (tx, rx) = mpsc::channel::<DocumentTask>(worker_count * 2);
    let rx = Arc::new(tokio::sync::Mutex::new(rx));

    let mut handles = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        let rx = rx.clone();
        let job = job.clone();
        let cancel_flag = cancel_flag.clone();
        let processor = processor.clone();
        handles.push(tokio::spawn(async move {
            loop {
                if cancel_flag.load(Ordering::SeqCst) {
                    break;
                }
                let task = {
                    let mut guard = rx.lock().await;
                    guard.recv().await
                };
                let Some(task) = task else { break };
                match processor.process(&task) {
                    Ok(()) => job.lock().unwrap().processed += 1,
                    Err(err) => {
                        let mut job = job.lock().unwrap();
                        job.failed += 1;
                        job.errors.push(err.to_string());
                    }
                }
            }
        }));
    }

    for document in documents {
        if cancel_flag.load(Ordering::SeqCst) {
            break;
        }
        if tx.send(document).await.is_err() {
            break;
        }
    }
    drop(tx);

    for handle in handles {
        let _ = handle.await;
    }

    let mut job = job.lock().unwrap();
    if job.status != BatchJobStatus::Failed {
        job.status = BatchJobStatus::Completed;
        job.ended_at = Some(Utc::now());
    }
}

/// Deletes every node whose `grounding.source_refs` contains `job_id`,
/// inside one transaction: all-or-nothing per spec.md §5.
pub fn rollback(nodes: &dyn NodeStore, tx: &dyn TransactionOps, job_id: &str) -> GraphResult<usize> {
    let handle = tx.begin()?;
    let outcome = (|| -> GraphResult<usize> {
        let all = fetch_all_nodes(nodes)?;
        let mut deleted = 0;
        for node in all {
            if node.grounding.source_refs.iter().any(|r| r == job_id) {
                nodes.delete_node(&node.id)?;
                deleted += 1;
            }
        }
        Ok(deleted)
    })();

    match outcome {
        Ok(count) => {
            tx.commit(handle)?;
            Ok(count)
        }
        Err(err) => {
            let _ = tx.rollback(handle);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use noema_core::errors::GraphError;

    use super::*;

    struct CountingProcessor {
        fail_source_ids: Vec<String>,
        calls: AtomicUsize,
    }

    impl DocumentProcessor for CountingProcessor {
        fn process(&self, task: &DocumentTask) -> GraphResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_source_ids.contains(&task.source_id) {
                return Err(GraphError::Execution(format!("bad document {}", task.source_id)));
            }
            Ok(())
        }
    }

    fn task(job_id: &str, source_id: &str) -> DocumentTask {
        DocumentTask { job_id: job_id.to_string(), source_id: source_id.to_string(), raw_text: "text".to_string() }
    }

    #[tokio::test]
    async fn a_batch_job_processes_every_document_and_counts_failures() {
        let coordinator = BatchCoordinator::new();
        let processor = Arc::new(CountingProcessor { fail_source_ids: vec!["doc-2".to_string()], calls: AtomicUsize::new(0) });
        let documents = vec![task("job-1", "doc-1"), task("job-1", "doc-2"), task("job-1", "doc-3")];

        coordinator.submit_job("job-1", documents, processor, 2);

        let mut job = coordinator.get_job("job-1").unwrap();
        for _ in 0..50 {
            if job.status != BatchJobStatus::Running {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            job = coordinator.get_job("job-1").unwrap();
        }

        assert_eq!(job.status, BatchJobStatus::Completed);
        assert_eq!(job.total, 3);
        assert_eq!(job.processed, 2);
        assert_eq!(job.failed, 1);
        assert_eq!(job.errors.len(), 1);
    }

    #[test]
    fn cancel_job_marks_the_job_failed() {
        let coordinator = BatchCoordinator::default();
        coordinator.jobs.insert("job-1".to_string(), Arc::new(Mutex::new(BatchJob::new("job-1".to_string(), 5))));
        coordinator.cancel_flags.insert("job-1".to_string(), Arc::new(AtomicBool::new(false)));

        coordinator.cancel_job("job-1");

        let job = coordinator.get_job("job-1").unwrap();
        assert_eq!(job.status, BatchJobStatus::Failed);
        assert!(job.ended_at.is_some());
    }
}
