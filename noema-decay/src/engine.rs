use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use noema_core::config::DecayConfig;
use noema_core::model::{CognitiveState, Node, Temporal, VectorPayload};

use crate::consolidation::{self, ConsolidationResult};
use crate::formula;

/// Decay engine implementing the strength law, reinforcement, and vector
/// decay scoring of spec.md §4.C7. Stateless over the graph itself — it
/// takes snapshots of nodes/vectors and returns updated values; the
/// caller is responsible for writing them back to storage.
pub struct DecayEngine {
    config: DecayConfig,
    last_run: Mutex<Option<DateTime<Utc>>>,
    running: AtomicBool,
}

impl DecayEngine {
    pub fn new(config: DecayConfig) -> Self {
        Self {
            config,
            last_run: Mutex::new(None),
            running: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    /// `shouldRun(now) = now - lastRun >= interval`. Never having run is
    /// always due.
    pub fn should_run(&self, now: DateTime<Utc>) -> bool {
        match *self.last_run.lock().unwrap() {
            None => true,
            Some(last) => (now - last).num_seconds() >= self.config.interval_secs as i64,
        }
    }

    /// Claim the single-flight guard for a pass. Returns `false` if a
    /// pass is already in progress; the caller should skip this tick.
    pub fn try_begin_pass(&self) -> bool {
        self.running.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_ok()
    }

    /// Release the guard and record `now` as the last completed run.
    pub fn end_pass(&self, now: DateTime<Utc>) {
        *self.last_run.lock().unwrap() = Some(now);
        self.running.store(false, Ordering::SeqCst);
    }

    /// Apply the strength law to every node in the snapshot.
    pub fn decay_nodes(&self, nodes: &[Node], now: DateTime<Utc>) -> Vec<(String, CognitiveState)> {
        nodes.iter().map(|n| (n.id.clone(), formula::apply_decay(n, now, &self.config))).collect()
    }

    /// Reinforce a single node on access.
    pub fn reinforce(&self, node: &Node, now: DateTime<Utc>) -> (CognitiveState, Temporal) {
        formula::reinforce(node, now, &self.config)
    }

    /// Apply the vector-decay law to every vector in the snapshot.
    pub fn decay_vectors(&self, vectors: &[VectorPayload], now: DateTime<Utc>) -> Vec<(String, f64)> {
        vectors
            .iter()
            .map(|v| (v.id.clone(), formula::vector_decay_score(v, now, self.config.base_lambda)))
            .collect()
    }

    /// Find and synthesize every cluster of vectors above
    /// `config.consolidation_threshold`. `cosine` is supplied by the
    /// caller so this crate stays independent of `noema-embeddings`.
    pub fn consolidate<'a>(
        &self,
        vectors: &[&'a VectorPayload],
        cosine: impl Fn(&[f32], &[f32]) -> f64 + Copy,
        concept_name_for: impl Fn(&[&VectorPayload]) -> String,
    ) -> Vec<ConsolidationResult> {
        consolidation::find_clusters(vectors, self.config.consolidation_threshold, cosine)
            .into_iter()
            .map(|cluster| {
                let name = concept_name_for(&cluster);
                consolidation::consolidate(&cluster, name)
            })
            .collect()
    }
}

impl Default for DecayEngine {
    fn default() -> Self {
        Self::new(DecayConfig::default())
    }
}
