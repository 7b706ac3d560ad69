//! Proposal queue, spec.md §4.C12 / §5's "Shared resources" paragraph:
//! one piece of shared mutable state, one guard — here a `DashMap`
//! rather than a `Mutex<HashMap<_>>` since lookups and status updates
//! come from independent callers and don't need a single critical
//! section across the whole map.

use dashmap::DashMap;

use noema_core::model::{AgentProposal, ProposalStatus};

/// Proposals keyed by id, insertion order preserved via `created_at`
/// for the "insertion order" ordering guarantee in spec.md §5.
#[derive(Default)]
pub struct ProposalQueue {
    proposals: DashMap<String, AgentProposal>,
}

impl ProposalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, proposal: AgentProposal) {
        self.proposals.insert(proposal.id.clone(), proposal);
    }

    pub fn get(&self, id: &str) -> Option<AgentProposal> {
        self.proposals.get(id).map(|p| p.clone())
    }

    pub fn set_status(&self, id: &str, status: ProposalStatus, reasoning: Option<String>) {
        if let Some(mut entry) = self.proposals.get_mut(id) {
            entry.status = status;
            if let Some(reasoning) = reasoning {
                entry.reasoning = reasoning;
            }
        }
    }

    /// All proposals with the given status, ordered by `created_at` ascending.
    pub fn by_status(&self, status: ProposalStatus) -> Vec<AgentProposal> {
        let mut matches: Vec<AgentProposal> =
            self.proposals.iter().filter(|e| e.status == status).map(|e| e.clone()).collect();
        matches.sort_by_key(|p| p.created_at);
        matches
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}
