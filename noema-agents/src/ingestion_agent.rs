//! Ingestion agent, spec.md §4.C11.
//!
//! Runs after the C9 pipeline: for every extracted concept not already
//! present in storage, proposes creating a concept node.

use uuid::Uuid;

use noema_core::errors::GraphResult;
use noema_core::model::{AgentProposal, AgentType, Node, NodeKind, ProposalTarget, Unit};
use noema_core::traits::NodeStore;
use noema_ingestion::IngestedDocument;

pub const INGESTION_NODE_CONFIDENCE: f64 = 0.8;

/// One `create_node` proposal per extracted concept absent from
/// storage (presence checked via `search_nodes_by_text` returning
/// empty, per spec.md §4.C11).
pub fn propose_from_ingestion(document: &IngestedDocument, storage: &dyn NodeStore) -> GraphResult<Vec<AgentProposal>> {
    let mut proposals = Vec::new();
    for concept in &document.concepts {
        if storage.search_nodes_by_text(concept, 1)?.is_empty() {
            let node = Node::new(format!("concept-{}", Uuid::new_v4()), NodeKind::Concept, concept.clone());
            let proposal = AgentProposal::new(
                format!("proposal-{}", Uuid::new_v4()),
                AgentType::Ingestion,
                ProposalTarget::CreateNode { node },
                format!("concept \"{concept}\" extracted from document {} with no existing match", document.source_id),
                Unit::new(INGESTION_NODE_CONFIDENCE),
            );
            proposals.push(proposal);
        }
    }
    Ok(proposals)
}
