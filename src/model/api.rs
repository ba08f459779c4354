//! Request and response bodies of the HTTP interface.

use serde::{Deserialize, Serialize};

use super::{
    address::Address,
    workflow::{Proposal, ProposalId, Variant, VotingSession, WorkflowStatus},
};

/// Snapshot of where the session stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDescription {
    pub admin: Address,
    pub variant: Variant,
    pub status: WorkflowStatus,
    pub proposal_count: usize,
    pub event_count: usize,
}

impl From<&VotingSession> for StatusDescription {
    fn from(session: &VotingSession) -> Self {
        Self {
            admin: session.admin(),
            variant: session.variant(),
            status: session.status(),
            proposal_count: session.proposals().len(),
            event_count: session.events().len(),
        }
    }
}

/// A proposal together with its current ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDescription {
    pub id: ProposalId,
    pub description: String,
    pub vote_count: u64,
}

impl ProposalDescription {
    pub fn new(id: ProposalId, proposal: &Proposal) -> Self {
        Self {
            id,
            description: proposal.description.clone(),
            vote_count: proposal.vote_count,
        }
    }
}

/// Body of a proposal submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProposal {
    pub description: String,
}

/// Reply to a proposal submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalCreated {
    pub proposal_id: ProposalId,
}

/// Vote count of a single proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCount {
    pub proposal_id: ProposalId,
    pub vote_count: u64,
}

/// Reply to a phase transition or tally: the phase the session is now in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseChange {
    pub status: WorkflowStatus,
}
