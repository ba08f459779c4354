use serde::{Deserialize, Serialize};

use super::{ProposalId, WorkflowError, WorkflowResult};

/// A candidate option. Its identifier is its position in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub description: String,
    pub vote_count: u64,
}

impl Proposal {
    pub fn new(description: String) -> Self {
        Self {
            description,
            vote_count: 0,
        }
    }
}

/// Ordered, index-addressed collection of proposals.
///
/// Deleting a proposal shifts every later proposal down by one position, so
/// identifiers are only stable until the next deletion.
#[derive(Debug, Default)]
pub struct ProposalRegistry {
    proposals: Vec<Proposal>,
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a proposal and return its identifier.
    pub fn push(&mut self, description: String) -> ProposalId {
        self.proposals.push(Proposal::new(description));
        self.proposals.len() - 1
    }

    /// Remove the proposal at `id`, shifting later ones down.
    pub fn remove(&mut self, id: ProposalId) -> WorkflowResult<Proposal> {
        self.check(id)?;
        Ok(self.proposals.remove(id))
    }

    pub fn get(&self, id: ProposalId) -> WorkflowResult<&Proposal> {
        self.proposals
            .get(id)
            .ok_or(WorkflowError::InvalidProposal(id))
    }

    /// Fail with `InvalidProposal` unless `id` is in range.
    pub fn check(&self, id: ProposalId) -> WorkflowResult<()> {
        self.get(id).map(|_| ())
    }

    /// Count one vote for `id`.
    pub fn add_vote(&mut self, id: ProposalId) -> WorkflowResult<u64> {
        let proposal = self
            .proposals
            .get_mut(id)
            .ok_or(WorkflowError::InvalidProposal(id))?;
        proposal.vote_count += 1;
        Ok(proposal.vote_count)
    }

    pub fn vote_count(&self, id: ProposalId) -> WorkflowResult<u64> {
        self.get(id).map(|proposal| proposal.vote_count)
    }

    pub fn as_slice(&self) -> &[Proposal] {
        &self.proposals
    }
}
