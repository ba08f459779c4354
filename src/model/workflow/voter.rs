use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::address::Address;

use super::ProposalId;

/// Registration and voting status of one identity. Unknown identities read
/// as the zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub is_registered: bool,
    pub has_voted: bool,
    pub voted_proposal_id: ProposalId,
    pub has_voted_runoff: bool,
    pub runoff_proposal_id: ProposalId,
}

/// Per-address voter records.
#[derive(Debug, Default)]
pub struct VoterRegistry {
    voters: HashMap<Address, Voter>,
}

impl VoterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for `address`, zero-valued if never seen.
    pub fn get(&self, address: &Address) -> Voter {
        self.voters.get(address).cloned().unwrap_or_default()
    }

    pub fn is_registered(&self, address: &Address) -> bool {
        self.voters
            .get(address)
            .map(|voter| voter.is_registered)
            .unwrap_or(false)
    }

    pub fn set_registered(&mut self, address: Address, registered: bool) {
        self.voters.entry(address).or_default().is_registered = registered;
    }

    /// Record a first-round vote. Callers check eligibility first.
    pub fn record_vote(&mut self, address: Address, proposal_id: ProposalId) {
        let voter = self.voters.entry(address).or_default();
        voter.has_voted = true;
        voter.voted_proposal_id = proposal_id;
    }

    /// Record a runoff vote. Callers check eligibility first.
    pub fn record_runoff_vote(&mut self, address: Address, proposal_id: ProposalId) {
        let voter = self.voters.entry(address).or_default();
        voter.has_voted_runoff = true;
        voter.runoff_proposal_id = proposal_id;
    }
}
