use serde::{Deserialize, Serialize};

use crate::model::address::Address;

use super::{
    event::{Event, EventLog},
    proposal::{Proposal, ProposalRegistry},
    tally::{self, WinningSet},
    voter::{Voter, VoterRegistry},
    ProposalId, Variant, WorkflowError, WorkflowResult, WorkflowStatus,
};

/// A winning proposal, as reported by [`VotingSession::winners`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub proposal_id: ProposalId,
    pub description: String,
    pub vote_count: u64,
}

/// All state of one voting process: the workflow phase, both registries,
/// the tally results and the event log.
///
/// Every operation checks authorization first, then the phase, then its
/// arguments, and only mutates once all checks have passed. A rejected
/// operation leaves the session untouched and emits nothing; a successful
/// one emits exactly one event.
///
/// Runoff votes name proposals by their original ID, which must be on the
/// runoff ballot. They are added to that proposal's running vote count, so
/// the runoff tally and the tie-break compare cumulative counts. Since every
/// proposal on the ballot entered the runoff with the same count, this ranks
/// them exactly as the runoff votes alone would.
#[derive(Debug)]
pub struct VotingSession {
    admin: Address,
    variant: Variant,
    status: WorkflowStatus,
    voters: VoterRegistry,
    proposals: ProposalRegistry,
    winning_set: WinningSet,
    runoff_ballot: WinningSet,
    events: EventLog,
}

impl VotingSession {
    /// Create a session administered by `admin`, starting in
    /// [`WorkflowStatus::RegisteringVoters`].
    pub fn new(admin: Address, variant: Variant) -> Self {
        info!("New {variant} voting session administered by {admin}");
        Self {
            admin,
            variant,
            status: WorkflowStatus::default(),
            voters: VoterRegistry::new(),
            proposals: ProposalRegistry::new(),
            winning_set: WinningSet::default(),
            runoff_ballot: WinningSet::default(),
            events: EventLog::new(),
        }
    }

    // Reads.

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    pub fn proposals(&self) -> &[Proposal] {
        self.proposals.as_slice()
    }

    pub fn proposal(&self, id: ProposalId) -> WorkflowResult<&Proposal> {
        self.proposals.get(id)
    }

    pub fn vote_count_for_proposal(&self, id: ProposalId) -> WorkflowResult<u64> {
        self.proposals.vote_count(id)
    }

    pub fn winning_set(&self) -> &WinningSet {
        &self.winning_set
    }

    pub fn runoff_ballot(&self) -> &WinningSet {
        &self.runoff_ballot
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn is_registered(&self, address: &Address) -> bool {
        self.voters.is_registered(address)
    }

    /// The record of any identity; only registered voters may look.
    pub fn voter(&self, caller: &Address, address: &Address) -> WorkflowResult<Voter> {
        self.require_registered_voter(caller)?;
        Ok(self.voters.get(address))
    }

    /// The winning proposal(s). While a runoff tie awaits the
    /// administrator, this is every tied proposal.
    pub fn winners(&self) -> WorkflowResult<Vec<Winner>> {
        if !self.status.has_results() {
            return Err(WorkflowError::ResultsNotFinal(self.status));
        }
        if self.winning_set.is_empty() {
            return Err(WorkflowError::NoResult);
        }
        self.winning_set
            .ids()
            .iter()
            .map(|&id| {
                let proposal = self.proposals.get(id)?;
                Ok(Winner {
                    proposal_id: id,
                    description: proposal.description.clone(),
                    vote_count: proposal.vote_count,
                })
            })
            .collect()
    }

    // Voter registry.

    pub fn register_voter(&mut self, caller: &Address, voter: Address) -> WorkflowResult<()> {
        self.logged("register_voter", |session| {
            session.require_admin(caller)?;
            session.require_status(WorkflowStatus::RegisteringVoters)?;
            if session.voters.is_registered(&voter) {
                return Err(WorkflowError::AlreadyRegistered);
            }
            session.voters.set_registered(voter, true);
            session.emit(Event::VoterRegistered { voter });
            Ok(())
        })
    }

    pub fn revoke_voter(&mut self, caller: &Address, voter: Address) -> WorkflowResult<()> {
        self.logged("revoke_voter", |session| {
            session.require_admin(caller)?;
            session.require_removal("revoke_voter")?;
            session.require_status(WorkflowStatus::RegisteringVoters)?;
            if !session.voters.is_registered(&voter) {
                return Err(WorkflowError::NotRegistered);
            }
            session.voters.set_registered(voter, false);
            session.emit(Event::VoterRevoked { voter });
            Ok(())
        })
    }

    // Linear phase changes.

    pub fn start_proposals_registration(&mut self, caller: &Address) -> WorkflowResult<()> {
        self.advance(
            "start_proposals_registration",
            caller,
            WorkflowStatus::RegisteringVoters,
        )
    }

    pub fn end_proposals_registration(&mut self, caller: &Address) -> WorkflowResult<()> {
        self.advance(
            "end_proposals_registration",
            caller,
            WorkflowStatus::ProposalsRegistrationStarted,
        )
    }

    pub fn start_voting_session(&mut self, caller: &Address) -> WorkflowResult<()> {
        self.advance(
            "start_voting_session",
            caller,
            WorkflowStatus::ProposalsRegistrationEnded,
        )
    }

    pub fn end_voting_session(&mut self, caller: &Address) -> WorkflowResult<()> {
        self.advance(
            "end_voting_session",
            caller,
            WorkflowStatus::VotingSessionStarted,
        )
    }

    // Proposal registry.

    pub fn register_proposal(
        &mut self,
        caller: &Address,
        description: String,
    ) -> WorkflowResult<ProposalId> {
        self.logged("register_proposal", |session| {
            session.require_registered_voter(caller)?;
            session.require_status(WorkflowStatus::ProposalsRegistrationStarted)?;
            if description.trim().is_empty() {
                return Err(WorkflowError::InvalidDescription);
            }
            let proposal_id = session.proposals.push(description);
            session.emit(Event::ProposalRegistered { proposal_id });
            Ok(proposal_id)
        })
    }

    pub fn delete_proposal(
        &mut self,
        caller: &Address,
        proposal_id: ProposalId,
    ) -> WorkflowResult<Proposal> {
        self.logged("delete_proposal", |session| {
            session.require_admin(caller)?;
            session.require_removal("delete_proposal")?;
            session.require_status(WorkflowStatus::ProposalsRegistrationStarted)?;
            let removed = session.proposals.remove(proposal_id)?;
            session.emit(Event::ProposalDeleted { proposal_id });
            Ok(removed)
        })
    }

    // Voting and tallying.

    pub fn vote(&mut self, caller: &Address, proposal_id: ProposalId) -> WorkflowResult<()> {
        self.logged("vote", |session| {
            session.require_registered_voter(caller)?;
            session.require_status(WorkflowStatus::VotingSessionStarted)?;
            if session.voters.get(caller).has_voted {
                return Err(WorkflowError::AlreadyVoted);
            }
            session.proposals.add_vote(proposal_id)?;
            session.voters.record_vote(*caller, proposal_id);
            session.emit(Event::Voted {
                voter: *caller,
                proposal_id,
            });
            Ok(())
        })
    }

    /// Count the first round and move to either the final result or a runoff.
    pub fn tally_votes(&mut self, caller: &Address) -> WorkflowResult<WorkflowStatus> {
        self.logged("tally_votes", |session| {
            session.require_admin(caller)?;
            session.require_status(WorkflowStatus::VotingSessionEnded)?;

            let counts = session
                .proposals
                .as_slice()
                .iter()
                .enumerate()
                .map(|(id, proposal)| (id, proposal.vote_count));
            let set = if session.variant.detects_ties() {
                tally::leaders(counts)
            } else {
                tally::first_leader(counts)
            };

            let next = if set.is_tie() && session.variant.has_runoff() {
                session.runoff_ballot = set.clone();
                WorkflowStatus::RunoffVotingStarted
            } else {
                WorkflowStatus::VotesTallied
            };
            session.winning_set = set;
            session.set_status(next);
            Ok(next)
        })
    }

    pub fn runoff_vote(&mut self, caller: &Address, proposal_id: ProposalId) -> WorkflowResult<()> {
        self.logged("runoff_vote", |session| {
            session.require_registered_voter(caller)?;
            session.require_runoff("runoff_vote")?;
            session.require_status(WorkflowStatus::RunoffVotingStarted)?;
            if session.voters.get(caller).has_voted_runoff {
                return Err(WorkflowError::AlreadyVoted);
            }
            if !session.runoff_ballot.contains(proposal_id) {
                return Err(WorkflowError::InvalidProposal(proposal_id));
            }
            session.proposals.add_vote(proposal_id)?;
            session.voters.record_runoff_vote(*caller, proposal_id);
            session.emit(Event::RunoffVoted {
                voter: *caller,
                proposal_id,
            });
            Ok(())
        })
    }

    /// Count the runoff ballot and move to either the final result or an
    /// administrator tie-break.
    pub fn end_runoff_voting_session(
        &mut self,
        caller: &Address,
    ) -> WorkflowResult<WorkflowStatus> {
        self.logged("end_runoff_voting_session", |session| {
            session.require_admin(caller)?;
            session.require_runoff("end_runoff_voting_session")?;
            session.require_status(WorkflowStatus::RunoffVotingStarted)?;

            let counts = session
                .runoff_ballot
                .ids()
                .iter()
                .map(|&id| Ok((id, session.proposals.vote_count(id)?)))
                .collect::<WorkflowResult<Vec<_>>>()?;
            let set = tally::leaders(counts);

            let next = if set.is_tie() {
                WorkflowStatus::RunoffVotingEnded
            } else {
                WorkflowStatus::VotesTallied
            };
            session.winning_set = set;
            session.set_status(next);
            Ok(next)
        })
    }

    /// Administrator resolution of a tied runoff.
    pub fn decide_tie(&mut self, caller: &Address, proposal_id: ProposalId) -> WorkflowResult<()> {
        self.logged("decide_tie", |session| {
            session.require_admin(caller)?;
            session.require_runoff("decide_tie")?;
            session.require_status(WorkflowStatus::RunoffVotingEnded)?;
            let count = session.proposals.vote_count(proposal_id)?;
            let tied_with = session.winning_set.first().ok_or(WorkflowError::NoResult)?;
            if count != session.proposals.vote_count(tied_with)? {
                return Err(WorkflowError::NotTied(proposal_id));
            }
            session.winning_set = WinningSet::single(proposal_id);
            session.set_status(WorkflowStatus::VotesTallied);
            Ok(())
        })
    }

    // Guards.

    fn require_admin(&self, caller: &Address) -> WorkflowResult<()> {
        if *caller == self.admin {
            Ok(())
        } else {
            Err(WorkflowError::Unauthorized)
        }
    }

    fn require_registered_voter(&self, caller: &Address) -> WorkflowResult<()> {
        if self.voters.is_registered(caller) {
            Ok(())
        } else {
            Err(WorkflowError::NotEligible)
        }
    }

    fn require_status(&self, expected: WorkflowStatus) -> WorkflowResult<()> {
        if self.status == expected {
            Ok(())
        } else {
            Err(WorkflowError::InvalidPhase(self.status))
        }
    }

    fn require_removal(&self, operation: &'static str) -> WorkflowResult<()> {
        if self.variant.allows_removal() {
            Ok(())
        } else {
            Err(WorkflowError::Unsupported(operation))
        }
    }

    fn require_runoff(&self, operation: &'static str) -> WorkflowResult<()> {
        if self.variant.has_runoff() {
            Ok(())
        } else {
            Err(WorkflowError::Unsupported(operation))
        }
    }

    // Mutation helpers.

    fn advance(
        &mut self,
        operation: &'static str,
        caller: &Address,
        from: WorkflowStatus,
    ) -> WorkflowResult<()> {
        self.logged(operation, |session| {
            session.require_admin(caller)?;
            session.require_status(from)?;
            // Only called with phases that have a linear successor.
            let next = from
                .next_linear()
                .ok_or(WorkflowError::InvalidPhase(from))?;
            session.set_status(next);
            Ok(())
        })
    }

    fn set_status(&mut self, new: WorkflowStatus) {
        let previous = self.status;
        debug_assert!(
            previous.can_transition_to(new),
            "illegal transition {previous} -> {new}"
        );
        self.status = new;
        self.emit(Event::WorkflowStatusChange { previous, new });
    }

    fn emit(&mut self, event: Event) {
        self.events.append(event);
    }

    /// Run an operation, logging its outcome.
    fn logged<T>(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&mut Self) -> WorkflowResult<T>,
    ) -> WorkflowResult<T> {
        let result = f(self);
        match &result {
            Ok(_) => info!("{operation} committed, now {}", self.status),
            Err(e) => debug!("{operation} rejected: {e}"),
        }
        result
    }
}


#[cfg(test)]
mod tests {
    use super::examples::{admin, voter, PROPOSALS};
    use super::*;

    #[test]
    fn full_linear_walk_emits_one_event_per_operation() {
        let mut session = VotingSession::new(admin(), Variant::Extended);
        session.register_voter(&admin(), voter(1)).unwrap();
        assert_eq!(session.events().len(), 1);
        session.start_proposals_registration(&admin()).unwrap();
        session
            .register_proposal(&voter(1), "Build a park".into())
            .unwrap();
        session.end_proposals_registration(&admin()).unwrap();
        session.start_voting_session(&admin()).unwrap();
        session.vote(&voter(1), 0).unwrap();
        session.end_voting_session(&admin()).unwrap();
        assert_eq!(
            session.tally_votes(&admin()),
            Ok(WorkflowStatus::VotesTallied)
        );
        assert_eq!(session.events().len(), 8);
        assert_eq!(
            session.events().iter().last().unwrap().event,
            Event::WorkflowStatusChange {
                previous: WorkflowStatus::VotingSessionEnded,
                new: WorkflowStatus::VotesTallied,
            }
        );
    }

    #[test]
    fn phase_changes_require_admin_then_phase() {
        let mut session = VotingSession::new(admin(), Variant::Extended);
        assert_eq!(
            session.start_proposals_registration(&voter(1)),
            Err(WorkflowError::Unauthorized)
        );
        // Authorization is checked before the phase.
        assert_eq!(
            session.start_voting_session(&voter(1)),
            Err(WorkflowError::Unauthorized)
        );
        assert_eq!(
            session.start_voting_session(&admin()),
            Err(WorkflowError::InvalidPhase(WorkflowStatus::RegisteringVoters))
        );
        assert_eq!(
            session.tally_votes(&admin()),
            Err(WorkflowError::InvalidPhase(WorkflowStatus::RegisteringVoters))
        );
        assert!(session.events().is_empty());
        assert_eq!(session.status(), WorkflowStatus::RegisteringVoters);
    }

    #[test]
    fn status_never_regresses() {
        let mut session = VotingSession::voting_example(Variant::Extended, 1, 1);
        let before = session.status();
        assert!(session.start_proposals_registration(&admin()).is_err());
        assert!(session.end_proposals_registration(&admin()).is_err());
        assert!(session.start_voting_session(&admin()).is_err());
        assert_eq!(session.status(), before);
    }

    #[test]
    fn voter_registration() {
        let mut session = VotingSession::new(admin(), Variant::Extended);
        assert_eq!(
            session.register_voter(&voter(1), voter(2)),
            Err(WorkflowError::Unauthorized)
        );
        session.register_voter(&admin(), voter(1)).unwrap();
        assert_eq!(
            session.register_voter(&admin(), voter(1)),
            Err(WorkflowError::AlreadyRegistered)
        );
        assert_eq!(
            session.revoke_voter(&admin(), voter(2)),
            Err(WorkflowError::NotRegistered)
        );
        session.revoke_voter(&admin(), voter(1)).unwrap();
        assert!(!session.is_registered(&voter(1)));
        assert_eq!(
            session.events().iter().last().unwrap().event,
            Event::VoterRevoked { voter: voter(1) }
        );

        // Frozen once proposals open.
        session.register_voter(&admin(), voter(1)).unwrap();
        session.start_proposals_registration(&admin()).unwrap();
        assert_eq!(
            session.register_voter(&admin(), voter(3)),
            Err(WorkflowError::InvalidPhase(
                WorkflowStatus::ProposalsRegistrationStarted
            ))
        );
        assert_eq!(
            session.revoke_voter(&admin(), voter(1)),
            Err(WorkflowError::InvalidPhase(
                WorkflowStatus::ProposalsRegistrationStarted
            ))
        );
    }

    #[test]
    fn proposal_registration() {
        let mut session = VotingSession::new(admin(), Variant::Extended);
        session.register_voter(&admin(), voter(1)).unwrap();
        assert_eq!(
            session.register_proposal(&voter(1), "Too early".into()),
            Err(WorkflowError::InvalidPhase(WorkflowStatus::RegisteringVoters))
        );
        session.start_proposals_registration(&admin()).unwrap();

        // Scenario D: unregistered identities cannot propose.
        assert_eq!(
            session.register_proposal(&voter(9), "Build a park".into()),
            Err(WorkflowError::NotEligible)
        );
        assert_eq!(
            session.register_proposal(&voter(1), "   ".into()),
            Err(WorkflowError::InvalidDescription)
        );
        assert_eq!(session.register_proposal(&voter(1), "A".into()), Ok(0));
        assert_eq!(session.register_proposal(&voter(1), "B".into()), Ok(1));
        assert_eq!(
            session.events().iter().last().unwrap().event,
            Event::ProposalRegistered { proposal_id: 1 }
        );
        assert_eq!(session.proposal(1).unwrap().description, "B");
        assert_eq!(session.vote_count_for_proposal(1), Ok(0));
        assert_eq!(
            session.vote_count_for_proposal(2),
            Err(WorkflowError::InvalidProposal(2))
        );
    }

    #[test]
    fn deletion_shifts_ids() {
        // Scenario E.
        let mut session = VotingSession::new(admin(), Variant::Extended);
        session.register_voter(&admin(), voter(1)).unwrap();
        session.start_proposals_registration(&admin()).unwrap();
        for description in ["A", "B", "C"] {
            session
                .register_proposal(&voter(1), description.into())
                .unwrap();
        }
        assert_eq!(
            session.delete_proposal(&voter(1), 0),
            Err(WorkflowError::Unauthorized)
        );
        assert_eq!(
            session.delete_proposal(&admin(), 3),
            Err(WorkflowError::InvalidProposal(3))
        );
        assert_eq!(session.delete_proposal(&admin(), 0).unwrap().description, "A");
        let descriptions = session
            .proposals()
            .iter()
            .map(|p| p.description.as_str())
            .collect::<Vec<_>>();
        assert_eq!(descriptions, vec!["B", "C"]);

        // A vote for ID 0 now goes to B.
        session.end_proposals_registration(&admin()).unwrap();
        session.start_voting_session(&admin()).unwrap();
        session.vote(&voter(1), 0).unwrap();
        assert_eq!(session.proposal(0).unwrap().description, "B");
        assert_eq!(session.vote_count_for_proposal(0), Ok(1));
    }

    #[test]
    fn revoked_voter_loses_access() {
        let mut session = VotingSession::new(admin(), Variant::Extended);
        session.register_voter(&admin(), voter(1)).unwrap();
        session.register_voter(&admin(), voter(2)).unwrap();
        session.revoke_voter(&admin(), voter(2)).unwrap();
        session.start_proposals_registration(&admin()).unwrap();
        assert_eq!(
            session.register_proposal(&voter(2), "A".into()),
            Err(WorkflowError::NotEligible)
        );
        session.register_proposal(&voter(1), "A".into()).unwrap();
        session.end_proposals_registration(&admin()).unwrap();
        session.start_voting_session(&admin()).unwrap();
        assert_eq!(session.vote(&voter(2), 0), Err(WorkflowError::NotEligible));
        assert_eq!(session.vote_count_for_proposal(0), Ok(0));
    }

    #[test]
    fn intermediate_variant_allows_removal() {
        let mut session = VotingSession::new(admin(), Variant::Intermediate);
        session.register_voter(&admin(), voter(1)).unwrap();
        session.register_voter(&admin(), voter(2)).unwrap();
        session.revoke_voter(&admin(), voter(2)).unwrap();
        assert!(!session.is_registered(&voter(2)));
        assert_eq!(
            session.events().iter().last().unwrap().event,
            Event::VoterRevoked { voter: voter(2) }
        );

        session.start_proposals_registration(&admin()).unwrap();
        for description in ["A", "B"] {
            session
                .register_proposal(&voter(1), description.into())
                .unwrap();
        }
        assert_eq!(session.delete_proposal(&admin(), 0).unwrap().description, "A");
        assert_eq!(session.proposal(0).unwrap().description, "B");
        assert_eq!(
            session.events().iter().last().unwrap().event,
            Event::ProposalDeleted { proposal_id: 0 }
        );
    }

    #[test]
    fn voting_guards() {
        // Scenario D: voting before the session opens.
        let mut session = VotingSession::new(admin(), Variant::Extended);
        session.register_voter(&admin(), voter(1)).unwrap();
        assert_eq!(
            session.vote(&voter(1), 0),
            Err(WorkflowError::InvalidPhase(WorkflowStatus::RegisteringVoters))
        );

        let mut session = VotingSession::voting_example(Variant::Extended, 2, 2);
        assert_eq!(session.vote(&voter(9), 0), Err(WorkflowError::NotEligible));
        assert_eq!(
            session.vote(&voter(1), 7),
            Err(WorkflowError::InvalidProposal(7))
        );
        session.vote(&voter(1), 1).unwrap();
        assert_eq!(session.vote(&voter(1), 0), Err(WorkflowError::AlreadyVoted));

        let record = session.voter(&voter(2), &voter(1)).unwrap();
        assert!(record.has_voted);
        assert_eq!(record.voted_proposal_id, 1);
        assert_eq!(
            session.voter(&voter(9), &voter(1)),
            Err(WorkflowError::NotEligible)
        );
    }

    #[test]
    fn failed_operations_leave_no_trace() {
        let mut session = VotingSession::voting_example(Variant::Extended, 2, 2);
        session.vote(&voter(1), 0).unwrap();
        let events = session.events().len();
        let counts = session.proposals().to_vec();

        assert!(session.vote(&voter(1), 1).is_err());
        assert!(session.vote(&voter(2), 5).is_err());
        assert!(session.tally_votes(&admin()).is_err());
        assert!(session.decide_tie(&admin(), 0).is_err());

        assert_eq!(session.events().len(), events);
        assert_eq!(session.proposals(), counts.as_slice());
        assert!(!session.voter(&voter(1), &voter(2)).unwrap().has_voted);
    }

    #[test]
    fn vote_sum_matches_voters() {
        let mut session = VotingSession::voting_example(Variant::Extended, 5, 3);
        session.cast_and_close(&[0, 2, 2, 1, 2]);
        let total: u64 = session.proposals().iter().map(|p| p.vote_count).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn scenario_a_single_winner() {
        let mut session = VotingSession::voting_example(Variant::Extended, 3, 2);
        session.cast_and_close(&[0, 0, 1]);
        assert_eq!(
            session.tally_votes(&voter(1)),
            Err(WorkflowError::Unauthorized)
        );
        assert_eq!(
            session.tally_votes(&admin()),
            Ok(WorkflowStatus::VotesTallied)
        );
        assert_eq!(
            session.winners().unwrap(),
            vec![Winner {
                proposal_id: 0,
                description: PROPOSALS[0].to_string(),
                vote_count: 2,
            }]
        );
        assert!(session.runoff_ballot().is_empty());
    }

    #[test]
    fn scenario_b_tie_opens_runoff() {
        let mut session = VotingSession::voting_example(Variant::Extended, 4, 2);
        session.cast_and_close(&[0, 0, 1, 1]);
        assert_eq!(
            session.tally_votes(&admin()),
            Ok(WorkflowStatus::RunoffVotingStarted)
        );
        assert_eq!(session.winning_set().ids(), &[0, 1]);
        assert_eq!(session.runoff_ballot().ids(), &[0, 1]);
        assert_eq!(
            session.winners(),
            Err(WorkflowError::ResultsNotFinal(
                WorkflowStatus::RunoffVotingStarted
            ))
        );
    }

    #[test]
    fn runoff_resolves_tie() {
        let mut session = VotingSession::voting_example(Variant::Extended, 4, 3);
        session.cast_and_close(&[1, 2, 1, 2]);
        session.tally_votes(&admin()).unwrap();
        assert_eq!(session.runoff_ballot().ids(), &[1, 2]);

        // First-round voters may vote again, once, for a proposal on the ballot.
        assert_eq!(
            session.runoff_vote(&voter(1), 0),
            Err(WorkflowError::InvalidProposal(0))
        );
        session.runoff_vote(&voter(1), 2).unwrap();
        assert_eq!(
            session.runoff_vote(&voter(1), 2),
            Err(WorkflowError::AlreadyVoted)
        );
        assert_eq!(
            session.runoff_vote(&voter(9), 2),
            Err(WorkflowError::NotEligible)
        );
        assert_eq!(
            session.vote(&voter(2), 1),
            Err(WorkflowError::InvalidPhase(
                WorkflowStatus::RunoffVotingStarted
            ))
        );

        assert_eq!(
            session.end_runoff_voting_session(&admin()),
            Ok(WorkflowStatus::VotesTallied)
        );
        let winners = session.winners().unwrap();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].proposal_id, 2);
        assert_eq!(winners[0].description, PROPOSALS[2]);
    }

    #[test]
    fn runoff_is_open_to_first_round_abstainers() {
        let mut session = VotingSession::voting_example(Variant::Extended, 5, 3);
        // Voter 5 skips the first round.
        session.cast_and_close(&[1, 2, 1, 2]);
        session.tally_votes(&admin()).unwrap();
        assert_eq!(session.runoff_ballot().ids(), &[1, 2]);

        session.runoff_vote(&voter(1), 1).unwrap();
        session.runoff_vote(&voter(5), 2).unwrap();
        assert_eq!(
            session.runoff_vote(&voter(1), 2),
            Err(WorkflowError::AlreadyVoted)
        );
        assert_eq!(
            session.runoff_vote(&voter(5), 1),
            Err(WorkflowError::AlreadyVoted)
        );
        assert_eq!(
            session.vote(&voter(5), 1),
            Err(WorkflowError::InvalidPhase(
                WorkflowStatus::RunoffVotingStarted
            ))
        );

        // Still level after one runoff vote each.
        assert_eq!(
            session.end_runoff_voting_session(&admin()),
            Ok(WorkflowStatus::RunoffVotingEnded)
        );
        session.decide_tie(&admin(), 2).unwrap();
        assert_eq!(session.winning_set().ids(), &[2]);
        assert_eq!(session.winners().unwrap()[0].description, PROPOSALS[2]);
    }

    #[test]
    fn scenario_c_admin_breaks_runoff_tie() {
        let mut session = VotingSession::voting_example(Variant::Extended, 4, 3);
        session.cast_and_close(&[0, 0, 1, 1]);
        session.tally_votes(&admin()).unwrap();
        session.runoff_vote(&voter(1), 0).unwrap();
        session.runoff_vote(&voter(2), 1).unwrap();
        assert_eq!(
            session.decide_tie(&admin(), 1),
            Err(WorkflowError::InvalidPhase(
                WorkflowStatus::RunoffVotingStarted
            ))
        );
        assert_eq!(
            session.end_runoff_voting_session(&admin()),
            Ok(WorkflowStatus::RunoffVotingEnded)
        );

        // The unresolved tie is visible.
        let tied = session.winners().unwrap();
        assert_eq!(
            tied.iter().map(|w| w.proposal_id).collect::<Vec<_>>(),
            vec![0, 1]
        );

        assert_eq!(
            session.decide_tie(&voter(1), 1),
            Err(WorkflowError::Unauthorized)
        );
        assert_eq!(
            session.decide_tie(&admin(), 5),
            Err(WorkflowError::InvalidProposal(5))
        );
        assert_eq!(session.decide_tie(&admin(), 2), Err(WorkflowError::NotTied(2)));
        session.decide_tie(&admin(), 1).unwrap();
        assert_eq!(session.status(), WorkflowStatus::VotesTallied);
        assert_eq!(session.winning_set().ids(), &[1]);
        assert_eq!(session.winners().unwrap()[0].description, PROPOSALS[1]);
        assert_eq!(
            session.events().iter().last().unwrap().event,
            Event::WorkflowStatusChange {
                previous: WorkflowStatus::RunoffVotingEnded,
                new: WorkflowStatus::VotesTallied,
            }
        );

        // Terminal.
        assert!(session.decide_tie(&admin(), 0).is_err());
        assert!(session.end_runoff_voting_session(&admin()).is_err());
    }

    #[test]
    fn no_proposals_means_no_result() {
        let mut session = VotingSession::voting_example(Variant::Extended, 1, 0);
        session.end_voting_session(&admin()).unwrap();
        assert_eq!(
            session.tally_votes(&admin()),
            Ok(WorkflowStatus::VotesTallied)
        );
        assert_eq!(session.winners(), Err(WorkflowError::NoResult));
    }

    #[test]
    fn basic_variant_takes_first_leader() {
        let mut session = VotingSession::voting_example(Variant::Basic, 4, 2);
        session.cast_and_close(&[1, 1, 0, 0]);
        assert_eq!(
            session.tally_votes(&admin()),
            Ok(WorkflowStatus::VotesTallied)
        );
        assert_eq!(session.winning_set().ids(), &[0]);
        assert_eq!(
            session.runoff_vote(&voter(1), 0),
            Err(WorkflowError::Unsupported("runoff_vote"))
        );
        assert_eq!(
            session.runoff_vote(&voter(9), 0),
            Err(WorkflowError::NotEligible)
        );
        assert_eq!(
            session.decide_tie(&voter(1), 0),
            Err(WorkflowError::Unauthorized)
        );
    }

    #[test]
    fn basic_variant_has_no_removal() {
        let mut session = VotingSession::new(admin(), Variant::Basic);
        session.register_voter(&admin(), voter(1)).unwrap();
        // Authorization comes first, then the variant.
        assert_eq!(
            session.revoke_voter(&voter(1), voter(1)),
            Err(WorkflowError::Unauthorized)
        );
        assert_eq!(
            session.revoke_voter(&admin(), voter(1)),
            Err(WorkflowError::Unsupported("revoke_voter"))
        );
        session.start_proposals_registration(&admin()).unwrap();
        session.register_proposal(&voter(1), "A".into()).unwrap();
        assert_eq!(
            session.delete_proposal(&admin(), 0),
            Err(WorkflowError::Unsupported("delete_proposal"))
        );
    }

    #[test]
    fn intermediate_variant_reports_ties_without_runoff() {
        let mut session = VotingSession::voting_example(Variant::Intermediate, 4, 2);
        session.cast_and_close(&[0, 1, 0, 1]);
        assert_eq!(
            session.tally_votes(&admin()),
            Ok(WorkflowStatus::VotesTallied)
        );
        let winners = session.winners().unwrap();
        assert_eq!(winners.len(), 2);
        assert!(session.runoff_ballot().is_empty());
        assert_eq!(
            session.end_runoff_voting_session(&admin()),
            Err(WorkflowError::Unsupported("end_runoff_voting_session"))
        );
    }
}
