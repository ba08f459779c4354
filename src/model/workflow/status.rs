use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Phases of the voting workflow, in the order they are reached.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowStatus {
    /// The administrator is registering voters.
    RegisteringVoters,
    /// Registered voters may submit proposals.
    ProposalsRegistrationStarted,
    /// Proposals are frozen, voting has not yet opened.
    ProposalsRegistrationEnded,
    /// Registered voters may cast their vote.
    VotingSessionStarted,
    /// Voting is closed, awaiting the tally.
    VotingSessionEnded,
    /// The first tally was tied; voters choose between the tied proposals.
    RunoffVotingStarted,
    /// The runoff was tied too; the administrator must break the tie.
    RunoffVotingEnded,
    /// Terminal: the result is final.
    VotesTallied,
}

impl WorkflowStatus {
    /// The phase reached by the administrator's plain "advance" operation
    /// from this phase, if there is one. Tally and runoff phases are left by
    /// the tally engine instead.
    pub fn next_linear(self) -> Option<Self> {
        match self {
            Self::RegisteringVoters => Some(Self::ProposalsRegistrationStarted),
            Self::ProposalsRegistrationStarted => Some(Self::ProposalsRegistrationEnded),
            Self::ProposalsRegistrationEnded => Some(Self::VotingSessionStarted),
            Self::VotingSessionStarted => Some(Self::VotingSessionEnded),
            Self::VotingSessionEnded
            | Self::RunoffVotingStarted
            | Self::RunoffVotingEnded
            | Self::VotesTallied => None,
        }
    }

    /// Is `next` a legal successor of this phase?
    pub fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::VotingSessionEnded => {
                matches!(next, Self::VotesTallied | Self::RunoffVotingStarted)
            }
            Self::RunoffVotingStarted => {
                matches!(next, Self::VotesTallied | Self::RunoffVotingEnded)
            }
            Self::RunoffVotingEnded => next == Self::VotesTallied,
            Self::VotesTallied => false,
            linear => linear.next_linear() == Some(next),
        }
    }

    /// Can a winner be read in this phase?
    pub fn has_results(self) -> bool {
        matches!(self, Self::VotesTallied | Self::RunoffVotingEnded)
    }
}

impl Default for WorkflowStatus {
    fn default() -> Self {
        Self::RegisteringVoters
    }
}

impl Display for WorkflowStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::RegisteringVoters => "registering voters",
            Self::ProposalsRegistrationStarted => "proposals registration started",
            Self::ProposalsRegistrationEnded => "proposals registration ended",
            Self::VotingSessionStarted => "voting session started",
            Self::VotingSessionEnded => "voting session ended",
            Self::RunoffVotingStarted => "runoff voting started",
            Self::RunoffVotingEnded => "runoff voting ended",
            Self::VotesTallied => "votes tallied",
        };
        write!(f, "{name}")
    }
}
