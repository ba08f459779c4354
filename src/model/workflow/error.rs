use thiserror::Error;

use super::{ProposalId, WorkflowStatus};

pub type WorkflowResult<T> = std::result::Result<T, WorkflowError>;

/// Reasons a workflow operation is rejected. A rejected operation never
/// changes the session or emits an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Operation `{0}` is not offered by this voting variant")]
    Unsupported(&'static str),
    #[error("Caller is not the administrator")]
    Unauthorized,
    #[error("Operation not allowed while {0}")]
    InvalidPhase(WorkflowStatus),
    #[error("Caller is not a registered voter")]
    NotEligible,
    #[error("Voter is already registered")]
    AlreadyRegistered,
    #[error("Voter is not registered")]
    NotRegistered,
    #[error("Voter has already voted in this round")]
    AlreadyVoted,
    #[error("No proposal with ID {0}")]
    InvalidProposal(ProposalId),
    #[error("Proposal description must not be empty")]
    InvalidDescription,
    #[error("Proposal {0} is not part of the tie")]
    NotTied(ProposalId),
    #[error("Results are not final while {0}")]
    ResultsNotFinal(WorkflowStatus),
    #[error("No winning proposal")]
    NoResult,
}

impl WorkflowError {
    /// Stable machine-readable name of this error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unsupported(_) => "Unsupported",
            Self::Unauthorized => "Unauthorized",
            Self::InvalidPhase(_) => "InvalidPhase",
            Self::NotEligible => "NotEligible",
            Self::AlreadyRegistered => "AlreadyRegistered",
            Self::NotRegistered => "NotRegistered",
            Self::AlreadyVoted => "AlreadyVoted",
            Self::InvalidProposal(_) => "InvalidProposal",
            Self::InvalidDescription => "InvalidDescription",
            Self::NotTied(_) => "NotTied",
            Self::ResultsNotFinal(_) => "ResultsNotFinal",
            Self::NoResult => "NoResult",
        }
    }
}
