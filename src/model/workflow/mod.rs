//! The voting workflow: phase state machine, registries and tally engine.
//! Nothing in here knows about HTTP.

mod error;
pub mod event;
mod proposal;
mod session;
mod status;
pub mod tally;
mod variant;
mod voter;

use rocket::tokio::sync::Mutex;

pub use error::{WorkflowError, WorkflowResult};
pub use event::{Event, EventLog, LoggedEvent};
pub use proposal::{Proposal, ProposalRegistry};
pub use session::{VotingSession, Winner};
pub use status::WorkflowStatus;
pub use tally::WinningSet;
pub use variant::Variant;
pub use voter::{Voter, VoterRegistry};

#[cfg(test)]
pub use session::examples;

/// Proposals are identified by their position in the registry.
pub type ProposalId = usize;

/// The single session served by the application. Each request holds the
/// lock for exactly one operation.
pub type Session = Mutex<VotingSession>;
