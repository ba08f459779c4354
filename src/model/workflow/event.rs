use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::address::Address;

use super::{ProposalId, WorkflowStatus};

/// A notification emitted by exactly one successful workflow operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    VoterRegistered {
        voter: Address,
    },
    VoterRevoked {
        voter: Address,
    },
    WorkflowStatusChange {
        previous: WorkflowStatus,
        new: WorkflowStatus,
    },
    ProposalRegistered {
        proposal_id: ProposalId,
    },
    ProposalDeleted {
        proposal_id: ProposalId,
    },
    Voted {
        voter: Address,
        proposal_id: ProposalId,
    },
    RunoffVoted {
        voter: Address,
        proposal_id: ProposalId,
    },
}

/// An event as recorded in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Position in the log, starting at zero.
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

/// Append-only record of every notification emitted by a session.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, stamping it with the next sequence number.
    pub fn append(&mut self, event: Event) -> &LoggedEvent {
        let logged = LoggedEvent {
            sequence: self.entries.len() as u64,
            timestamp: Utc::now(),
            event,
        };
        info!("event #{}: {:?}", logged.sequence, logged.event);
        self.entries.push(logged);
        // Just pushed, so never empty.
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over every logged event, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LoggedEvent> {
        self.entries.iter()
    }

    /// A window of the log, oldest first.
    pub fn page(&self, skip: usize, limit: usize) -> &[LoggedEvent] {
        let start = skip.min(self.entries.len());
        let end = start.saturating_add(limit).min(self.entries.len());
        &self.entries[start..end]
    }
}
