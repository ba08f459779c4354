//! Single-pass vote counting.

use serde::{Deserialize, Serialize};

use super::ProposalId;

/// Proposal IDs sharing the highest vote count, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WinningSet(Vec<ProposalId>);

impl WinningSet {
    pub fn single(id: ProposalId) -> Self {
        Self(vec![id])
    }

    /// The winner, if there is exactly one.
    pub fn winner(&self) -> Option<ProposalId> {
        match self.0.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    pub fn is_tie(&self) -> bool {
        self.0.len() > 1
    }

    pub fn first(&self) -> Option<ProposalId> {
        self.0.first().copied()
    }

    pub fn contains(&self, id: ProposalId) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> &[ProposalId] {
        &self.0
    }
}

/// Argmax with ties: every proposal reaching the maximum count is kept. A
/// strictly higher count restarts the set with the new leader.
pub fn leaders<I>(counts: I) -> WinningSet
where
    I: IntoIterator<Item = (ProposalId, u64)>,
{
    let mut max = 0;
    let mut set = Vec::new();
    for (id, count) in counts {
        if count > max {
            max = count;
            set.clear();
            set.push(id);
        } else if count == max {
            set.push(id);
        }
    }
    WinningSet(set)
}

/// Argmax without ties: the first proposal reaching the maximum wins.
pub fn first_leader<I>(counts: I) -> WinningSet
where
    I: IntoIterator<Item = (ProposalId, u64)>,
{
    let mut best: Option<(ProposalId, u64)> = None;
    for (id, count) in counts {
        match best {
            Some((_, max)) if count <= max => {}
            _ => best = Some((id, count)),
        }
    }
    best.map(|(id, _)| WinningSet::single(id)).unwrap_or_default()
}
