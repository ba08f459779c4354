use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Which evolution of the voting rules a session follows.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// No revocation or deletion; the first proposal reaching the highest
    /// count wins outright.
    Basic,
    /// Voters can be revoked and proposals deleted; ties are reported
    /// as-is, without a runoff.
    Intermediate,
    /// Everything: ties go to a runoff, and a tied runoff goes to the
    /// administrator.
    Extended,
}

impl Variant {
    /// Can voters be revoked and proposals deleted?
    pub fn allows_removal(self) -> bool {
        !matches!(self, Self::Basic)
    }

    /// Are ties kept in the winning set rather than resolved by index?
    pub fn detects_ties(self) -> bool {
        !matches!(self, Self::Basic)
    }

    /// Does a tie lead to a runoff round?
    pub fn has_runoff(self) -> bool {
        matches!(self, Self::Extended)
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::Extended
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Extended => write!(f, "extended"),
        }
    }
}
