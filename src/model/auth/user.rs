use std::fmt::Display;

use serde_repr::{Deserialize_repr, Serialize_repr};

/// A kind of user of our application, having defined rights.
pub trait User {
    /// The rights needed to act as this user type.
    const RIGHTS: Rights;
}

/// Different privilege levels.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Rights {
    Voter = 0,
    Admin = 1,
}

impl Rights {
    /// Does holding these rights allow acting with `target` rights?
    ///
    /// The administrator logs in with a password rather than an access key,
    /// and may also be a registered voter, so admin rights cover both.
    pub fn permits(self, target: Rights) -> bool {
        self == Rights::Admin || self == target
    }
}

impl Display for Rights {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Voter => "voter",
                Self::Admin => "admin",
            }
        )
    }
}

/// Marker for routes only the administrator may call.
#[derive(Debug)]
pub struct AdminUser;

/// Marker for routes any logged-in identity may call; the session itself
/// decides whether that identity is a registered voter.
#[derive(Debug)]
pub struct VoterUser;

impl User for AdminUser {
    const RIGHTS: Rights = Rights::Admin;
}

impl User for VoterUser {
    const RIGHTS: Rights = Rights::Voter;
}
