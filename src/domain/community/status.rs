//! Membership status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Status of a membership record.
///
/// Leaving a community deactivates the record instead of deleting it,
/// which is what keeps the one-record-per-pair invariant across rejoin
/// cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// The user is currently a member.
    Active,

    /// The user has left; the record is retained for rejoin.
    Inactive,
}

impl MembershipStatus {
    /// Returns true if this status counts toward the community member list.
    pub fn is_active(&self) -> bool {
        matches!(self, MembershipStatus::Active)
    }

    /// Returns the stable string form used in storage and transport.
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "active",
            MembershipStatus::Inactive => "inactive",
        }
    }
}

impl StateMachine for MembershipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MembershipStatus::*;
        matches!((self, target), (Active, Inactive) | (Inactive, Active))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipStatus::*;
        match self {
            Active => vec![Inactive],
            Inactive => vec![Active],
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MembershipStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(MembershipStatus::Active),
            "inactive" => Ok(MembershipStatus::Inactive),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("Unknown membership status '{}'", other),
            )),
        }
    }
}
