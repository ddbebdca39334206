//! Member roles ordered by privilege.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Role a user holds within a community.
///
/// Roles form a total order, `Member < Moderator < Admin`, so privilege
/// checks are comparisons rather than string equality.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Ordinary community member.
    Member,

    /// Can moderate posts and comments.
    Moderator,

    /// Full control over the community. The creator always holds this role.
    Admin,
}

impl MemberRole {
    /// Returns true if this role satisfies the given minimum requirement.
    pub fn meets(&self, minimum: MemberRole) -> bool {
        *self >= minimum
    }

    /// Returns the stable string form used in storage and transport.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Member => "member",
            MemberRole::Moderator => "moderator",
            MemberRole::Admin => "admin",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(MemberRole::Member),
            "moderator" => Ok(MemberRole::Moderator),
            "admin" => Ok(MemberRole::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("Unknown role '{}'", other),
            )),
        }
    }
}
