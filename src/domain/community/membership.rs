//! Membership aggregate entity.
//!
//! A Membership is the relation granting a user a role within a community.
//! The ledger of Membership records is the single source of truth for
//! authorization decisions; the denormalized `Community::members` list is
//! derived from it.
//!
//! # Invariants
//!
//! - At most one record per (user, community) pair. Leaving deactivates the
//!   record; rejoining reactivates it with the role reset to `Member`.
//! - A community's creator holds an active `Admin` membership from creation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CommunityId, DomainError, ErrorCode, MembershipId, StateMachine, Timestamp, UserId,
};

use super::{MemberRole, MembershipStatus};

/// Membership aggregate - a user's role and status within one community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Unique identifier for this membership record.
    pub id: MembershipId,

    /// The user holding the membership.
    pub user_id: UserId,

    /// The community the membership belongs to.
    pub community_id: CommunityId,

    /// Role within the community.
    pub role: MemberRole,

    /// Whether the membership currently counts.
    pub status: MembershipStatus,

    /// When the user (last) joined the community.
    pub joined_at: Timestamp,

    /// When the record was created.
    pub created_at: Timestamp,

    /// When the record was last updated.
    pub updated_at: Timestamp,
}

impl Membership {
    /// Creates an active admin membership, used for community creators.
    pub fn admin(id: MembershipId, user_id: UserId, community_id: CommunityId) -> Self {
        Self::with_role(id, user_id, community_id, MemberRole::Admin)
    }

    /// Creates an active plain membership, used for joins.
    pub fn member(id: MembershipId, user_id: UserId, community_id: CommunityId) -> Self {
        Self::with_role(id, user_id, community_id, MemberRole::Member)
    }

    fn with_role(
        id: MembershipId,
        user_id: UserId,
        community_id: CommunityId,
        role: MemberRole,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            community_id,
            role,
            status: MembershipStatus::Active,
            joined_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if this membership counts toward the member list.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Returns true if the role satisfies the given minimum.
    pub fn has_role_at_least(&self, minimum: MemberRole) -> bool {
        self.role.meets(minimum)
    }

    /// Deactivates the membership when the user leaves.
    ///
    /// # Errors
    ///
    /// Returns error if the membership is already inactive.
    pub fn deactivate(&mut self) -> Result<(), DomainError> {
        self.transition_to(MembershipStatus::Inactive)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Reactivates the membership when the user rejoins.
    ///
    /// The role resets to `Member`; any previously granted privilege must be
    /// re-granted after rejoining. `joined_at` reflects the rejoin moment.
    ///
    /// # Errors
    ///
    /// Returns error if the membership is already active.
    pub fn rejoin(&mut self) -> Result<(), DomainError> {
        self.transition_to(MembershipStatus::Active)?;
        self.role = MemberRole::Member;
        let now = Timestamp::now();
        self.joined_at = now;
        self.updated_at = now;
        Ok(())
    }

    fn transition_to(&mut self, target: MembershipStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition membership from {:?} to {:?}",
                    self.status, target
                ),
            )
        })?;
        Ok(())
    }
}
