//! Membership store port.
//!
//! Persistence contract for the membership ledger: the authoritative
//! (user, community) → role/status mapping behind every authorization
//! decision.
//!
//! # Design
//!
//! - **One record per pair**: implementations enforce uniqueness of
//!   (user_id, community_id) at insert time
//! - **Ledger is authoritative**: the community member list is always
//!   recomputed from `active_for_community`

use async_trait::async_trait;

use crate::domain::community::Membership;
use crate::domain::foundation::{CommunityId, DomainError, MembershipId, UserId};

/// Store port for the membership ledger.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Insert a new membership record.
    ///
    /// # Errors
    ///
    /// - `AlreadyMember` if a record for (user, community) exists
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Update an existing membership record.
    ///
    /// # Errors
    ///
    /// - `NoMembership` if the record doesn't exist
    async fn update(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Find the record for (user, community), regardless of status.
    ///
    /// At most one record exists per pair.
    async fn find(
        &self,
        user_id: &UserId,
        community_id: &CommunityId,
    ) -> Result<Option<Membership>, DomainError>;

    /// All active memberships for a community, in join order.
    ///
    /// This is the authoritative source the member list is derived from.
    async fn active_for_community(
        &self,
        community_id: &CommunityId,
    ) -> Result<Vec<Membership>, DomainError>;

    /// Delete a membership record.
    ///
    /// Used as a compensating action when community creation fails after the
    /// owner membership was written, and in tests. Normal leaves deactivate
    /// instead.
    async fn delete(&self, id: &MembershipId) -> Result<(), DomainError>;
}
