//! JoinCommunityHandler - Command handler for joining a community.

use std::sync::Arc;

use crate::application::locks::CommunityLocks;
use crate::domain::community::{Community, CommunityError, CommunityEvent, Membership};
use crate::domain::foundation::{CommunityId, DomainEvent, MembershipId, Timestamp, UserId};
use crate::ports::{CommunityStore, EventPublisher, MembershipStore};

/// Command to join a community.
#[derive(Debug, Clone)]
pub struct JoinCommunityCommand {
    pub user_id: UserId,
    pub community_id: CommunityId,
}

/// Result of a successful join.
#[derive(Debug, Clone)]
pub struct JoinCommunityResult {
    pub community: Community,
    pub membership: Membership,
}

/// Handler for joining a community.
///
/// Joining is a two-write operation serialized per community: the ledger
/// record is written first, then the member list is recomputed from the
/// ledger's active records. Deriving the list instead of appending to it
/// makes every join double as a reconcile, so a previously diverged list is
/// repaired on the next mutation.
///
/// A second join for an active pair is an `AlreadyMember` error, not a
/// silent no-op. A join after a leave reactivates the retained record.
pub struct JoinCommunityHandler {
    communities: Arc<dyn CommunityStore>,
    memberships: Arc<dyn MembershipStore>,
    locks: CommunityLocks,
    publisher: Arc<dyn EventPublisher>,
}

impl JoinCommunityHandler {
    pub fn new(
        communities: Arc<dyn CommunityStore>,
        memberships: Arc<dyn MembershipStore>,
        locks: CommunityLocks,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            communities,
            memberships,
            locks,
            publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: JoinCommunityCommand,
    ) -> Result<JoinCommunityResult, CommunityError> {
        let _guard = self.locks.acquire(cmd.community_id).await;

        // 1. The community must exist.
        let mut community = self
            .communities
            .find_by_id(&cmd.community_id)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?
            .ok_or(CommunityError::NotFound(cmd.community_id))?;

        // 2. Ledger write: insert a fresh record or reactivate a left one.
        let existing = self
            .memberships
            .find(&cmd.user_id, &cmd.community_id)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;

        let membership = match existing {
            Some(m) if m.is_active() => {
                return Err(CommunityError::already_member(cmd.user_id, cmd.community_id));
            }
            Some(mut m) => {
                m.rejoin()
                    .map_err(|e| CommunityError::infrastructure(e.to_string()))?;
                self.memberships
                    .update(&m)
                    .await
                    .map_err(|e| CommunityError::infrastructure(e.to_string()))?;
                m
            }
            None => {
                let m = Membership::member(
                    MembershipId::new(),
                    cmd.user_id.clone(),
                    cmd.community_id,
                );
                self.memberships
                    .insert(&m)
                    .await
                    .map_err(|e| CommunityError::infrastructure(e.to_string()))?;
                m
            }
        };

        // 3. Member-list write, derived from the ledger.
        let active = self
            .memberships
            .active_for_community(&cmd.community_id)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;
        community.set_members(active.into_iter().map(|m| m.user_id).collect());
        self.communities
            .update(&community)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;

        tracing::info!(
            community_id = %community.id,
            user_id = %membership.user_id,
            "User joined community"
        );

        // 4. Publish event.
        let event = CommunityEvent::MemberJoined {
            community_id: community.id,
            user_id: membership.user_id.clone(),
            role: membership.role,
            occurred_at: Timestamp::now(),
        };
        self.publisher
            .publish(event.to_envelope())
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;

        Ok(JoinCommunityResult {
            community,
            membership,
        })
    }
}
