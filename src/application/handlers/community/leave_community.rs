//! LeaveCommunityHandler - Command handler for leaving a community.

use std::sync::Arc;

use crate::application::locks::CommunityLocks;
use crate::domain::community::{Community, CommunityError, CommunityEvent};
use crate::domain::foundation::{CommunityId, DomainEvent, Timestamp, UserId};
use crate::ports::{CommunityStore, EventPublisher, MembershipStore};

/// Command to leave a community.
#[derive(Debug, Clone)]
pub struct LeaveCommunityCommand {
    pub user_id: UserId,
    pub community_id: CommunityId,
}

/// Result of a successful leave.
#[derive(Debug, Clone)]
pub struct LeaveCommunityResult {
    pub community: Community,
}

/// Handler for leaving a community.
///
/// The membership record is deactivated, never deleted, so rejoin can
/// reactivate it. Leaving without an active membership is a `NoMembership`
/// error, not a silent no-op. Like join, the member list is recomputed from
/// the ledger under the per-community lock.
pub struct LeaveCommunityHandler {
    communities: Arc<dyn CommunityStore>,
    memberships: Arc<dyn MembershipStore>,
    locks: CommunityLocks,
    publisher: Arc<dyn EventPublisher>,
}

impl LeaveCommunityHandler {
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
        cmd: LeaveCommunityCommand,
    ) -> Result<LeaveCommunityResult, CommunityError> {
        let _guard = self.locks.acquire(cmd.community_id).await;

        // 1. The community must exist.
        let mut community = self
            .communities
            .find_by_id(&cmd.community_id)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?
            .ok_or(CommunityError::NotFound(cmd.community_id))?;

        // 2. Ledger write: deactivate the active record.
        let mut membership = self
            .memberships
            .find(&cmd.user_id, &cmd.community_id)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?
            .filter(|m| m.is_active())
            .ok_or_else(|| {
                CommunityError::no_membership(cmd.user_id.clone(), cmd.community_id)
            })?;

        membership
            .deactivate()
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;
        self.memberships
            .update(&membership)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;

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
            user_id = %cmd.user_id,
            "User left community"
        );

        // 4. Publish event.
        let event = CommunityEvent::MemberLeft {
            community_id: community.id,
            user_id: cmd.user_id,
            occurred_at: Timestamp::now(),
        };
        self.publisher
            .publish(event.to_envelope())
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;

        Ok(LeaveCommunityResult { community })
    }
}
