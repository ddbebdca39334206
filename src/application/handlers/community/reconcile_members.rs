//! ReconcileMembersHandler - Command handler for member-list repair.

use std::sync::Arc;

use crate::application::locks::CommunityLocks;
use crate::domain::community::{Community, CommunityError, CommunityEvent};
use crate::domain::foundation::{CommunityId, DomainEvent, Timestamp};
use crate::ports::{CommunityStore, EventPublisher, MembershipStore};

/// Command to reconcile a community's member list with the ledger.
#[derive(Debug, Clone)]
pub struct ReconcileMembersCommand {
    pub community_id: CommunityId,
}

/// Result of a reconcile run.
#[derive(Debug, Clone)]
pub struct ReconcileMembersResult {
    pub community: Community,
    /// True if the stored list had diverged and was repaired.
    pub repaired: bool,
}

/// Handler for recomputing a member list from the membership ledger.
///
/// Idempotent and safe to run at any time: join/leave already reconcile
/// opportunistically, this handler covers periodic runs and manual repair
/// after a partial write.
pub struct ReconcileMembersHandler {
    communities: Arc<dyn CommunityStore>,
    memberships: Arc<dyn MembershipStore>,
    locks: CommunityLocks,
    publisher: Arc<dyn EventPublisher>,
}

impl ReconcileMembersHandler {
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
        cmd: ReconcileMembersCommand,
    ) -> Result<ReconcileMembersResult, CommunityError> {
        let _guard = self.locks.acquire(cmd.community_id).await;

        let mut community = self
            .communities
            .find_by_id(&cmd.community_id)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?
            .ok_or(CommunityError::NotFound(cmd.community_id))?;

        let active = self
            .memberships
            .active_for_community(&cmd.community_id)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;

        let repaired =
            community.set_members(active.into_iter().map(|m| m.user_id).collect());

        if repaired {
            self.communities
                .update(&community)
                .await
                .map_err(|e| CommunityError::infrastructure(e.to_string()))?;
            tracing::warn!(
                community_id = %community.id,
                member_count = community.members.len(),
                "Member list had diverged from the ledger and was repaired"
            );
        }

        let event = CommunityEvent::MembersReconciled {
            community_id: community.id,
            member_count: community.members.len(),
            repaired,
            occurred_at: Timestamp::now(),
        };
        self.publisher
            .publish(event.to_envelope())
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;

        Ok(ReconcileMembersResult {
            community,
            repaired,
        })
    }
}
