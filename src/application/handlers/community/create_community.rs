//! CreateCommunityHandler - Command handler for creating a community.

use std::sync::Arc;

use crate::domain::community::{Community, CommunityError, CommunityEvent, Membership};
use crate::domain::foundation::{
    CommunityId, DomainEvent, ErrorCode, MembershipId, Timestamp, UserId,
};
use crate::ports::{CommunityStore, EventPublisher, MembershipStore};

/// Command to create a community.
#[derive(Debug, Clone)]
pub struct CreateCommunityCommand {
    pub name: String,
    pub description: Option<String>,
    pub created_by: UserId,
}

/// Result of successful community creation.
#[derive(Debug, Clone)]
pub struct CreateCommunityResult {
    pub community: Community,
    pub membership: Membership,
}

/// Handler for creating a community.
///
/// Creation is a two-write operation: the creator's admin membership and the
/// community itself. The membership is written first, so any reader that can
/// resolve the community also finds its owner membership - there is no
/// window where the community exists with zero memberships.
pub struct CreateCommunityHandler {
    communities: Arc<dyn CommunityStore>,
    memberships: Arc<dyn MembershipStore>,
    publisher: Arc<dyn EventPublisher>,
}

impl CreateCommunityHandler {
    pub fn new(
        communities: Arc<dyn CommunityStore>,
        memberships: Arc<dyn MembershipStore>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            communities,
            memberships,
            publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCommunityCommand,
    ) -> Result<CreateCommunityResult, CommunityError> {
        // 1. Reject duplicate names early; the store re-checks on insert.
        if self
            .communities
            .find_by_name(&cmd.name)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?
            .is_some()
        {
            return Err(CommunityError::duplicate_name(cmd.name));
        }

        // 2. Build the aggregate pair.
        let community = Community::new(
            CommunityId::new(),
            cmd.name,
            cmd.description,
            cmd.created_by.clone(),
        )
        .map_err(|e| CommunityError::validation("name", e.to_string()))?;

        let membership =
            Membership::admin(MembershipId::new(), cmd.created_by, community.id);

        // 3. Owner membership first - see handler docs for the ordering.
        self.memberships
            .insert(&membership)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;

        // 4. Community second; compensate the membership if the name raced.
        if let Err(e) = self.communities.insert(&community).await {
            if let Err(cleanup) = self.memberships.delete(&membership.id).await {
                tracing::error!(
                    membership_id = %membership.id,
                    error = %cleanup,
                    "Failed to remove owner membership after community insert failure"
                );
            }
            return Err(if e.code == ErrorCode::DuplicateName {
                CommunityError::duplicate_name(community.name)
            } else {
                CommunityError::infrastructure(e.to_string())
            });
        }

        tracing::info!(
            community_id = %community.id,
            name = %community.name,
            created_by = %community.created_by,
            "Community created"
        );

        // 5. Publish event.
        let event = CommunityEvent::Created {
            community_id: community.id,
            name: community.name.clone(),
            created_by: community.created_by.clone(),
            occurred_at: Timestamp::now(),
        };
        self.publisher
            .publish(event.to_envelope())
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;

        Ok(CreateCommunityResult {
            community,
            membership,
        })
    }
}
