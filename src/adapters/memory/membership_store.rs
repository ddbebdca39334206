//! In-memory MembershipStore adapter.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::community::Membership;
use crate::domain::foundation::{CommunityId, DomainError, ErrorCode, MembershipId, UserId};
use crate::ports::MembershipStore;

/// In-memory storage for the membership ledger.
///
/// Records are kept in insertion order, so `active_for_community` yields
/// members in join order.
#[derive(Debug, Clone, Default)]
pub struct MemoryMembershipStore {
    memberships: Arc<RwLock<Vec<Membership>>>,
}

impl MemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records regardless of status (useful for tests).
    pub async fn count(&self) -> usize {
        self.memberships.read().await.len()
    }
}

#[async_trait]
impl MembershipStore for MemoryMembershipStore {
    async fn insert(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut memberships = self.memberships.write().await;
        if memberships
            .iter()
            .any(|m| m.user_id == membership.user_id && m.community_id == membership.community_id)
        {
            return Err(DomainError::new(
                ErrorCode::AlreadyMember,
                format!(
                    "A membership for user {} in community {} already exists",
                    membership.user_id, membership.community_id
                ),
            ));
        }
        memberships.push(membership.clone());
        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut memberships = self.memberships.write().await;
        match memberships.iter_mut().find(|m| m.id == membership.id) {
            Some(existing) => {
                *existing = membership.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::NoMembership,
                format!("Membership not found: {}", membership.id),
            )),
        }
    }

    async fn find(
        &self,
        user_id: &UserId,
        community_id: &CommunityId,
    ) -> Result<Option<Membership>, DomainError> {
        let memberships = self.memberships.read().await;
        Ok(memberships
            .iter()
            .find(|m| &m.user_id == user_id && &m.community_id == community_id)
            .cloned())
    }

    async fn active_for_community(
        &self,
        community_id: &CommunityId,
    ) -> Result<Vec<Membership>, DomainError> {
        let memberships = self.memberships.read().await;
        let mut active: Vec<Membership> = memberships
            .iter()
            .filter(|m| &m.community_id == community_id && m.is_active())
            .cloned()
            .collect();
        // Join order, with rejoins counting from their rejoin time.
        active.sort_by(|a, b| a.joined_at.cmp(&b.joined_at));
        Ok(active)
    }

    async fn delete(&self, id: &MembershipId) -> Result<(), DomainError> {
        let mut memberships = self.memberships.write().await;
        let before = memberships.len();
        memberships.retain(|m| &m.id != id);
        if memberships.len() == before {
            return Err(DomainError::new(
                ErrorCode::NoMembership,
                format!("Membership not found: {}", id),
            ));
        }
        Ok(())
    }
}
