//! In-memory CommunityStore adapter.
//!
//! Backs tests and development. All checks happen under one write lock, so
//! name uniqueness holds under concurrent inserts.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::community::Community;
use crate::domain::foundation::{CommunityId, DomainError, ErrorCode};
use crate::ports::CommunityStore;

/// In-memory storage for communities.
#[derive(Debug, Clone, Default)]
pub struct MemoryCommunityStore {
    communities: Arc<RwLock<Vec<Community>>>,
}

impl MemoryCommunityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored communities (useful for tests).
    pub async fn count(&self) -> usize {
        self.communities.read().await.len()
    }
}

#[async_trait]
impl CommunityStore for MemoryCommunityStore {
    async fn insert(&self, community: &Community) -> Result<(), DomainError> {
        let mut communities = self.communities.write().await;
        if communities.iter().any(|c| c.name == community.name) {
            return Err(DomainError::new(
                ErrorCode::DuplicateName,
                format!("A community named '{}' already exists", community.name),
            ));
        }
        communities.push(community.clone());
        Ok(())
    }

    async fn update(&self, community: &Community) -> Result<(), DomainError> {
        let mut communities = self.communities.write().await;
        match communities.iter_mut().find(|c| c.id == community.id) {
            Some(existing) => {
                *existing = community.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::CommunityNotFound,
                format!("Community not found: {}", community.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &CommunityId) -> Result<Option<Community>, DomainError> {
        let communities = self.communities.read().await;
        Ok(communities.iter().find(|c| &c.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Community>, DomainError> {
        let communities = self.communities.read().await;
        Ok(communities.iter().find(|c| c.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Community>, DomainError> {
        Ok(self.communities.read().await.clone())
    }
}
