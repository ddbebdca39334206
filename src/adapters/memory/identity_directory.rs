//! Static IdentityDirectory adapter.
//!
//! Serves profiles from a registered map. Used in tests and development;
//! production wires a directory backed by the identity provider.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{IdentityDirectory, UserProfile};

/// Identity directory backed by an in-memory map.
#[derive(Clone, Default)]
pub struct StaticIdentityDirectory {
    profiles: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl StaticIdentityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a profile, replacing any previous one for the same user.
    pub async fn register(&self, profile: UserProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.id.clone(), profile);
    }
}

#[async_trait]
impl IdentityDirectory for StaticIdentityDirectory {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn find_many(&self, user_ids: &[UserId]) -> Result<Vec<UserProfile>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| profiles.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, name: &str) -> UserProfile {
        UserProfile {
            id: UserId::new(id).unwrap(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
        }
    }

    #[tokio::test]
    async fn find_returns_registered_profile() {
        let directory = StaticIdentityDirectory::new();
        directory.register(profile("u1", "Asha")).await;

        let found = directory.find(&UserId::new("u1").unwrap()).await.unwrap();
        assert_eq!(found.unwrap().name, "Asha");
    }

    #[tokio::test]
    async fn find_returns_none_for_unknown_user() {
        let directory = StaticIdentityDirectory::new();

        let found = directory.find(&UserId::new("ghost").unwrap()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn find_many_preserves_order_and_skips_unknowns() {
        let directory = StaticIdentityDirectory::new();
        directory.register(profile("u1", "Asha")).await;
        directory.register(profile("u3", "Ravi")).await;

        let found = directory
            .find_many(&[
                UserId::new("u1").unwrap(),
                UserId::new("u2").unwrap(),
                UserId::new("u3").unwrap(),
            ])
            .await
            .unwrap();

        let names: Vec<String> = found.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Asha", "Ravi"]);
    }
}
