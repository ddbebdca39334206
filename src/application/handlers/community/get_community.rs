//! GetCommunityHandler - Query handler for a community detail view.

use std::sync::Arc;

use crate::domain::community::{Community, CommunityError};
use crate::domain::foundation::CommunityId;
use crate::ports::{CommunityStore, IdentityDirectory, UserProfile};

/// Query for one community with resolved identities.
#[derive(Debug, Clone)]
pub struct GetCommunityQuery {
    pub community_id: CommunityId,
}

/// Community detail with creator and member profiles joined from the
/// identity collaborator. Profiles unknown to the directory are skipped.
#[derive(Debug, Clone)]
pub struct CommunityDetail {
    pub community: Community,
    pub creator: Option<UserProfile>,
    pub members: Vec<UserProfile>,
}

/// Handler for the community detail view.
pub struct GetCommunityHandler {
    communities: Arc<dyn CommunityStore>,
    identities: Arc<dyn IdentityDirectory>,
}

impl GetCommunityHandler {
    pub fn new(
        communities: Arc<dyn CommunityStore>,
        identities: Arc<dyn IdentityDirectory>,
    ) -> Self {
        Self {
            communities,
            identities,
        }
    }

    pub async fn handle(
        &self,
        query: GetCommunityQuery,
    ) -> Result<CommunityDetail, CommunityError> {
        let community = self
            .communities
            .find_by_id(&query.community_id)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?
            .ok_or(CommunityError::NotFound(query.community_id))?;

        let creator = self
            .identities
            .find(&community.created_by)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;

        let members = self
            .identities
            .find_many(&community.members)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;

        Ok(CommunityDetail {
            community,
            creator,
            members,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryCommunityStore, StaticIdentityDirectory};
    use crate::domain::foundation::UserId;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn profile(id: &str, name: &str) -> UserProfile {
        UserProfile {
            id: user(id),
            name: name.to_string(),
            email: format!("{}@example.com", id),
        }
    }

    #[tokio::test]
    async fn joins_creator_and_member_profiles() {
        let communities = Arc::new(MemoryCommunityStore::new());
        let identities = Arc::new(StaticIdentityDirectory::new());
        identities.register(profile("u1", "Asha")).await;
        identities.register(profile("u2", "Ravi")).await;

        let mut community =
            Community::new(CommunityId::new(), "Hikers", None, user("u1")).unwrap();
        community.add_member(user("u2")).unwrap();
        communities.insert(&community).await.unwrap();

        let handler = GetCommunityHandler::new(communities, identities);
        let detail = handler
            .handle(GetCommunityQuery {
                community_id: community.id,
            })
            .await
            .unwrap();

        assert_eq!(detail.creator.unwrap().name, "Asha");
        let names: Vec<String> = detail.members.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Asha", "Ravi"]);
    }

    #[tokio::test]
    async fn unknown_community_is_not_found() {
        let handler = GetCommunityHandler::new(
            Arc::new(MemoryCommunityStore::new()),
            Arc::new(StaticIdentityDirectory::new()),
        );

        let err = handler
            .handle(GetCommunityQuery {
                community_id: CommunityId::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CommunityError::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_profiles_are_skipped_not_fatal() {
        let communities = Arc::new(MemoryCommunityStore::new());
        let identities = Arc::new(StaticIdentityDirectory::new());

        let community =
            Community::new(CommunityId::new(), "Hikers", None, user("u1")).unwrap();
        communities.insert(&community).await.unwrap();

        let handler = GetCommunityHandler::new(communities, identities);
        let detail = handler
            .handle(GetCommunityQuery {
                community_id: community.id,
            })
            .await
            .unwrap();

        assert!(detail.creator.is_none());
        assert!(detail.members.is_empty());
        assert_eq!(detail.community.members.len(), 1);
    }
}
