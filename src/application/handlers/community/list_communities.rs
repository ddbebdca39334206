//! ListCommunitiesHandler - Query handler for the community listing.

use std::sync::Arc;

use crate::domain::community::{Community, CommunityError};
use crate::ports::{CommunityStore, IdentityDirectory, UserProfile};

/// Query for all communities.
#[derive(Debug, Clone, Default)]
pub struct ListCommunitiesQuery {}

/// One listing row: community plus resolved creator profile.
#[derive(Debug, Clone)]
pub struct CommunitySummary {
    pub community: Community,
    pub creator: Option<UserProfile>,
}

/// Handler for listing communities with creator identities.
pub struct ListCommunitiesHandler {
    communities: Arc<dyn CommunityStore>,
    identities: Arc<dyn IdentityDirectory>,
}

impl ListCommunitiesHandler {
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
        _query: ListCommunitiesQuery,
    ) -> Result<Vec<CommunitySummary>, CommunityError> {
        let communities = self
            .communities
            .list()
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;

        let mut summaries = Vec::with_capacity(communities.len());
        for community in communities {
            let creator = self
                .identities
                .find(&community.created_by)
                .await
                .map_err(|e| CommunityError::infrastructure(e.to_string()))?;
            summaries.push(CommunitySummary { community, creator });
        }
        Ok(summaries)
    }
}
