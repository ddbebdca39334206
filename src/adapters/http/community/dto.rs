//! HTTP DTOs for community endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::community::{CommunityDetail, CommunitySummary};
use crate::domain::community::Community;
use crate::ports::UserProfile;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a community.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommunityRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Community representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct CommunityResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_by: String,
    pub members: Vec<String>,
    pub created_at: String,
}

impl From<Community> for CommunityResponse {
    fn from(community: Community) -> Self {
        Self {
            id: community.id.to_string(),
            name: community.name,
            description: community.description,
            created_by: community.created_by.to_string(),
            members: community
                .members
                .iter()
                .map(|m| m.as_str().to_string())
                .collect(),
            created_at: community.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Resolved identity reference.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name,
            email: profile.email,
        }
    }
}

/// Listing row: community plus creator profile.
#[derive(Debug, Clone, Serialize)]
pub struct CommunitySummaryResponse {
    #[serde(flatten)]
    pub community: CommunityResponse,
    pub creator: Option<UserProfileResponse>,
}

impl From<CommunitySummary> for CommunitySummaryResponse {
    fn from(summary: CommunitySummary) -> Self {
        Self {
            community: summary.community.into(),
            creator: summary.creator.map(Into::into),
        }
    }
}

/// Detail view: community plus creator and member profiles.
#[derive(Debug, Clone, Serialize)]
pub struct CommunityDetailResponse {
    #[serde(flatten)]
    pub community: CommunityResponse,
    pub creator: Option<UserProfileResponse>,
    pub member_profiles: Vec<UserProfileResponse>,
}

impl From<CommunityDetail> for CommunityDetailResponse {
    fn from(detail: CommunityDetail) -> Self {
        Self {
            community: detail.community.into(),
            creator: detail.creator.map(Into::into),
            member_profiles: detail.members.into_iter().map(Into::into).collect(),
        }
    }
}

/// Simple status message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Reconcile outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileResponse {
    pub repaired: bool,
    pub member_count: usize,
}
