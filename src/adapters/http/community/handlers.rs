//! HTTP handlers for community endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::AuthenticatedUser;
use crate::adapters::http::AppState;
use crate::application::handlers::community::{
    CreateCommunityCommand, GetCommunityQuery, JoinCommunityCommand, LeaveCommunityCommand,
    ListCommunitiesQuery, ReconcileMembersCommand,
};
use crate::domain::foundation::CommunityId;

use super::dto::{
    CommunityDetailResponse, CommunityResponse, CommunitySummaryResponse,
    CreateCommunityRequest, MessageResponse, ReconcileResponse,
};

fn parse_community_id(id: &str) -> Result<CommunityId, ApiError> {
    id.parse()
        .map_err(|_| ApiError::validation("id", format!("'{}' is not a valid community id", id)))
}

/// POST /api/communities - Create a community
pub async fn create_community(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateCommunityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_community_handler();
    let result = handler
        .handle(CreateCommunityCommand {
            name: request.name,
            description: request.description,
            created_by: user.user_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommunityResponse::from(result.community)),
    ))
}

/// GET /api/communities - List communities with creator identities
pub async fn list_communities(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.list_communities_handler();
    let summaries = handler.handle(ListCommunitiesQuery::default()).await?;

    let response: Vec<CommunitySummaryResponse> =
        summaries.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// GET /api/communities/:id - Community detail with resolved identities
pub async fn get_community(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let community_id = parse_community_id(&id)?;
    let handler = state.get_community_handler();
    let detail = handler.handle(GetCommunityQuery { community_id }).await?;

    Ok(Json(CommunityDetailResponse::from(detail)))
}

/// POST /api/communities/:id/join - Join a community
pub async fn join_community(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let community_id = parse_community_id(&id)?;
    let handler = state.join_community_handler();
    handler
        .handle(JoinCommunityCommand {
            user_id: user.user_id,
            community_id,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Joined community successfully".to_string(),
    }))
}

/// POST /api/communities/:id/leave - Leave a community
pub async fn leave_community(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let community_id = parse_community_id(&id)?;
    let handler = state.leave_community_handler();
    handler
        .handle(LeaveCommunityCommand {
            user_id: user.user_id,
            community_id,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Left community successfully".to_string(),
    }))
}

/// POST /api/communities/:id/reconcile - Repair the member list
pub async fn reconcile_members(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let community_id = parse_community_id(&id)?;
    let handler = state.reconcile_members_handler();
    let result = handler.handle(ReconcileMembersCommand { community_id }).await?;

    Ok(Json(ReconcileResponse {
        repaired: result.repaired,
        member_count: result.community.members.len(),
    }))
}
