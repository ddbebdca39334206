//! HTTP handlers for post endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::AuthenticatedUser;
use crate::adapters::http::AppState;
use crate::application::handlers::post::{
    AddCommentCommand, CreatePostCommand, ListPostsQuery, ToggleLikeCommand,
};
use crate::domain::foundation::{CommunityId, PostId};

use super::dto::{AddCommentRequest, CreatePostRequest, PostResponse, ToggleLikeResponse};

fn parse_post_id(id: &str) -> Result<PostId, ApiError> {
    id.parse()
        .map_err(|_| ApiError::validation("id", format!("'{}' is not a valid post id", id)))
}

/// POST /api/posts - Publish a post (member only)
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let community_id: CommunityId = request.community_id.parse().map_err(|_| {
        ApiError::validation(
            "community_id",
            format!("'{}' is not a valid community id", request.community_id),
        )
    })?;

    let handler = state.create_post_handler();
    let post = handler
        .handle(CreatePostCommand {
            community_id,
            author: user.user_id,
            content: request.content,
            media: request.media,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// GET /api/posts/community/:communityId - Community feed, newest first
pub async fn list_posts(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(community_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let community_id: CommunityId = community_id.parse().map_err(|_| {
        ApiError::validation(
            "community_id",
            format!("'{}' is not a valid community id", community_id),
        )
    })?;

    let handler = state.list_posts_handler();
    let posts = handler.handle(ListPostsQuery { community_id }).await?;

    let response: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// POST /api/posts/:id/like - Toggle a like (member only)
pub async fn toggle_like(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let post_id = parse_post_id(&id)?;
    let handler = state.toggle_like_handler();
    let result = handler
        .handle(ToggleLikeCommand {
            post_id,
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(ToggleLikeResponse {
        post: result.post.into(),
        liked: result.liked,
    }))
}

/// POST /api/posts/:id/comment - Append a comment (member only)
pub async fn add_comment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<AddCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let post_id = parse_post_id(&id)?;
    let handler = state.add_comment_handler();
    let post = handler
        .handle(AddCommentCommand {
            post_id,
            user_id: user.user_id,
            text: request.text,
        })
        .await?;

    Ok(Json(PostResponse::from(post)))
}
