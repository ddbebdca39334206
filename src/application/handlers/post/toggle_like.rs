//! ToggleLikeHandler - Command handler for liking/unliking a post.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::domain::community::MemberRole;
use crate::domain::foundation::{DomainError, ErrorCode, PostId, UserId};
use crate::domain::post::Post;
use crate::ports::PostStore;

/// Command to toggle a like on a post.
#[derive(Debug, Clone)]
pub struct ToggleLikeCommand {
    pub post_id: PostId,
    pub user_id: UserId,
}

/// Result of a like toggle.
#[derive(Debug, Clone)]
pub struct ToggleLikeResult {
    pub post: Post,
    /// True if the post is liked by the user after the toggle.
    pub liked: bool,
}

/// Handler for like toggles.
///
/// The user must hold an active membership in the post's community. The
/// toggle itself is applied atomically by the store; concurrent toggles
/// resolve last-toggle-wins.
pub struct ToggleLikeHandler {
    posts: Arc<dyn PostStore>,
    gate: AuthorizationGate,
}

impl ToggleLikeHandler {
    pub fn new(posts: Arc<dyn PostStore>, gate: AuthorizationGate) -> Self {
        Self { posts, gate }
    }

    pub async fn handle(&self, cmd: ToggleLikeCommand) -> Result<ToggleLikeResult, DomainError> {
        let post = self
            .posts
            .find_by_id(&cmd.post_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::PostNotFound,
                    format!("Post not found: {}", cmd.post_id),
                )
            })?;

        self.gate
            .require_role(&cmd.user_id, &post.community_id, MemberRole::Member)
            .await?;

        let post = self.posts.toggle_like(&cmd.post_id, &cmd.user_id).await?;
        let liked = post.is_liked_by(&cmd.user_id);

        Ok(ToggleLikeResult { post, liked })
    }
}
