//! CreatePostHandler - Command handler for publishing a post.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::domain::community::MemberRole;
use crate::domain::foundation::{CommunityId, DomainError, PostId, UserId};
use crate::domain::post::Post;
use crate::ports::PostStore;

/// Command to create a post.
#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub community_id: CommunityId,
    pub author: UserId,
    pub content: String,
    pub media: Vec<String>,
}

/// Handler for creating posts.
///
/// The author must hold an active membership in the community.
pub struct CreatePostHandler {
    posts: Arc<dyn PostStore>,
    gate: AuthorizationGate,
}

impl CreatePostHandler {
    pub fn new(posts: Arc<dyn PostStore>, gate: AuthorizationGate) -> Self {
        Self { posts, gate }
    }

    pub async fn handle(&self, cmd: CreatePostCommand) -> Result<Post, DomainError> {
        self.gate
            .require_role(&cmd.author, &cmd.community_id, MemberRole::Member)
            .await?;

        let post = Post::new(
            PostId::new(),
            cmd.community_id,
            cmd.author,
            cmd.content,
            cmd.media,
        )?;

        self.posts.insert(&post).await?;

        Ok(post)
    }
}
