//! HTTP DTOs for post endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::post::{Comment, Post};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a post.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub community_id: String,
    pub content: String,
    #[serde(default)]
    pub media: Vec<String>,
}

/// Request to comment on a post.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCommentRequest {
    pub text: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Comment representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub user_id: String,
    pub text: String,
    pub created_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            user_id: comment.user_id.to_string(),
            text: comment.text,
            created_at: comment.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Post representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub community_id: String,
    pub user_id: String,
    pub content: String,
    pub media: Vec<String>,
    pub likes: Vec<String>,
    pub comments: Vec<CommentResponse>,
    pub created_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            community_id: post.community_id.to_string(),
            user_id: post.user_id.to_string(),
            content: post.content,
            media: post.media,
            likes: post.likes.iter().map(|u| u.as_str().to_string()).collect(),
            comments: post.comments.into_iter().map(Into::into).collect(),
            created_at: post.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Like toggle outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleLikeResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    /// True if the caller likes the post after the toggle.
    pub liked: bool,
}
