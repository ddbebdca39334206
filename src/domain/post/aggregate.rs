//! Post aggregate entity.
//!
//! Community posts carry a like toggle-set and an append-only comment
//! sequence. Likes are last-toggle-wins under concurrency; comment appends
//! must never be lost, which the stores guarantee by applying both
//! operations atomically per post.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CommunityId, OwnedByUser, PostId, Timestamp, UserId, ValidationError,
};

/// A single comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// The commenting user.
    pub user_id: UserId,

    /// Comment body.
    pub text: String,

    /// When the comment was written.
    pub created_at: Timestamp,
}

impl Comment {
    /// Creates a comment, rejecting empty text.
    pub fn new(user_id: UserId, text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("text"));
        }
        Ok(Self {
            user_id,
            text,
            created_at: Timestamp::now(),
        })
    }
}

/// Post aggregate - user content within a community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier for this post.
    pub id: PostId,

    /// The community the post belongs to.
    pub community_id: CommunityId,

    /// The authoring user; sole holder of mutation rights over content.
    pub user_id: UserId,

    /// Post body.
    pub content: String,

    /// Ordered media references (URLs).
    pub media: Vec<String>,

    /// Users who like the post; no duplicates.
    pub likes: Vec<UserId>,

    /// Append-only comment sequence in arrival order.
    pub comments: Vec<Comment>,

    /// When the post was created.
    pub created_at: Timestamp,

    /// When the post was last updated.
    pub updated_at: Timestamp,
}

impl Post {
    /// Creates a new post.
    ///
    /// # Errors
    ///
    /// Returns error if content is empty.
    pub fn new(
        id: PostId,
        community_id: CommunityId,
        user_id: UserId,
        content: impl Into<String>,
        media: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            community_id,
            user_id,
            content,
            media,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns true if the user currently likes the post.
    pub fn is_liked_by(&self, user_id: &UserId) -> bool {
        self.likes.contains(user_id)
    }

    /// Toggles the user's like. Returns true if the post is liked afterwards.
    pub fn toggle_like(&mut self, user_id: UserId) -> bool {
        self.updated_at = Timestamp::now();
        if self.is_liked_by(&user_id) {
            self.likes.retain(|u| u != &user_id);
            false
        } else {
            self.likes.push(user_id);
            true
        }
    }

    /// Appends a comment. Comments are never removed or reordered.
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
        self.updated_at = Timestamp::now();
    }
}

impl OwnedByUser for Post {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}
