//! Post store port.
//!
//! Like toggles and comment appends are store operations, not read-modify-
//! write cycles in handlers, so implementations can make them atomic per
//! post: a comment append must never be lost to a concurrent writer, and a
//! like toggle resolves last-toggle-wins.

use async_trait::async_trait;

use crate::domain::foundation::{CommunityId, DomainError, PostId, UserId};
use crate::domain::post::{Comment, Post};

/// Store port for Post aggregates.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a new post.
    async fn insert(&self, post: &Post) -> Result<(), DomainError>;

    /// Find a post by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError>;

    /// List a community's posts, newest first.
    async fn list_by_community(
        &self,
        community_id: &CommunityId,
    ) -> Result<Vec<Post>, DomainError>;

    /// Atomically toggle a user's like. Returns the updated post.
    ///
    /// # Errors
    ///
    /// - `PostNotFound` if the post doesn't exist
    async fn toggle_like(
        &self,
        post_id: &PostId,
        user_id: &UserId,
    ) -> Result<Post, DomainError>;

    /// Atomically append a comment. Returns the updated post.
    ///
    /// # Errors
    ///
    /// - `PostNotFound` if the post doesn't exist
    async fn add_comment(
        &self,
        post_id: &PostId,
        comment: &Comment,
    ) -> Result<Post, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn PostStore) {}
    }
}
