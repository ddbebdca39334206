//! In-memory PostStore adapter.
//!
//! Like toggles and comment appends mutate the stored aggregate under the
//! write lock, so concurrent writers on one post never lose an append.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{CommunityId, DomainError, ErrorCode, PostId, UserId};
use crate::domain::post::{Comment, Post};
use crate::ports::PostStore;

/// In-memory storage for posts.
#[derive(Debug, Clone, Default)]
pub struct MemoryPostStore {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: &PostId) -> DomainError {
    DomainError::new(ErrorCode::PostNotFound, format!("Post not found: {}", id))
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn insert(&self, post: &Post) -> Result<(), DomainError> {
        self.posts.write().await.push(post.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| &p.id == id).cloned())
    }

    async fn list_by_community(
        &self,
        community_id: &CommunityId,
    ) -> Result<Vec<Post>, DomainError> {
        let posts = self.posts.read().await;
        let mut result: Vec<Post> = posts
            .iter()
            .filter(|p| &p.community_id == community_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn toggle_like(
        &self,
        post_id: &PostId,
        user_id: &UserId,
    ) -> Result<Post, DomainError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| &p.id == post_id)
            .ok_or_else(|| not_found(post_id))?;
        post.toggle_like(user_id.clone());
        Ok(post.clone())
    }

    async fn add_comment(
        &self,
        post_id: &PostId,
        comment: &Comment,
    ) -> Result<Post, DomainError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| &p.id == post_id)
            .ok_or_else(|| not_found(post_id))?;
        post.add_comment(comment.clone());
        Ok(post.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn post(community_id: CommunityId, content: &str) -> Post {
        Post::new(PostId::new(), community_id, user("author"), content, vec![]).unwrap()
    }

    #[tokio::test]
    async fn toggle_like_applies_atomically() {
        let store = MemoryPostStore::new();
        let p = post(CommunityId::new(), "hello");
        store.insert(&p).await.unwrap();

        let updated = store.toggle_like(&p.id, &user("u2")).await.unwrap();
        assert!(updated.is_liked_by(&user("u2")));

        let updated = store.toggle_like(&p.id, &user("u2")).await.unwrap();
        assert!(!updated.is_liked_by(&user("u2")));
    }

    #[tokio::test]
    async fn toggle_like_on_unknown_post_fails() {
        let store = MemoryPostStore::new();

        let err = store
            .toggle_like(&PostId::new(), &user("u2"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PostNotFound);
    }

    #[tokio::test]
    async fn concurrent_comment_appends_are_never_lost() {
        let store = Arc::new(MemoryPostStore::new());
        let p = post(CommunityId::new(), "hello");
        store.insert(&p).await.unwrap();

        let mut tasks = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            let post_id = p.id;
            tasks.push(tokio::spawn(async move {
                let comment =
                    Comment::new(user(&format!("u{}", i)), format!("comment {}", i)).unwrap();
                store.add_comment(&post_id, &comment).await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let stored = store.find_by_id(&p.id).await.unwrap().unwrap();
        assert_eq!(stored.comments.len(), 16);
    }

    #[tokio::test]
    async fn list_by_community_returns_newest_first() {
        let store = MemoryPostStore::new();
        let community_id = CommunityId::new();

        let first = post(community_id, "first");
        store.insert(&first).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = post(community_id, "second");
        store.insert(&second).await.unwrap();

        let contents: Vec<String> = store
            .list_by_community(&community_id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.content)
            .collect();
        assert_eq!(contents, vec!["second", "first"]);
    }
}
