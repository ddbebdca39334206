//! ListPostsHandler - Query handler for a community's feed.

use std::sync::Arc;

use crate::domain::foundation::{CommunityId, DomainError};
use crate::domain::post::Post;
use crate::ports::PostStore;

/// Query for a community's posts.
#[derive(Debug, Clone)]
pub struct ListPostsQuery {
    pub community_id: CommunityId,
}

/// Handler for listing posts, newest first. Reads are open to everyone.
pub struct ListPostsHandler {
    posts: Arc<dyn PostStore>,
}

impl ListPostsHandler {
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }

    pub async fn handle(&self, query: ListPostsQuery) -> Result<Vec<Post>, DomainError> {
        self.posts.list_by_community(&query.community_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryPostStore;
    use crate::domain::foundation::{PostId, UserId};

    #[tokio::test]
    async fn lists_only_the_requested_community() {
        let posts = Arc::new(MemoryPostStore::new());
        let community_id = CommunityId::new();

        let mine = Post::new(
            PostId::new(),
            community_id,
            UserId::new("u1").unwrap(),
            "ours",
            vec![],
        )
        .unwrap();
        let other = Post::new(
            PostId::new(),
            CommunityId::new(),
            UserId::new("u1").unwrap(),
            "theirs",
            vec![],
        )
        .unwrap();
        posts.insert(&mine).await.unwrap();
        posts.insert(&other).await.unwrap();

        let handler = ListPostsHandler::new(posts);
        let feed = handler.handle(ListPostsQuery { community_id }).await.unwrap();

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].content, "ours");
    }
}
