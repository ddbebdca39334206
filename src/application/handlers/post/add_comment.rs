//! AddCommentHandler - Command handler for commenting on a post.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::domain::community::MemberRole;
use crate::domain::foundation::{DomainError, ErrorCode, PostId, UserId};
use crate::domain::post::{Comment, Post};
use crate::ports::PostStore;

/// Command to append a comment to a post.
#[derive(Debug, Clone)]
pub struct AddCommentCommand {
    pub post_id: PostId,
    pub user_id: UserId,
    pub text: String,
}

/// Handler for comment appends.
///
/// The commenter must hold an active membership in the post's community.
/// The append is applied atomically by the store and is never lost to a
/// concurrent writer.
pub struct AddCommentHandler {
    posts: Arc<dyn PostStore>,
    gate: AuthorizationGate,
}

impl AddCommentHandler {
    pub fn new(posts: Arc<dyn PostStore>, gate: AuthorizationGate) -> Self {
        Self { posts, gate }
    }

    pub async fn handle(&self, cmd: AddCommentCommand) -> Result<Post, DomainError> {
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

        let comment = Comment::new(cmd.user_id, cmd.text)?;
        self.posts.add_comment(&cmd.post_id, &comment).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        MemoryMembershipStore, MemoryPaymentStore, MemoryPostStore,
    };
    use crate::domain::community::Membership;
    use crate::domain::foundation::{CommunityId, MembershipId};
    use crate::ports::MembershipStore;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    struct Fixture {
        posts: Arc<MemoryPostStore>,
        memberships: Arc<MemoryMembershipStore>,
        handler: AddCommentHandler,
    }

    fn fixture() -> Fixture {
        let posts = Arc::new(MemoryPostStore::new());
        let memberships = Arc::new(MemoryMembershipStore::new());
        let gate = AuthorizationGate::new(
            memberships.clone(),
            Arc::new(MemoryPaymentStore::new()),
        );
        let handler = AddCommentHandler::new(posts.clone(), gate);
        Fixture {
            posts,
            memberships,
            handler,
        }
    }

    async fn seed(f: &Fixture) -> Post {
        let community_id = CommunityId::new();
        f.memberships
            .insert(&Membership::member(MembershipId::new(), user("u2"), community_id))
            .await
            .unwrap();
        let post = Post::new(
            PostId::new(),
            community_id,
            user("author"),
            "hello",
            vec![],
        )
        .unwrap();
        f.posts.insert(&post).await.unwrap();
        post
    }

    #[tokio::test]
    async fn member_comment_is_appended() {
        let f = fixture();
        let post = seed(&f).await;

        let updated = f
            .handler
            .handle(AddCommentCommand {
                post_id: post.id,
                user_id: user("u2"),
                text: "Nice!".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(updated.comments.len(), 1);
        assert_eq!(updated.comments[0].text, "Nice!");
        assert_eq!(updated.comments[0].user_id, user("u2"));
    }

    #[tokio::test]
    async fn comments_accumulate_in_order() {
        let f = fixture();
        let post = seed(&f).await;

        for text in ["first", "second", "third"] {
            f.handler
                .handle(AddCommentCommand {
                    post_id: post.id,
                    user_id: user("u2"),
                    text: text.to_string(),
                })
                .await
                .unwrap();
        }

        let stored = f.posts.find_by_id(&post.id).await.unwrap().unwrap();
        let texts: Vec<&str> = stored.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn empty_comment_is_rejected() {
        let f = fixture();
        let post = seed(&f).await;

        let err = f
            .handler
            .handle(AddCommentCommand {
                post_id: post.id,
                user_id: user("u2"),
                text: "  ".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn non_member_cannot_comment() {
        let f = fixture();
        let post = seed(&f).await;

        let err = f
            .handler
            .handle(AddCommentCommand {
                post_id: post.id,
                user_id: user("outsider"),
                text: "hi".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientRole);
    }
}
