//! PostgreSQL implementation of PostStore.
//!
//! Comments live in the append-only `post_comments` table, so a comment is
//! one INSERT and can never be lost to a concurrent writer. Like toggles
//! are a single conditional UPDATE, which makes them atomic per post.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    CommunityId, DomainError, ErrorCode, PostId, Timestamp, UserId,
};
use crate::domain::post::{Comment, Post};
use crate::ports::PostStore;

/// PostgreSQL implementation of the PostStore port.
pub struct PostgresPostStore {
    pool: PgPool,
}

impl PostgresPostStore {
    /// Creates a new store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_comments(&self, post_id: &PostId) -> Result<Vec<Comment>, DomainError> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            r#"
            SELECT user_id, body, created_at
            FROM post_comments
            WHERE post_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load comments: {}", e),
            )
        })?;

        rows.into_iter().map(Comment::try_from).collect()
    }

    async fn load_post(&self, post_id: &PostId) -> Result<Option<Post>, DomainError> {
        let row: Option<PostRow> = sqlx::query_as(&format!(
            "SELECT {} FROM posts WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load post: {}", e),
            )
        })?;

        match row {
            Some(row) => {
                let comments = self.load_comments(post_id).await?;
                Ok(Some(row.into_post(comments)?))
            }
            None => Ok(None),
        }
    }
}

/// Database row representation of a post (without comments).
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    community_id: Uuid,
    user_id: String,
    content: String,
    media: Vec<String>,
    likes: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Database row representation of a comment.
#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    user_id: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = DomainError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            text: row.body,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

impl PostRow {
    fn into_post(self, comments: Vec<Comment>) -> Result<Post, DomainError> {
        let likes = self
            .likes
            .into_iter()
            .map(UserId::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid like user: {}", e))
            })?;

        Ok(Post {
            id: PostId::from_uuid(self.id),
            community_id: CommunityId::from_uuid(self.community_id),
            user_id: UserId::new(self.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            content: self.content,
            media: self.media,
            likes,
            comments,
            created_at: Timestamp::from_datetime(self.created_at),
            updated_at: Timestamp::from_datetime(self.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, community_id, user_id, content, media, likes, created_at, updated_at";

fn not_found(id: &PostId) -> DomainError {
    DomainError::new(ErrorCode::PostNotFound, format!("Post not found: {}", id))
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn insert(&self, post: &Post) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, community_id, user_id, content, media, likes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(post.community_id.as_uuid())
        .bind(post.user_id.as_str())
        .bind(&post.content)
        .bind(&post.media)
        .bind(
            post.likes
                .iter()
                .map(|u| u.as_str().to_string())
                .collect::<Vec<_>>(),
        )
        .bind(post.created_at.as_datetime())
        .bind(post.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert post: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        self.load_post(id).await
    }

    async fn list_by_community(
        &self,
        community_id: &CommunityId,
    ) -> Result<Vec<Post>, DomainError> {
        let rows: Vec<PostRow> = sqlx::query_as(&format!(
            "SELECT {} FROM posts WHERE community_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(community_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list posts: {}", e),
            )
        })?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in rows {
            let post_id = PostId::from_uuid(row.id);
            let comments = self.load_comments(&post_id).await?;
            posts.push(row.into_post(comments)?);
        }
        Ok(posts)
    }

    async fn toggle_like(
        &self,
        post_id: &PostId,
        user_id: &UserId,
    ) -> Result<Post, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE posts SET
                likes = CASE
                    WHEN $2 = ANY(likes) THEN array_remove(likes, $2)
                    ELSE array_append(likes, $2)
                END,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(post_id.as_uuid())
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to toggle like: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(not_found(post_id));
        }

        self.load_post(post_id).await?.ok_or_else(|| not_found(post_id))
    }

    async fn add_comment(
        &self,
        post_id: &PostId,
        comment: &Comment,
    ) -> Result<Post, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO post_comments (post_id, user_id, body, created_at)
            SELECT $1, $2, $3, $4
            WHERE EXISTS (SELECT 1 FROM posts WHERE id = $1)
            "#,
        )
        .bind(post_id.as_uuid())
        .bind(comment.user_id.as_str())
        .bind(&comment.text)
        .bind(comment.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to add comment: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(not_found(post_id));
        }

        self.load_post(post_id).await?.ok_or_else(|| not_found(post_id))
    }
}
