//! PostgreSQL implementation of CommunityStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::community::Community;
use crate::domain::foundation::{CommunityId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::CommunityStore;

/// PostgreSQL implementation of the CommunityStore port.
///
/// Name uniqueness is enforced by the `communities_name_key` constraint.
pub struct PostgresCommunityStore {
    pool: PgPool,
}

impl PostgresCommunityStore {
    /// Creates a new store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a community.
#[derive(Debug, sqlx::FromRow)]
struct CommunityRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    created_by: String,
    members: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CommunityRow> for Community {
    type Error = DomainError;

    fn try_from(row: CommunityRow) -> Result<Self, Self::Error> {
        let members = row
            .members
            .into_iter()
            .map(UserId::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid member id: {}", e))
            })?;

        Ok(Community {
            id: CommunityId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            created_by: UserId::new(row.created_by).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid created_by: {}", e))
            })?,
            members,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn member_strings(community: &Community) -> Vec<String> {
    community
        .members
        .iter()
        .map(|m| m.as_str().to_string())
        .collect()
}

const SELECT_COLUMNS: &str =
    "id, name, description, created_by, members, created_at, updated_at";

#[async_trait]
impl CommunityStore for PostgresCommunityStore {
    async fn insert(&self, community: &Community) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO communities (id, name, description, created_by, members, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(community.id.as_uuid())
        .bind(&community.name)
        .bind(&community.description)
        .bind(community.created_by.as_str())
        .bind(member_strings(community))
        .bind(community.created_at.as_datetime())
        .bind(community.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("communities_name_key") {
                    return DomainError::new(
                        ErrorCode::DuplicateName,
                        format!("A community named '{}' already exists", community.name),
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert community: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, community: &Community) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE communities SET
                description = $2,
                members = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(community.id.as_uuid())
        .bind(&community.description)
        .bind(member_strings(community))
        .bind(community.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update community: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CommunityNotFound,
                format!("Community not found: {}", community.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &CommunityId) -> Result<Option<Community>, DomainError> {
        let row: Option<CommunityRow> = sqlx::query_as(&format!(
            "SELECT {} FROM communities WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load community: {}", e),
            )
        })?;

        row.map(Community::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Community>, DomainError> {
        let row: Option<CommunityRow> = sqlx::query_as(&format!(
            "SELECT {} FROM communities WHERE name = $1",
            SELECT_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load community: {}", e),
            )
        })?;

        row.map(Community::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Community>, DomainError> {
        let rows: Vec<CommunityRow> = sqlx::query_as(&format!(
            "SELECT {} FROM communities ORDER BY created_at",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list communities: {}", e),
            )
        })?;

        rows.into_iter().map(Community::try_from).collect()
    }
}
