//! PostgreSQL implementation of MembershipStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::community::{MemberRole, Membership, MembershipStatus};
use crate::domain::foundation::{
    CommunityId, DomainError, ErrorCode, MembershipId, Timestamp, UserId,
};
use crate::ports::MembershipStore;

/// PostgreSQL implementation of the MembershipStore port.
///
/// One record per (user, community) is enforced by the
/// `memberships_user_id_community_id_key` constraint.
pub struct PostgresMembershipStore {
    pool: PgPool,
}

impl PostgresMembershipStore {
    /// Creates a new store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a membership.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: Uuid,
    user_id: String,
    community_id: Uuid,
    role: String,
    status: String,
    joined_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = DomainError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        let role: MemberRole = row.role.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid role: {}", e))
        })?;
        let status: MembershipStatus = row.status.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid status: {}", e))
        })?;

        Ok(Membership {
            id: MembershipId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            community_id: CommunityId::from_uuid(row.community_id),
            role,
            status,
            joined_at: Timestamp::from_datetime(row.joined_at),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, user_id, community_id, role, status, joined_at, created_at, updated_at";

#[async_trait]
impl MembershipStore for PostgresMembershipStore {
    async fn insert(&self, membership: &Membership) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO memberships (
                id, user_id, community_id, role, status, joined_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(membership.user_id.as_str())
        .bind(membership.community_id.as_uuid())
        .bind(membership.role.as_str())
        .bind(membership.status.as_str())
        .bind(membership.joined_at.as_datetime())
        .bind(membership.created_at.as_datetime())
        .bind(membership.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("memberships_user_id_community_id_key") {
                    return DomainError::new(
                        ErrorCode::AlreadyMember,
                        format!(
                            "A membership for user {} in community {} already exists",
                            membership.user_id, membership.community_id
                        ),
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert membership: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE memberships SET
                role = $2,
                status = $3,
                joined_at = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(membership.role.as_str())
        .bind(membership.status.as_str())
        .bind(membership.joined_at.as_datetime())
        .bind(membership.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update membership: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NoMembership,
                format!("Membership not found: {}", membership.id),
            ));
        }

        Ok(())
    }

    async fn find(
        &self,
        user_id: &UserId,
        community_id: &CommunityId,
    ) -> Result<Option<Membership>, DomainError> {
        let row: Option<MembershipRow> = sqlx::query_as(&format!(
            "SELECT {} FROM memberships WHERE user_id = $1 AND community_id = $2",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(community_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load membership: {}", e),
            )
        })?;

        row.map(Membership::try_from).transpose()
    }

    async fn active_for_community(
        &self,
        community_id: &CommunityId,
    ) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(&format!(
            "SELECT {} FROM memberships WHERE community_id = $1 AND status = 'active' ORDER BY joined_at",
            SELECT_COLUMNS
        ))
        .bind(community_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list memberships: {}", e),
            )
        })?;

        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn delete(&self, id: &MembershipId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM memberships WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete membership: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NoMembership,
                format!("Membership not found: {}", id),
            ));
        }

        Ok(())
    }
}
