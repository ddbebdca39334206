//! PostgreSQL implementation of EventStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::event::Event;
use crate::domain::foundation::{
    CommunityId, DomainError, ErrorCode, EventId, Timestamp, UserId,
};
use crate::ports::EventStore;

/// PostgreSQL implementation of the EventStore port.
pub struct PostgresEventStore {
    pool: PgPool,
}

impl PostgresEventStore {
    /// Creates a new store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an event.
#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    date: DateTime<Utc>,
    location: String,
    price: i64,
    created_by: String,
    community_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = DomainError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Event {
            id: EventId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            date: Timestamp::from_datetime(row.date),
            location: row.location,
            price: row.price,
            created_by: UserId::new(row.created_by).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid created_by: {}", e))
            })?,
            community_id: CommunityId::from_uuid(row.community_id),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, title, description, date, location, price, created_by, community_id, created_at, updated_at";

#[async_trait]
impl EventStore for PostgresEventStore {
    async fn insert(&self, event: &Event) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO events (
                id, title, description, date, location, price, created_by, community_id,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date.as_datetime())
        .bind(&event.location)
        .bind(event.price)
        .bind(event.created_by.as_str())
        .bind(event.community_id.as_uuid())
        .bind(event.created_at.as_datetime())
        .bind(event.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert event: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, event: &Event) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE events SET
                title = $2,
                description = $3,
                date = $4,
                location = $5,
                price = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date.as_datetime())
        .bind(&event.location)
        .bind(event.price)
        .bind(event.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update event: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::EventNotFound,
                format!("Event not found: {}", event.id),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: &EventId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete event: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::EventNotFound,
                format!("Event not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        let row: Option<EventRow> = sqlx::query_as(&format!(
            "SELECT {} FROM events WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load event: {}", e),
            )
        })?;

        row.map(Event::try_from).transpose()
    }

    async fn list(
        &self,
        community_id: Option<&CommunityId>,
    ) -> Result<Vec<Event>, DomainError> {
        let rows: Vec<EventRow> = match community_id {
            Some(community_id) => {
                sqlx::query_as(&format!(
                    "SELECT {} FROM events WHERE community_id = $1 ORDER BY created_at",
                    SELECT_COLUMNS
                ))
                .bind(community_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {} FROM events ORDER BY created_at",
                    SELECT_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list events: {}", e),
            )
        })?;

        rows.into_iter().map(Event::try_from).collect()
    }
}
