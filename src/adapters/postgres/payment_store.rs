//! PostgreSQL implementation of PaymentStore.
//!
//! Finalization is a conditional UPDATE guarded on `status = 'pending'`,
//! which is the compare-and-swap the reconciler relies on: of two racing
//! confirmations exactly one row update succeeds.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{CommunityId, EventId, PaymentId, Timestamp, UserId};
use crate::domain::payment::{
    Payment, PaymentError, PaymentOutcome, PaymentProvider, PaymentStatus,
};
use crate::ports::PaymentStore;

/// PostgreSQL implementation of the PaymentStore port.
///
/// (provider, transaction_id) uniqueness is enforced by the
/// `payments_provider_transaction_id_key` constraint.
pub struct PostgresPaymentStore {
    pool: PgPool,
}

impl PostgresPaymentStore {
    /// Creates a new store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a payment.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    user_id: String,
    community_id: Uuid,
    event_id: Option<Uuid>,
    amount: i64,
    currency: String,
    status: String,
    provider: String,
    transaction_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = PaymentError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let status: PaymentStatus = row
            .status
            .parse()
            .map_err(|e| PaymentError::infrastructure(format!("Invalid status: {}", e)))?;
        let provider: PaymentProvider = row
            .provider
            .parse()
            .map_err(|e| PaymentError::infrastructure(format!("Invalid provider: {}", e)))?;

        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            user_id: UserId::new(row.user_id)
                .map_err(|e| PaymentError::infrastructure(format!("Invalid user_id: {}", e)))?,
            community_id: CommunityId::from_uuid(row.community_id),
            event_id: row.event_id.map(EventId::from_uuid),
            amount: row.amount,
            currency: row.currency,
            status,
            provider,
            transaction_id: row.transaction_id,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str = "id, user_id, community_id, event_id, amount, currency, status, provider, transaction_id, created_at, updated_at";

fn db_error(context: &str, e: sqlx::Error) -> PaymentError {
    PaymentError::infrastructure(format!("{}: {}", context, e))
}

#[async_trait]
impl PaymentStore for PostgresPaymentStore {
    async fn insert(&self, payment: &Payment) -> Result<(), PaymentError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, user_id, community_id, event_id, amount, currency, status, provider,
                transaction_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.user_id.as_str())
        .bind(payment.community_id.as_uuid())
        .bind(payment.event_id.as_ref().map(|id| *id.as_uuid()))
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(payment.status.as_str())
        .bind(payment.provider.as_str())
        .bind(&payment.transaction_id)
        .bind(payment.created_at.as_datetime())
        .bind(payment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("payments_provider_transaction_id_key") {
                    return PaymentError::duplicate_transaction(
                        payment.provider,
                        payment.transaction_id.clone(),
                    );
                }
            }
            db_error("Failed to insert payment", e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, PaymentError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load payment", e))?;

        row.map(Payment::try_from).transpose()
    }

    async fn find_by_transaction(
        &self,
        provider: PaymentProvider,
        transaction_id: &str,
    ) -> Result<Option<Payment>, PaymentError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE provider = $1 AND transaction_id = $2",
            SELECT_COLUMNS
        ))
        .bind(provider.as_str())
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load payment", e))?;

        row.map(Payment::try_from).transpose()
    }

    async fn finalize(
        &self,
        id: &PaymentId,
        outcome: PaymentOutcome,
    ) -> Result<Payment, PaymentError> {
        // The status guard makes this a compare-and-swap.
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            r#"
            UPDATE payments SET status = $2, updated_at = now()
            WHERE id = $1 AND status = 'pending'
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(outcome.as_status().as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to finalize payment", e))?;

        if let Some(row) = row {
            return Payment::try_from(row);
        }

        // The guard did not match: absent, or already terminal.
        match self.find_by_id(id).await? {
            Some(payment) => Err(PaymentError::already_finalized(payment.id, payment.status)),
            None => Err(PaymentError::not_found(*id)),
        }
    }

    async fn has_completed_for_event(
        &self,
        user_id: &UserId,
        event_id: &EventId,
    ) -> Result<bool, PaymentError> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT 1::BIGINT FROM payments
            WHERE user_id = $1 AND event_id = $2 AND status = 'completed'
            LIMIT 1
            "#,
        )
        .bind(user_id.as_str())
        .bind(event_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check paid access", e))?;

        Ok(row.is_some())
    }
}
