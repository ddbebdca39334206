//! In-memory PaymentStore adapter.
//!
//! `finalize` performs the status check and the write while holding the
//! write lock, which is what makes it a compare-and-swap: of two racing
//! confirmations exactly one observes `Pending`.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{EventId, PaymentId, UserId};
use crate::domain::payment::{Payment, PaymentError, PaymentOutcome, PaymentProvider};
use crate::ports::PaymentStore;

/// In-memory storage for payments.
#[derive(Debug, Clone, Default)]
pub struct MemoryPaymentStore {
    payments: Arc<RwLock<Vec<Payment>>>,
}

impl MemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored payments (useful for tests).
    pub async fn count(&self) -> usize {
        self.payments.read().await.len()
    }
}

#[async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn insert(&self, payment: &Payment) -> Result<(), PaymentError> {
        let mut payments = self.payments.write().await;
        if payments
            .iter()
            .any(|p| p.provider == payment.provider && p.transaction_id == payment.transaction_id)
        {
            return Err(PaymentError::duplicate_transaction(
                payment.provider,
                payment.transaction_id.clone(),
            ));
        }
        payments.push(payment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, PaymentError> {
        let payments = self.payments.read().await;
        Ok(payments.iter().find(|p| &p.id == id).cloned())
    }

    async fn find_by_transaction(
        &self,
        provider: PaymentProvider,
        transaction_id: &str,
    ) -> Result<Option<Payment>, PaymentError> {
        let payments = self.payments.read().await;
        Ok(payments
            .iter()
            .find(|p| p.provider == provider && p.transaction_id == transaction_id)
            .cloned())
    }

    async fn finalize(
        &self,
        id: &PaymentId,
        outcome: PaymentOutcome,
    ) -> Result<Payment, PaymentError> {
        let mut payments = self.payments.write().await;
        let payment = payments
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| PaymentError::not_found(*id))?;
        payment.finalize(outcome)?;
        Ok(payment.clone())
    }

    async fn has_completed_for_event(
        &self,
        user_id: &UserId,
        event_id: &EventId,
    ) -> Result<bool, PaymentError> {
        let payments = self.payments.read().await;
        Ok(payments.iter().any(|p| {
            &p.user_id == user_id
                && p.event_id.as_ref() == Some(event_id)
                && p.status.has_succeeded()
        }))
    }
}
