//! Payment store port.
//!
//! # Design
//!
//! - **Compare-and-swap finalization**: `finalize` checks the current status
//!   and writes the terminal one in a single atomic step, so two concurrent
//!   confirmations for the same payment cannot both apply
//! - **Keyed by provider transaction id**: (provider, transaction_id) is
//!   unique, which is what makes at-least-once webhook delivery safe to
//!   resolve

use async_trait::async_trait;

use crate::domain::foundation::{EventId, PaymentId, UserId};
use crate::domain::payment::{Payment, PaymentError, PaymentOutcome, PaymentProvider};

/// Store port for Payment aggregates.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Insert a new pending payment.
    ///
    /// # Errors
    ///
    /// - `DuplicateTransaction` if (provider, transaction_id) exists
    async fn insert(&self, payment: &Payment) -> Result<(), PaymentError>;

    /// Find a payment by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, PaymentError>;

    /// Find a payment by its provider transaction id.
    async fn find_by_transaction(
        &self,
        provider: PaymentProvider,
        transaction_id: &str,
    ) -> Result<Option<Payment>, PaymentError>;

    /// Atomically transition a pending payment to the given outcome.
    ///
    /// The status check and the write happen in one atomic step; under two
    /// racing confirmations exactly one wins.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the payment doesn't exist
    /// - `AlreadyFinalized` if the payment is already terminal; the stored
    ///   status is left unchanged
    async fn finalize(
        &self,
        id: &PaymentId,
        outcome: PaymentOutcome,
    ) -> Result<Payment, PaymentError>;

    /// Whether a completed payment exists for (user, event).
    ///
    /// This is the "paid" fact the authorization gate consults for priced
    /// events.
    async fn has_completed_for_event(
        &self,
        user_id: &UserId,
        event_id: &EventId,
    ) -> Result<bool, PaymentError>;
}
