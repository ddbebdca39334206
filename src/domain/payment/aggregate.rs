//! Payment aggregate entity.
//!
//! A Payment ties an external provider order/intent to a user and an
//! (optionally priced) event. It is created `Pending` at initiation and
//! finalized exactly once by a provider confirmation; replays of that
//! confirmation are rejected, never re-applied.
//!
//! # Design Decisions
//!
//! - **Money in minor units**: amounts are `i64`, never floats
//! - **Keyed by provider transaction id**: unique per provider, so webhook
//!   deliveries can be resolved without provider-specific lookups
//! - **Terminal sinks**: `completed`/`failed` admit no further transition

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CommunityId, EventId, PaymentId, StateMachine, Timestamp, UserId,
};

use super::{PaymentError, PaymentOutcome, PaymentProvider, PaymentStatus};

/// Payment aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for this payment.
    pub id: PaymentId,

    /// The paying user.
    pub user_id: UserId,

    /// The community the payment relates to.
    pub community_id: CommunityId,

    /// The priced event being paid for, if any.
    pub event_id: Option<EventId>,

    /// Amount in minor currency units; strictly positive.
    pub amount: i64,

    /// ISO currency code.
    pub currency: String,

    /// Lifecycle status.
    pub status: PaymentStatus,

    /// Provider that issued the order/intent.
    pub provider: PaymentProvider,

    /// Provider-assigned order/intent id; unique per provider.
    pub transaction_id: String,

    /// When the payment was created.
    pub created_at: Timestamp,

    /// When the payment was last updated.
    pub updated_at: Timestamp,
}

impl Payment {
    /// Creates a pending payment for a provider-issued order/intent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if `amount <= 0`, and a validation error if
    /// currency or transaction id is empty.
    #[allow(clippy::too_many_arguments)]
    pub fn initiate(
        id: PaymentId,
        user_id: UserId,
        community_id: CommunityId,
        event_id: Option<EventId>,
        amount: i64,
        currency: impl Into<String>,
        provider: PaymentProvider,
        transaction_id: impl Into<String>,
    ) -> Result<Self, PaymentError> {
        if amount <= 0 {
            return Err(PaymentError::invalid_amount(amount));
        }
        let currency = currency.into();
        if currency.trim().is_empty() {
            return Err(PaymentError::validation("currency", "cannot be empty"));
        }
        let transaction_id = transaction_id.into();
        if transaction_id.trim().is_empty() {
            return Err(PaymentError::validation(
                "transaction_id",
                "cannot be empty",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            community_id,
            event_id,
            amount,
            currency,
            status: PaymentStatus::Pending,
            provider,
            transaction_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns true if the payment has reached a terminal status.
    pub fn is_finalized(&self) -> bool {
        self.status.is_terminal()
    }

    /// Applies a provider confirmation, transitioning `pending` to the
    /// delivered outcome.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyFinalized` if the payment is already terminal; the
    /// stored status is left untouched so a replayed or conflicting
    /// confirmation can never flip the recorded result.
    pub fn finalize(&mut self, outcome: PaymentOutcome) -> Result<(), PaymentError> {
        if self.is_finalized() {
            return Err(PaymentError::already_finalized(self.id, self.status));
        }
        self.status = self
            .status
            .transition_to(outcome.as_status())
            .map_err(|_| PaymentError::already_finalized(self.id, self.status))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_payment(amount: i64) -> Result<Payment, PaymentError> {
        Payment::initiate(
            PaymentId::new(),
            UserId::new("u2").unwrap(),
            CommunityId::new(),
            Some(EventId::new()),
            amount,
            "INR",
            PaymentProvider::Razorpay,
            "order_abc123",
        )
    }

    // Construction tests

    #[test]
    fn initiate_starts_pending() {
        let payment = test_payment(500).unwrap();

        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(!payment.is_finalized());
        assert_eq!(payment.transaction_id, "order_abc123");
    }

    #[test]
    fn initiate_rejects_zero_amount() {
        let err = test_payment(0).unwrap_err();
        assert_eq!(err, PaymentError::InvalidAmount(0));
    }

    #[test]
    fn initiate_rejects_negative_amount() {
        let err = test_payment(-250).unwrap_err();
        assert_eq!(err, PaymentError::InvalidAmount(-250));
    }

    #[test]
    fn initiate_rejects_empty_transaction_id() {
        let result = Payment::initiate(
            PaymentId::new(),
            UserId::new("u2").unwrap(),
            CommunityId::new(),
            None,
            500,
            "INR",
            PaymentProvider::Stripe,
            "",
        );
        assert!(matches!(
            result,
            Err(PaymentError::ValidationFailed { .. })
        ));
    }

    // Finalization tests

    #[test]
    fn finalize_completes_pending_payment() {
        let mut payment = test_payment(500).unwrap();

        payment.finalize(PaymentOutcome::Completed).unwrap();

        assert_eq!(payment.status, PaymentStatus::Completed);
        assert!(payment.is_finalized());
    }

    #[test]
    fn finalize_fails_pending_payment() {
        let mut payment = test_payment(500).unwrap();

        payment.finalize(PaymentOutcome::Failed).unwrap();

        assert_eq!(payment.status, PaymentStatus::Failed);
    }

    #[test]
    fn replayed_confirmation_is_rejected_and_status_unchanged() {
        let mut payment = test_payment(500).unwrap();
        payment.finalize(PaymentOutcome::Completed).unwrap();

        let err = payment.finalize(PaymentOutcome::Completed).unwrap_err();

        assert!(matches!(
            err,
            PaymentError::AlreadyFinalized {
                status: PaymentStatus::Completed,
                ..
            }
        ));
        assert_eq!(payment.status, PaymentStatus::Completed);
    }

    #[test]
    fn conflicting_confirmation_cannot_flip_result() {
        let mut payment = test_payment(500).unwrap();
        payment.finalize(PaymentOutcome::Completed).unwrap();

        let err = payment.finalize(PaymentOutcome::Failed).unwrap_err();

        assert!(matches!(err, PaymentError::AlreadyFinalized { .. }));
        assert_eq!(payment.status, PaymentStatus::Completed);
    }

    #[test]
    fn failed_payment_cannot_be_completed_later() {
        let mut payment = test_payment(500).unwrap();
        payment.finalize(PaymentOutcome::Failed).unwrap();

        assert!(payment.finalize(PaymentOutcome::Completed).is_err());
        assert_eq!(payment.status, PaymentStatus::Failed);
    }
}
