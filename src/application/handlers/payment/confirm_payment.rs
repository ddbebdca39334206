//! ConfirmPaymentHandler - Command handler for finalizing a payment.

use std::sync::Arc;

use crate::domain::foundation::{DomainEvent, PaymentId, Timestamp};
use crate::domain::payment::{Payment, PaymentError, PaymentEvent, PaymentOutcome};
use crate::ports::{EventPublisher, PaymentStore};

/// Command to apply a provider confirmation to a payment.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentCommand {
    pub payment_id: PaymentId,
    pub outcome: PaymentOutcome,
}

/// Handler for payment confirmation.
///
/// The transition is a compare-and-swap in the store: `pending` moves to the
/// delivered outcome exactly once. Providers deliver confirmations
/// at-least-once, so replays and conflicting deliveries surface as
/// `AlreadyFinalized` and leave the stored result untouched. A successful
/// confirmation does not grant access by itself; it records the paid fact
/// the authorization gate consults for priced events.
pub struct ConfirmPaymentHandler {
    payments: Arc<dyn PaymentStore>,
    publisher: Arc<dyn EventPublisher>,
}

impl ConfirmPaymentHandler {
    pub fn new(payments: Arc<dyn PaymentStore>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            payments,
            publisher,
        }
    }

    pub async fn handle(&self, cmd: ConfirmPaymentCommand) -> Result<Payment, PaymentError> {
        let payment = self.payments.finalize(&cmd.payment_id, cmd.outcome).await?;

        tracing::info!(
            payment_id = %payment.id,
            status = %payment.status,
            "Payment finalized"
        );

        let event = PaymentEvent::Finalized {
            payment_id: payment.id,
            user_id: payment.user_id.clone(),
            status: payment.status,
            occurred_at: Timestamp::now(),
        };
        self.publisher
            .publish(event.to_envelope())
            .await
            .map_err(|e| PaymentError::infrastructure(e.to_string()))?;

        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryEventPublisher, MemoryPaymentStore};
    use crate::domain::foundation::{CommunityId, UserId};
    use crate::domain::payment::{PaymentProvider, PaymentStatus};

    struct Fixture {
        payments: Arc<MemoryPaymentStore>,
        publisher: Arc<InMemoryEventPublisher>,
        handler: ConfirmPaymentHandler,
    }

    fn fixture() -> Fixture {
        let payments = Arc::new(MemoryPaymentStore::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = ConfirmPaymentHandler::new(payments.clone(), publisher.clone());
        Fixture {
            payments,
            publisher,
            handler,
        }
    }

    async fn seed_payment(f: &Fixture) -> Payment {
        let payment = Payment::initiate(
            PaymentId::new(),
            UserId::new("u2").unwrap(),
            CommunityId::new(),
            None,
            500,
            "INR",
            PaymentProvider::Razorpay,
            "order_1",
        )
        .unwrap();
        f.payments.insert(&payment).await.unwrap();
        payment
    }

    #[tokio::test]
    async fn confirm_completes_pending_payment() {
        let f = fixture();
        let payment = seed_payment(&f).await;

        let confirmed = f
            .handler
            .handle(ConfirmPaymentCommand {
                payment_id: payment.id,
                outcome: PaymentOutcome::Completed,
            })
            .await
            .unwrap();

        assert_eq!(confirmed.status, PaymentStatus::Completed);
    }

    #[tokio::test]
    async fn replayed_confirmation_is_rejected_without_effect() {
        let f = fixture();
        let payment = seed_payment(&f).await;

        f.handler
            .handle(ConfirmPaymentCommand {
                payment_id: payment.id,
                outcome: PaymentOutcome::Completed,
            })
            .await
            .unwrap();

        let err = f
            .handler
            .handle(ConfirmPaymentCommand {
                payment_id: payment.id,
                outcome: PaymentOutcome::Failed,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PaymentError::AlreadyFinalized {
                status: PaymentStatus::Completed,
                ..
            }
        ));

        let stored = f.payments.find_by_id(&payment.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Completed);
        // Only the winning confirmation published an event.
        assert_eq!(f.publisher.published_types(), vec!["payment.finalized.v1"]);
    }

    #[tokio::test]
    async fn unknown_payment_is_not_found() {
        let f = fixture();

        let err = f
            .handler
            .handle(ConfirmPaymentCommand {
                payment_id: PaymentId::new(),
                outcome: PaymentOutcome::Completed,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::NotFound(_)));
    }

    #[tokio::test]
    async fn concurrent_confirmations_resolve_to_one_winner() {
        let f = fixture();
        let payment = seed_payment(&f).await;
        let handler = Arc::new(f.handler);

        let complete = {
            let handler = handler.clone();
            let id = payment.id;
            tokio::spawn(async move {
                handler
                    .handle(ConfirmPaymentCommand {
                        payment_id: id,
                        outcome: PaymentOutcome::Completed,
                    })
                    .await
            })
        };
        let fail = {
            let handler = handler.clone();
            let id = payment.id;
            tokio::spawn(async move {
                handler
                    .handle(ConfirmPaymentCommand {
                        payment_id: id,
                        outcome: PaymentOutcome::Failed,
                    })
                    .await
            })
        };

        let results = [complete.await.unwrap(), fail.await.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(PaymentError::AlreadyFinalized { .. })))
                .count(),
            1
        );

        let stored = f.payments.find_by_id(&payment.id).await.unwrap().unwrap();
        assert!(stored.is_finalized());
    }
}
