//! InitiatePaymentHandler - Command handler for creating a provider order
//! and recording the pending payment.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{CommunityId, DomainEvent, EventId, PaymentId, Timestamp, UserId};
use crate::domain::payment::{Payment, PaymentError, PaymentEvent, PaymentProvider};
use crate::ports::{
    CreateOrderRequest, EventPublisher, GatewayRegistry, OrderMetadata, PaymentStore,
};

/// Command to initiate a payment.
#[derive(Debug, Clone)]
pub struct InitiatePaymentCommand {
    pub user_id: UserId,
    pub community_id: CommunityId,
    pub event_id: Option<EventId>,
    /// Amount in minor currency units; must be strictly positive.
    pub amount: i64,
    pub currency: String,
    pub provider: PaymentProvider,
    /// Upper bound on the provider call. On expiry the operation fails with
    /// a retryable `ProviderUnavailable` and nothing is recorded.
    pub timeout: Duration,
}

/// Result of a successful initiation.
#[derive(Debug, Clone)]
pub struct InitiatePaymentResult {
    pub payment: Payment,
    /// Secret for client-confirmed flows, when the provider issues one.
    pub client_secret: Option<String>,
}

/// Handler for payment initiation.
///
/// Creates the provider order/intent first, then records the payment as
/// `pending` under the provider-returned transaction id. A timeout or
/// provider failure leaves no record behind, so `initiate` is safe to
/// retry. The gateway call is never retried internally.
pub struct InitiatePaymentHandler {
    payments: Arc<dyn PaymentStore>,
    gateways: GatewayRegistry,
    publisher: Arc<dyn EventPublisher>,
}

impl InitiatePaymentHandler {
    pub fn new(
        payments: Arc<dyn PaymentStore>,
        gateways: GatewayRegistry,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            payments,
            gateways,
            publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: InitiatePaymentCommand,
    ) -> Result<InitiatePaymentResult, PaymentError> {
        // 1. Validate before touching the provider.
        if cmd.amount <= 0 {
            return Err(PaymentError::invalid_amount(cmd.amount));
        }

        let gateway = self.gateways.get(cmd.provider).ok_or_else(|| {
            PaymentError::infrastructure(format!(
                "No gateway configured for provider {}",
                cmd.provider
            ))
        })?;

        // 2. Create the provider order, bounded by the caller's timeout.
        let request = CreateOrderRequest {
            amount: cmd.amount,
            currency: cmd.currency.clone(),
            metadata: OrderMetadata {
                user_id: cmd.user_id.clone(),
                community_id: cmd.community_id,
                event_id: cmd.event_id,
            },
        };

        let order = match tokio::time::timeout(cmd.timeout, gateway.create_order(request)).await
        {
            Ok(Ok(order)) => order,
            Ok(Err(gateway_error)) => {
                return Err(gateway_error.into_payment_error(cmd.provider));
            }
            Err(_elapsed) => {
                tracing::warn!(
                    provider = %cmd.provider,
                    timeout_ms = cmd.timeout.as_millis() as u64,
                    "Provider order creation timed out"
                );
                return Err(PaymentError::provider_unavailable(
                    cmd.provider,
                    format!("order creation timed out after {:?}", cmd.timeout),
                    true,
                ));
            }
        };

        // 3. Record the pending payment keyed by the provider transaction id.
        let payment = Payment::initiate(
            PaymentId::new(),
            cmd.user_id,
            cmd.community_id,
            cmd.event_id,
            cmd.amount,
            cmd.currency,
            cmd.provider,
            order.external_id,
        )?;
        self.payments.insert(&payment).await?;

        tracing::info!(
            payment_id = %payment.id,
            provider = %payment.provider,
            transaction_id = %payment.transaction_id,
            amount = payment.amount,
            "Payment initiated"
        );

        // 4. Publish event.
        let event = PaymentEvent::Initiated {
            payment_id: payment.id,
            user_id: payment.user_id.clone(),
            provider: payment.provider,
            amount: payment.amount,
            currency: payment.currency.clone(),
            occurred_at: Timestamp::now(),
        };
        self.publisher
            .publish(event.to_envelope())
            .await
            .map_err(|e| PaymentError::infrastructure(e.to_string()))?;

        Ok(InitiatePaymentResult {
            payment,
            client_secret: order.client_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryEventPublisher, MemoryPaymentStore, MockPaymentGateway,
    };
    use crate::domain::payment::PaymentStatus;
    use crate::ports::GatewayError;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn command(amount: i64, provider: PaymentProvider) -> InitiatePaymentCommand {
        InitiatePaymentCommand {
            user_id: user("u2"),
            community_id: CommunityId::new(),
            event_id: Some(EventId::new()),
            amount,
            currency: "INR".to_string(),
            provider,
            timeout: Duration::from_millis(200),
        }
    }

    struct Fixture {
        payments: Arc<MemoryPaymentStore>,
        razorpay: Arc<MockPaymentGateway>,
        publisher: Arc<InMemoryEventPublisher>,
        handler: InitiatePaymentHandler,
    }

    fn fixture() -> Fixture {
        let payments = Arc::new(MemoryPaymentStore::new());
        let razorpay = Arc::new(MockPaymentGateway::new(PaymentProvider::Razorpay));
        let stripe = Arc::new(MockPaymentGateway::new(PaymentProvider::Stripe));
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let gateways = GatewayRegistry::new()
            .register(razorpay.clone())
            .register(stripe);
        let handler =
            InitiatePaymentHandler::new(payments.clone(), gateways, publisher.clone());
        Fixture {
            payments,
            razorpay,
            publisher,
            handler,
        }
    }

    #[tokio::test]
    async fn records_pending_payment_keyed_by_provider_order() {
        let f = fixture();

        let result = f
            .handler
            .handle(command(500, PaymentProvider::Razorpay))
            .await
            .unwrap();

        assert_eq!(result.payment.status, PaymentStatus::Pending);
        assert_eq!(result.payment.transaction_id, "razorpay_order_1");
        assert!(result.client_secret.is_none());

        let stored = f
            .payments
            .find_by_id(&result.payment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn stripe_flow_returns_client_secret() {
        let f = fixture();

        let result = f
            .handler
            .handle(command(500, PaymentProvider::Stripe))
            .await
            .unwrap();

        assert!(result.client_secret.is_some());
    }

    #[tokio::test]
    async fn zero_amount_is_rejected_before_the_provider_call() {
        let f = fixture();

        let err = f
            .handler
            .handle(command(0, PaymentProvider::Razorpay))
            .await
            .unwrap_err();

        assert_eq!(err, PaymentError::InvalidAmount(0));
        assert!(f.razorpay.orders_created().is_empty());
        assert_eq!(f.payments.count().await, 0);
    }

    #[tokio::test]
    async fn provider_timeout_is_retryable_and_records_nothing() {
        let f = fixture();
        f.razorpay.delay_orders(Duration::from_secs(5));

        let err = f
            .handler
            .handle(command(500, PaymentProvider::Razorpay))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PaymentError::ProviderUnavailable {
                retryable: true,
                ..
            }
        ));
        assert_eq!(f.payments.count().await, 0);
        assert!(f.publisher.published().is_empty());
    }

    #[tokio::test]
    async fn provider_error_is_surfaced_and_records_nothing() {
        let f = fixture();
        f.razorpay
            .fail_next(GatewayError::authentication("invalid key"));

        let err = f
            .handler
            .handle(command(500, PaymentProvider::Razorpay))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PaymentError::ProviderUnavailable {
                retryable: false,
                ..
            }
        ));
        assert_eq!(f.payments.count().await, 0);
    }

    #[tokio::test]
    async fn publishes_initiated_event() {
        let f = fixture();

        f.handler
            .handle(command(500, PaymentProvider::Razorpay))
            .await
            .unwrap();

        assert_eq!(f.publisher.published_types(), vec!["payment.initiated.v1"]);
    }
}
