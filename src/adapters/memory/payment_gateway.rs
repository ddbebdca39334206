//! Mock payment gateway for testing and development.
//!
//! Supports pre-configured orders, error injection, call tracking, and
//! confirmation simulation without touching a real provider.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::payment::{PaymentOutcome, PaymentProvider};
use crate::ports::{
    Confirmation, CreateOrderRequest, GatewayError, PaymentGateway, ProviderOrder,
};

/// Mock gateway for one provider.
///
/// # Example
///
/// ```ignore
/// let gateway = MockPaymentGateway::new(PaymentProvider::Razorpay);
/// gateway.fail_next(GatewayError::timeout("deadline exceeded"));
/// let result = gateway.create_order(request).await; // Err(timeout)
/// ```
pub struct MockPaymentGateway {
    provider: PaymentProvider,
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Sequence number for generated order ids.
    next_order: u64,

    /// Error to return on the next `create_order` call.
    next_error: Option<GatewayError>,

    /// Artificial delay before `create_order` returns.
    order_delay: Option<std::time::Duration>,

    /// Whether confirmations verify successfully.
    reject_confirmations: bool,

    /// Requests seen by `create_order`.
    orders_created: Vec<CreateOrderRequest>,
}

impl MockPaymentGateway {
    pub fn new(provider: PaymentProvider) -> Self {
        Self {
            provider,
            inner: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Makes the next `create_order` call fail with the given error.
    pub fn fail_next(&self, error: GatewayError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Delays `create_order` responses, for timeout tests.
    pub fn delay_orders(&self, delay: std::time::Duration) {
        self.inner.lock().unwrap().order_delay = Some(delay);
    }

    /// Makes all confirmation verifications fail.
    pub fn reject_confirmations(&self) {
        self.inner.lock().unwrap().reject_confirmations = true;
    }

    /// Requests seen so far.
    pub fn orders_created(&self) -> Vec<CreateOrderRequest> {
        self.inner.lock().unwrap().orders_created.clone()
    }

    /// Builds a confirmation payload this mock's `verify_confirmation`
    /// accepts with any signature.
    pub fn confirmation_payload(transaction_id: &str, outcome: PaymentOutcome) -> Vec<u8> {
        serde_json::to_vec(&Confirmation {
            transaction_id: transaction_id.to_string(),
            outcome,
        })
        .expect("confirmation serializes")
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    fn provider(&self) -> PaymentProvider {
        self.provider
    }

    fn signature_header(&self) -> &'static str {
        "X-Mock-Signature"
    }

    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<ProviderOrder, GatewayError> {
        let (error, delay, order_number) = {
            let mut state = self.inner.lock().unwrap();
            state.orders_created.push(request);
            state.next_order += 1;
            (state.next_error.take(), state.order_delay, state.next_order)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = error {
            return Err(error);
        }

        Ok(ProviderOrder {
            external_id: format!("{}_order_{}", self.provider, order_number),
            client_secret: match self.provider {
                PaymentProvider::Stripe => Some(format!("secret_{}", order_number)),
                PaymentProvider::Razorpay => None,
            },
        })
    }

    fn verify_confirmation(
        &self,
        payload: &[u8],
        _signature: &str,
    ) -> Result<Confirmation, GatewayError> {
        if self.inner.lock().unwrap().reject_confirmations {
            return Err(GatewayError::invalid_signature("signature rejected by mock"));
        }
        serde_json::from_slice(payload)
            .map_err(|e| GatewayError::malformed(format!("unparseable confirmation: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CommunityId, UserId};
    use crate::ports::OrderMetadata;

    fn request() -> CreateOrderRequest {
        CreateOrderRequest {
            amount: 500,
            currency: "INR".to_string(),
            metadata: OrderMetadata {
                user_id: UserId::new("u2").unwrap(),
                community_id: CommunityId::new(),
                event_id: None,
            },
        }
    }

    #[tokio::test]
    async fn create_order_returns_sequential_ids() {
        let gateway = MockPaymentGateway::new(PaymentProvider::Razorpay);

        let first = gateway.create_order(request()).await.unwrap();
        let second = gateway.create_order(request()).await.unwrap();

        assert_eq!(first.external_id, "razorpay_order_1");
        assert_eq!(second.external_id, "razorpay_order_2");
        assert!(first.client_secret.is_none());
        assert_eq!(gateway.orders_created().len(), 2);
    }

    #[tokio::test]
    async fn stripe_mock_issues_client_secrets() {
        let gateway = MockPaymentGateway::new(PaymentProvider::Stripe);

        let order = gateway.create_order(request()).await.unwrap();
        assert!(order.client_secret.is_some());
    }

    #[tokio::test]
    async fn injected_error_fails_next_order_only() {
        let gateway = MockPaymentGateway::new(PaymentProvider::Razorpay);
        gateway.fail_next(GatewayError::network("connection refused"));

        assert!(gateway.create_order(request()).await.is_err());
        assert!(gateway.create_order(request()).await.is_ok());
    }

    #[tokio::test]
    async fn confirmation_payload_roundtrips() {
        let gateway = MockPaymentGateway::new(PaymentProvider::Razorpay);
        let payload =
            MockPaymentGateway::confirmation_payload("order_1", PaymentOutcome::Completed);

        let confirmation = gateway.verify_confirmation(&payload, "sig").unwrap();
        assert_eq!(confirmation.transaction_id, "order_1");
        assert_eq!(confirmation.outcome, PaymentOutcome::Completed);
    }

    #[tokio::test]
    async fn rejecting_mock_fails_verification() {
        let gateway = MockPaymentGateway::new(PaymentProvider::Razorpay);
        gateway.reject_confirmations();
        let payload =
            MockPaymentGateway::confirmation_payload("order_1", PaymentOutcome::Completed);

        assert!(gateway.verify_confirmation(&payload, "sig").is_err());
    }
}
