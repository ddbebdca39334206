//! Payment gateway port for external payment processing.
//!
//! One capability interface covers both providers: create an order/intent,
//! and verify + translate an asynchronous confirmation delivery. Provider
//! quirks (wire formats, signature schemes) stay inside the adapters.
//!
//! # Design
//!
//! - **Gateway agnostic**: the core never branches on provider identity
//!   beyond selecting a registered gateway
//! - **At-least-once safe**: confirmations resolve to (transaction_id,
//!   outcome) and are absorbed by the store's idempotent-reject finalize
//! - **Caller-bounded**: order creation is wrapped in a timeout by the
//!   caller; gateways never retry internally

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommunityId, EventId, UserId};
use crate::domain::payment::{PaymentError, PaymentOutcome, PaymentProvider};

/// Port for a single payment provider integration.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// The provider this gateway speaks for.
    fn provider(&self) -> PaymentProvider;

    /// The HTTP header carrying the confirmation signature.
    fn signature_header(&self) -> &'static str;

    /// Create an order/intent with the provider.
    ///
    /// Returns the provider-assigned external id (which keys the payment
    /// record) and, for client-confirmed flows, a client secret.
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<ProviderOrder, GatewayError>;

    /// Verify a confirmation delivery and translate it.
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` if the signature doesn't match the payload
    /// - `Malformed` if the payload can't be translated
    fn verify_confirmation(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<Confirmation, GatewayError>;
}

/// Request to create a provider order/intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Amount in minor currency units.
    pub amount: i64,

    /// ISO currency code.
    pub currency: String,

    /// Metadata attached to the provider object for traceability.
    pub metadata: OrderMetadata,
}

/// Metadata attached to provider orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderMetadata {
    pub user_id: UserId,
    pub community_id: CommunityId,
    pub event_id: Option<EventId>,
}

/// A provider-issued order/intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderOrder {
    /// Provider-assigned id; becomes the payment's transaction id.
    pub external_id: String,

    /// Secret the client uses to complete the payment, when the provider's
    /// flow needs one.
    pub client_secret: Option<String>,
}

/// A verified, translated provider confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confirmation {
    /// The provider transaction id the confirmation refers to.
    pub transaction_id: String,

    /// The delivered outcome.
    pub outcome: PaymentOutcome,
}

/// Errors from gateway operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    /// Error category.
    pub kind: GatewayErrorKind,

    /// Human-readable message.
    pub message: String,

    /// Whether the operation can be retried by the caller.
    pub retryable: bool,
}

/// Gateway error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Network connectivity issue.
    Network,

    /// The provider call timed out.
    Timeout,

    /// API authentication failed.
    Authentication,

    /// Confirmation signature did not match.
    InvalidSignature,

    /// Payload could not be translated.
    Malformed,

    /// Provider reported an error.
    Provider,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        let retryable = matches!(
            kind,
            GatewayErrorKind::Network | GatewayErrorKind::Timeout
        );
        Self {
            kind,
            message: message.into(),
            retryable,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Timeout, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Authentication, message)
    }

    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::InvalidSignature, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Malformed, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Provider, message)
    }

    /// Converts into the domain payment error for a given provider.
    pub fn into_payment_error(self, provider: PaymentProvider) -> PaymentError {
        match self.kind {
            GatewayErrorKind::InvalidSignature => {
                PaymentError::invalid_webhook_signature(provider)
            }
            GatewayErrorKind::Malformed => {
                PaymentError::validation("payload", self.message)
            }
            _ => PaymentError::provider_unavailable(provider, self.message, self.retryable),
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for GatewayError {}

/// Registry mapping providers to their gateway adapters.
#[derive(Clone, Default)]
pub struct GatewayRegistry {
    gateways: HashMap<PaymentProvider, Arc<dyn PaymentGateway>>,
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a gateway under its own provider identity.
    pub fn register(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.gateways.insert(gateway.provider(), gateway);
        self
    }

    /// Looks up the gateway for a provider.
    pub fn get(&self, provider: PaymentProvider) -> Option<Arc<dyn PaymentGateway>> {
        self.gateways.get(&provider).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }

    #[test]
    fn network_and_timeout_errors_are_retryable() {
        assert!(GatewayError::network("connection refused").retryable);
        assert!(GatewayError::timeout("deadline exceeded").retryable);

        assert!(!GatewayError::authentication("bad key").retryable);
        assert!(!GatewayError::invalid_signature("mismatch").retryable);
    }

    #[test]
    fn invalid_signature_maps_to_webhook_error() {
        let err = GatewayError::invalid_signature("mismatch")
            .into_payment_error(PaymentProvider::Stripe);
        assert!(matches!(
            err,
            PaymentError::InvalidWebhookSignature(PaymentProvider::Stripe)
        ));
    }

    #[test]
    fn timeout_maps_to_retryable_provider_unavailable() {
        let err = GatewayError::timeout("deadline exceeded")
            .into_payment_error(PaymentProvider::Razorpay);
        assert!(matches!(
            err,
            PaymentError::ProviderUnavailable {
                retryable: true,
                ..
            }
        ));
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let registry = GatewayRegistry::new();
        assert!(registry.get(PaymentProvider::Stripe).is_none());
    }
}
