//! HTTP DTOs for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::payment::{Payment, PaymentOutcome};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to initiate a payment.
#[derive(Debug, Clone, Deserialize)]
pub struct InitiatePaymentRequest {
    pub community_id: String,
    #[serde(default)]
    pub event_id: Option<String>,
    /// Amount in minor currency units.
    pub amount: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// `razorpay` or `stripe`.
    pub provider: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// Request to apply a confirmation outcome directly.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmPaymentRequest {
    pub status: PaymentOutcome,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Payment representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub user_id: String,
    pub community_id: String,
    pub event_id: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub provider: String,
    pub transaction_id: String,
    pub created_at: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            user_id: payment.user_id.to_string(),
            community_id: payment.community_id.to_string(),
            event_id: payment.event_id.map(|id| id.to_string()),
            amount: payment.amount,
            currency: payment.currency,
            status: payment.status.to_string(),
            provider: payment.provider.to_string(),
            transaction_id: payment.transaction_id,
            created_at: payment.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Initiation response: the pending payment plus the client secret for
/// client-confirmed flows.
#[derive(Debug, Clone, Serialize)]
pub struct InitiatePaymentResponse {
    #[serde(flatten)]
    pub payment: PaymentResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}
