//! Domain events emitted by the payment reconciler.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainEvent, PaymentId, Timestamp, UserId};

use super::{PaymentProvider, PaymentStatus};

/// Events emitted over the payment lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentEvent {
    /// A pending payment was recorded for a provider order/intent.
    Initiated {
        payment_id: PaymentId,
        user_id: UserId,
        provider: PaymentProvider,
        amount: i64,
        currency: String,
        occurred_at: Timestamp,
    },

    /// A provider confirmation finalized the payment.
    Finalized {
        payment_id: PaymentId,
        user_id: UserId,
        status: PaymentStatus,
        occurred_at: Timestamp,
    },
}

impl DomainEvent for PaymentEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PaymentEvent::Initiated { .. } => "payment.initiated.v1",
            PaymentEvent::Finalized { .. } => "payment.finalized.v1",
        }
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            PaymentEvent::Initiated { occurred_at, .. }
            | PaymentEvent::Finalized { occurred_at, .. } => *occurred_at,
        }
    }
}
