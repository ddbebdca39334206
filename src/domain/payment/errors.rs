//! Payment-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | InvalidAmount | 400 |
//! | AlreadyFinalized | 409 |
//! | DuplicateTransaction | 409 |
//! | ProviderUnavailable | 503 |
//! | InvalidWebhookSignature | 401 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId};

use super::{PaymentProvider, PaymentStatus};

/// Errors from payment operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Referenced payment does not exist.
    NotFound(PaymentId),

    /// Amount must be strictly positive.
    InvalidAmount(i64),

    /// The payment already reached a terminal status; the stored result is
    /// left untouched.
    AlreadyFinalized {
        id: PaymentId,
        status: PaymentStatus,
    },

    /// A payment with this provider transaction id already exists.
    DuplicateTransaction {
        provider: PaymentProvider,
        transaction_id: String,
    },

    /// The provider could not be reached or timed out. The caller may retry
    /// when `retryable` is true; the core never retries on its own.
    ProviderUnavailable {
        provider: PaymentProvider,
        reason: String,
        retryable: bool,
    },

    /// Webhook signature verification failed.
    InvalidWebhookSignature(PaymentProvider),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl PaymentError {
    pub fn not_found(id: PaymentId) -> Self {
        PaymentError::NotFound(id)
    }

    pub fn invalid_amount(amount: i64) -> Self {
        PaymentError::InvalidAmount(amount)
    }

    pub fn already_finalized(id: PaymentId, status: PaymentStatus) -> Self {
        PaymentError::AlreadyFinalized { id, status }
    }

    pub fn duplicate_transaction(
        provider: PaymentProvider,
        transaction_id: impl Into<String>,
    ) -> Self {
        PaymentError::DuplicateTransaction {
            provider,
            transaction_id: transaction_id.into(),
        }
    }

    pub fn provider_unavailable(
        provider: PaymentProvider,
        reason: impl Into<String>,
        retryable: bool,
    ) -> Self {
        PaymentError::ProviderUnavailable {
            provider,
            reason: reason.into(),
            retryable,
        }
    }

    pub fn invalid_webhook_signature(provider: PaymentProvider) -> Self {
        PaymentError::InvalidWebhookSignature(provider)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PaymentError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PaymentError::NotFound(_) => ErrorCode::PaymentNotFound,
            PaymentError::InvalidAmount(_) => ErrorCode::InvalidAmount,
            PaymentError::AlreadyFinalized { .. } => ErrorCode::AlreadyFinalized,
            PaymentError::DuplicateTransaction { .. } => ErrorCode::DuplicateTransaction,
            PaymentError::ProviderUnavailable { .. } => ErrorCode::ProviderUnavailable,
            PaymentError::InvalidWebhookSignature(_) => ErrorCode::InvalidWebhookSignature,
            PaymentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PaymentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            PaymentError::NotFound(id) => format!("Payment not found: {}", id),
            PaymentError::InvalidAmount(amount) => {
                format!("Payment amount must be positive, got {}", amount)
            }
            PaymentError::AlreadyFinalized { id, status } => format!(
                "Payment {} is already finalized as {}",
                id, status
            ),
            PaymentError::DuplicateTransaction {
                provider,
                transaction_id,
            } => format!(
                "A payment for {} transaction '{}' already exists",
                provider, transaction_id
            ),
            PaymentError::ProviderUnavailable {
                provider, reason, ..
            } => format!("Payment provider {} unavailable: {}", provider, reason),
            PaymentError::InvalidWebhookSignature(provider) => {
                format!("Invalid {} webhook signature", provider)
            }
            PaymentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PaymentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentError::ProviderUnavailable { retryable: true, .. }
                | PaymentError::Infrastructure(_)
        )
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PaymentError {}

impl From<DomainError> for PaymentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => PaymentError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => PaymentError::Infrastructure(err.to_string()),
        }
    }
}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        let retryable = err.is_retryable();
        DomainError::new(err.code(), err.message())
            .with_detail("retryable", retryable.to_string())
    }
}
