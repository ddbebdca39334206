//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must not be negative, got {actual}")]
    Negative { field: String, actual: i64 },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a negative value validation error.
    pub fn negative(field: impl Into<String>, actual: i64) -> Self {
        ValidationError::Negative {
            field: field.into(),
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidAmount,

    // Not found errors
    CommunityNotFound,
    EventNotFound,
    PostNotFound,
    PaymentNotFound,

    // Membership pre-condition errors
    DuplicateName,
    AlreadyMember,
    NoMembership,

    // Authorization errors
    Forbidden,
    InsufficientRole,

    // Payment state errors
    AlreadyFinalized,
    DuplicateTransaction,
    InvalidStateTransition,

    // Provider errors
    ProviderUnavailable,
    InvalidWebhookSignature,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidAmount => "INVALID_AMOUNT",
            ErrorCode::CommunityNotFound => "COMMUNITY_NOT_FOUND",
            ErrorCode::EventNotFound => "EVENT_NOT_FOUND",
            ErrorCode::PostNotFound => "POST_NOT_FOUND",
            ErrorCode::PaymentNotFound => "PAYMENT_NOT_FOUND",
            ErrorCode::DuplicateName => "DUPLICATE_NAME",
            ErrorCode::AlreadyMember => "ALREADY_MEMBER",
            ErrorCode::NoMembership => "NO_MEMBERSHIP",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::InsufficientRole => "INSUFFICIENT_ROLE",
            ErrorCode::AlreadyFinalized => "ALREADY_FINALIZED",
            ErrorCode::DuplicateTransaction => "DUPLICATE_TRANSACTION",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::ProviderUnavailable => "PROVIDER_UNAVAILABLE",
            ErrorCode::InvalidWebhookSignature => "INVALID_WEBHOOK_SIGNATURE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("name");
        assert_eq!(format!("{}", err), "Field 'name' cannot be empty");
    }

    #[test]
    fn validation_error_negative_displays_correctly() {
        let err = ValidationError::negative("price", -5);
        assert_eq!(
            format!("{}", err),
            "Field 'price' must not be negative, got -5"
        );
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("currency", "expected ISO code");
        assert_eq!(
            format!("{}", err),
            "Field 'currency' has invalid format: expected ISO code"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::CommunityNotFound, "Community not found");
        assert_eq!(format!("{}", err), "[COMMUNITY_NOT_FOUND] Community not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "name")
            .with_detail("reason", "empty");

        assert_eq!(err.details.get("field"), Some(&"name".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"empty".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::AlreadyMember), "ALREADY_MEMBER");
        assert_eq!(format!("{}", ErrorCode::AlreadyFinalized), "ALREADY_FINALIZED");
        assert_eq!(
            format!("{}", ErrorCode::ProviderUnavailable),
            "PROVIDER_UNAVAILABLE"
        );
    }

    #[test]
    fn validation_error_converts_to_domain_error() {
        let err: DomainError = ValidationError::empty_field("title").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("title"));
    }
}
