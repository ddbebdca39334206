//! API error type mapping domain errors to HTTP responses.
//!
//! Every error kind maps to one stable status code; the response body
//! carries the machine-readable code and a human-readable reason.
//! `PROVIDER_UNAVAILABLE` additionally signals retry safety.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::community::CommunityError;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::payment::PaymentError;

/// JSON error body returned on every failure.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Stable error code, e.g. `ALREADY_MEMBER`.
    pub error: String,

    /// Human-readable reason.
    pub message: String,

    /// Whether the caller may retry, for provider failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            retryable: None,
        }
    }
}

/// API error wrapping a domain error.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl ApiError {
    /// Builds a 400 validation error directly.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self(DomainError::validation(field, message))
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<CommunityError> for ApiError {
    fn from(err: CommunityError) -> Self {
        Self(err.into())
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self(err.into())
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::CommunityNotFound
        | ErrorCode::EventNotFound
        | ErrorCode::PostNotFound
        | ErrorCode::PaymentNotFound
        | ErrorCode::NoMembership => StatusCode::NOT_FOUND,

        ErrorCode::DuplicateName
        | ErrorCode::AlreadyMember
        | ErrorCode::AlreadyFinalized
        | ErrorCode::DuplicateTransaction
        | ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,

        ErrorCode::Forbidden | ErrorCode::InsufficientRole => StatusCode::FORBIDDEN,

        ErrorCode::ValidationFailed | ErrorCode::InvalidAmount => StatusCode::BAD_REQUEST,

        ErrorCode::InvalidWebhookSignature => StatusCode::UNAUTHORIZED,

        ErrorCode::ProviderUnavailable => StatusCode::SERVICE_UNAVAILABLE,

        ErrorCode::DatabaseError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);

        if status.is_server_error() {
            tracing::error!(code = %self.0.code, message = %self.0.message, "Request failed");
        }

        let retryable = self
            .0
            .details
            .get("retryable")
            .map(|v| v == "true")
            .filter(|_| self.0.code == ErrorCode::ProviderUnavailable);

        let body = ErrorResponse {
            error: self.0.code.to_string(),
            message: self.0.message,
            retryable,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_is_stable() {
        assert_eq!(status_for(ErrorCode::CommunityNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::NoMembership), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::DuplicateName), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::AlreadyMember), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::AlreadyFinalized), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorCode::InsufficientRole), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorCode::InvalidAmount), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(ErrorCode::InvalidWebhookSignature),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(ErrorCode::ProviderUnavailable),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn retryable_only_surfaces_for_provider_unavailable() {
        use crate::domain::payment::PaymentProvider;

        let err: ApiError = PaymentError::provider_unavailable(
            PaymentProvider::Stripe,
            "timeout",
            true,
        )
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
