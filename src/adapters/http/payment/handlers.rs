//! HTTP handlers for payment endpoints.

use axum::body::Bytes;
use axum::extract::{Json, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::AuthenticatedUser;
use crate::adapters::http::AppState;
use crate::application::handlers::payment::{ConfirmPaymentCommand, InitiatePaymentCommand};
use crate::domain::foundation::{CommunityId, EventId, PaymentId};
use crate::domain::payment::{PaymentError, PaymentProvider};

use super::dto::{
    ConfirmPaymentRequest, InitiatePaymentRequest, InitiatePaymentResponse, PaymentResponse,
};

fn parse_payment_id(id: &str) -> Result<PaymentId, ApiError> {
    id.parse()
        .map_err(|_| ApiError::validation("id", format!("'{}' is not a valid payment id", id)))
}

fn parse_provider(provider: &str) -> Result<PaymentProvider, ApiError> {
    provider.parse().map_err(|_| {
        ApiError::validation(
            "provider",
            format!("'{}' is not a supported payment provider", provider),
        )
    })
}

/// POST /api/payments - Create a provider order and record a pending payment
pub async fn initiate_payment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<InitiatePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let community_id: CommunityId = request.community_id.parse().map_err(|_| {
        ApiError::validation(
            "community_id",
            format!("'{}' is not a valid community id", request.community_id),
        )
    })?;
    let event_id: Option<EventId> = request
        .event_id
        .as_deref()
        .map(|id| {
            id.parse().map_err(|_| {
                ApiError::validation("event_id", format!("'{}' is not a valid event id", id))
            })
        })
        .transpose()?;
    let provider = parse_provider(&request.provider)?;

    let handler = state.initiate_payment_handler();
    let result = handler
        .handle(InitiatePaymentCommand {
            user_id: user.user_id,
            community_id,
            event_id,
            amount: request.amount,
            currency: request.currency,
            provider,
            timeout: state.provider_timeout,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(InitiatePaymentResponse {
            payment: result.payment.into(),
            client_secret: result.client_secret,
        }),
    ))
}

/// GET /api/payments/:id - Read a payment
pub async fn get_payment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id = parse_payment_id(&id)?;

    let payment = state
        .payments
        .find_by_id(&payment_id)
        .await?
        .ok_or(PaymentError::NotFound(payment_id))?;

    // Payments are visible to their payer only.
    if payment.user_id != user.user_id {
        return Err(ApiError::from(crate::domain::foundation::DomainError::new(
            crate::domain::foundation::ErrorCode::Forbidden,
            "Payment belongs to another user",
        )));
    }

    Ok(Json(PaymentResponse::from(payment)))
}

/// POST /api/payments/:id/status - Apply a confirmation outcome
///
/// Mirrors the provider confirmation for flows where the client relays the
/// result. The same idempotent-reject semantics apply: a finalized payment
/// rejects any further update.
pub async fn confirm_payment(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<ConfirmPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id = parse_payment_id(&id)?;
    let handler = state.confirm_payment_handler();
    let payment = handler
        .handle(ConfirmPaymentCommand {
            payment_id,
            outcome: request.status,
        })
        .await?;

    Ok(Json(PaymentResponse::from(payment)))
}

/// POST /api/webhooks/:provider - Provider confirmation webhook
///
/// Unauthenticated; trust comes from the provider signature. Deliveries are
/// at-least-once, replays resolve to `ALREADY_FINALIZED`.
pub async fn provider_webhook(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let provider = parse_provider(&provider)?;
    let gateway = state.gateways.get(provider).ok_or_else(|| {
        ApiError::from(PaymentError::infrastructure(format!(
            "No gateway configured for provider {}",
            provider
        )))
    })?;

    let signature = headers
        .get(gateway.signature_header())
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            ApiError::from(PaymentError::invalid_webhook_signature(provider))
        })?;

    let confirmation = gateway
        .verify_confirmation(&body, signature)
        .map_err(|e| ApiError::from(e.into_payment_error(provider)))?;

    let payment = state
        .payments
        .find_by_transaction(provider, &confirmation.transaction_id)
        .await?
        .ok_or_else(|| {
            ApiError::from(crate::domain::foundation::DomainError::new(
                crate::domain::foundation::ErrorCode::PaymentNotFound,
                format!(
                    "No payment recorded for {} transaction '{}'",
                    provider, confirmation.transaction_id
                ),
            ))
        })?;

    let handler = state.confirm_payment_handler();
    handler
        .handle(ConfirmPaymentCommand {
            payment_id: payment.id,
            outcome: confirmation.outcome,
        })
        .await?;

    Ok(StatusCode::OK)
}
