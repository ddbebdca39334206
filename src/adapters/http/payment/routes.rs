//! Axum router configuration for payment endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{confirm_payment, get_payment, initiate_payment, provider_webhook};

/// Create the payment API router (authenticated).
///
/// # Routes
///
/// - `POST /` - Create a provider order and record a pending payment
/// - `GET /:id` - Read a payment (payer only)
/// - `POST /:id/status` - Apply a confirmation outcome
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(initiate_payment))
        .route("/:id", get(get_payment))
        .route("/:id/status", post(confirm_payment))
}

/// Create the webhook router.
///
/// Separate from the payment routes because webhooks carry no user
/// authentication; they are verified via the provider signature.
///
/// # Routes
///
/// - `POST /:provider` - Provider confirmation webhook
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/:provider", post(provider_webhook))
}
