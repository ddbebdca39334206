//! Axum router configuration for community endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{
    create_community, get_community, join_community, leave_community, list_communities,
    reconcile_members,
};

/// Create the community API router.
///
/// # Routes
///
/// - `POST /` - Create a community
/// - `GET /` - List communities
/// - `GET /:id` - Community detail with resolved identities
/// - `POST /:id/join` - Join a community
/// - `POST /:id/leave` - Leave a community
/// - `POST /:id/reconcile` - Repair the member list from the ledger
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_community).get(list_communities))
        .route("/:id", get(get_community))
        .route("/:id/join", post(join_community))
        .route("/:id/leave", post(leave_community))
        .route("/:id/reconcile", post(reconcile_members))
}
