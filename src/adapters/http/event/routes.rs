//! Axum router configuration for event endpoints.

use axum::routing::get;
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{create_event, delete_event, get_event, list_events, update_event};

/// Create the event API router.
///
/// # Routes
///
/// - `POST /` - Schedule an event (member only)
/// - `GET /` - List events, optionally `?community_id=`
/// - `GET /:id` - Event detail with the caller's access decision
/// - `PUT /:id` - Update an event (creator only)
/// - `DELETE /:id` - Delete an event (creator only)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route(
            "/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
}
