//! Axum router configuration for post endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{add_comment, create_post, list_posts, toggle_like};

/// Create the post API router.
///
/// # Routes
///
/// - `POST /` - Publish a post (member only)
/// - `GET /community/:communityId` - Community feed, newest first
/// - `POST /:id/like` - Toggle a like (member only)
/// - `POST /:id/comment` - Append a comment (member only)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_post))
        .route("/community/:community_id", get(list_posts))
        .route("/:id/like", post(toggle_like))
        .route("/:id/comment", post(add_comment))
}
