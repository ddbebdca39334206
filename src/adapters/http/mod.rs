//! HTTP transport layer.
//!
//! Maps each core operation to a request/response pair. Successful calls
//! return the resulting entity or a status message; failures return the
//! error kind mapped to a stable status code (see `error`).

pub mod community;
pub mod error;
pub mod event;
pub mod middleware;
pub mod payment;
pub mod post;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use crate::application::authorization::AuthorizationGate;
use crate::application::handlers::community::{
    CreateCommunityHandler, GetCommunityHandler, JoinCommunityHandler,
    LeaveCommunityHandler, ListCommunitiesHandler, ReconcileMembersHandler,
};
use crate::application::handlers::event::{
    CreateEventHandler, DeleteEventHandler, GetEventHandler, ListEventsHandler,
    UpdateEventHandler,
};
use crate::application::handlers::payment::{ConfirmPaymentHandler, InitiatePaymentHandler};
use crate::application::handlers::post::{
    AddCommentHandler, CreatePostHandler, ListPostsHandler, ToggleLikeHandler,
};
use crate::application::locks::CommunityLocks;
use crate::config::AuthConfig;
use crate::ports::{
    CommunityStore, EventPublisher, EventStore, GatewayRegistry, IdentityDirectory,
    MembershipStore, PaymentStore, PostStore,
};

pub use error::{ApiError, ErrorResponse};

/// Shared application state: Arc-wrapped ports plus the two shared
/// application services. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub communities: Arc<dyn CommunityStore>,
    pub memberships: Arc<dyn MembershipStore>,
    pub events: Arc<dyn EventStore>,
    pub posts: Arc<dyn PostStore>,
    pub payments: Arc<dyn PaymentStore>,
    pub identities: Arc<dyn IdentityDirectory>,
    pub publisher: Arc<dyn EventPublisher>,
    pub gateways: GatewayRegistry,
    pub locks: CommunityLocks,
    /// Upper bound on provider order calls.
    pub provider_timeout: Duration,
}

impl AppState {
    fn gate(&self) -> AuthorizationGate {
        AuthorizationGate::new(self.memberships.clone(), self.payments.clone())
    }

    pub fn create_community_handler(&self) -> CreateCommunityHandler {
        CreateCommunityHandler::new(
            self.communities.clone(),
            self.memberships.clone(),
            self.publisher.clone(),
        )
    }

    pub fn join_community_handler(&self) -> JoinCommunityHandler {
        JoinCommunityHandler::new(
            self.communities.clone(),
            self.memberships.clone(),
            self.locks.clone(),
            self.publisher.clone(),
        )
    }

    pub fn leave_community_handler(&self) -> LeaveCommunityHandler {
        LeaveCommunityHandler::new(
            self.communities.clone(),
            self.memberships.clone(),
            self.locks.clone(),
            self.publisher.clone(),
        )
    }

    pub fn reconcile_members_handler(&self) -> ReconcileMembersHandler {
        ReconcileMembersHandler::new(
            self.communities.clone(),
            self.memberships.clone(),
            self.locks.clone(),
            self.publisher.clone(),
        )
    }

    pub fn get_community_handler(&self) -> GetCommunityHandler {
        GetCommunityHandler::new(self.communities.clone(), self.identities.clone())
    }

    pub fn list_communities_handler(&self) -> ListCommunitiesHandler {
        ListCommunitiesHandler::new(self.communities.clone(), self.identities.clone())
    }

    pub fn create_event_handler(&self) -> CreateEventHandler {
        CreateEventHandler::new(self.events.clone(), self.communities.clone(), self.gate())
    }

    pub fn update_event_handler(&self) -> UpdateEventHandler {
        UpdateEventHandler::new(self.events.clone(), self.gate())
    }

    pub fn delete_event_handler(&self) -> DeleteEventHandler {
        DeleteEventHandler::new(self.events.clone(), self.gate())
    }

    pub fn get_event_handler(&self) -> GetEventHandler {
        GetEventHandler::new(self.events.clone(), self.gate())
    }

    pub fn list_events_handler(&self) -> ListEventsHandler {
        ListEventsHandler::new(self.events.clone())
    }

    pub fn create_post_handler(&self) -> CreatePostHandler {
        CreatePostHandler::new(self.posts.clone(), self.gate())
    }

    pub fn list_posts_handler(&self) -> ListPostsHandler {
        ListPostsHandler::new(self.posts.clone())
    }

    pub fn toggle_like_handler(&self) -> ToggleLikeHandler {
        ToggleLikeHandler::new(self.posts.clone(), self.gate())
    }

    pub fn add_comment_handler(&self) -> AddCommentHandler {
        AddCommentHandler::new(self.posts.clone(), self.gate())
    }

    pub fn initiate_payment_handler(&self) -> InitiatePaymentHandler {
        InitiatePaymentHandler::new(
            self.payments.clone(),
            self.gateways.clone(),
            self.publisher.clone(),
        )
    }

    pub fn confirm_payment_handler(&self) -> ConfirmPaymentHandler {
        ConfirmPaymentHandler::new(self.payments.clone(), self.publisher.clone())
    }
}

/// Assemble the API router.
///
/// All routes are authenticated except `/api/webhooks/*`, which is verified
/// via provider signatures instead.
pub fn api_router(state: AppState, auth: Arc<AuthConfig>) -> Router {
    let protected = Router::new()
        .nest("/communities", community::routes())
        .nest("/events", event::routes())
        .nest("/posts", post::routes())
        .nest("/payments", payment::routes())
        .layer(axum::middleware::from_fn_with_state(
            auth,
            middleware::require_auth,
        ));

    let webhooks = Router::new().nest("/webhooks", payment::webhook_routes());

    Router::new()
        .nest("/api", protected.merge(webhooks))
        .with_state(state)
}
