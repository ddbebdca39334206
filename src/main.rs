//! Communa server entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use communa::adapters::http::{api_router, AppState};
use communa::adapters::memory::{InMemoryEventPublisher, StaticIdentityDirectory};
use communa::adapters::postgres::{
    PostgresCommunityStore, PostgresEventStore, PostgresMembershipStore,
    PostgresPaymentStore, PostgresPostStore,
};
use communa::adapters::razorpay::RazorpayGateway;
use communa::adapters::stripe::StripeGateway;
use communa::application::locks::CommunityLocks;
use communa::config::AppConfig;
use communa::ports::GatewayRegistry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let gateways = GatewayRegistry::new()
        .register(Arc::new(RazorpayGateway::new(
            config.payment.razorpay.clone(),
        )))
        .register(Arc::new(StripeGateway::new(config.payment.stripe.clone())));

    // Profile resolution belongs to the external identity collaborator; the
    // static directory stands in until its lookup API is wired.
    let state = AppState {
        communities: Arc::new(PostgresCommunityStore::new(pool.clone())),
        memberships: Arc::new(PostgresMembershipStore::new(pool.clone())),
        events: Arc::new(PostgresEventStore::new(pool.clone())),
        posts: Arc::new(PostgresPostStore::new(pool.clone())),
        payments: Arc::new(PostgresPaymentStore::new(pool.clone())),
        identities: Arc::new(StaticIdentityDirectory::new()),
        publisher: Arc::new(InMemoryEventPublisher::new()),
        gateways,
        locks: CommunityLocks::new(),
        provider_timeout: config.payment.provider_timeout(),
    };

    let cors = {
        let origins: Vec<HeaderValue> = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        if origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = api_router(state, Arc::new(config.auth.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "Communa listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
