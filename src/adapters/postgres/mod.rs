//! PostgreSQL adapters.
//!
//! sqlx-based implementations of the persistence ports, sharing one
//! `PgPool`. Queries are runtime-checked with explicit row structs; unique
//! constraints are translated to their domain error counterparts.

mod community_store;
mod event_store;
mod membership_store;
mod payment_store;
mod post_store;

pub use community_store::PostgresCommunityStore;
pub use event_store::PostgresEventStore;
pub use membership_store::PostgresMembershipStore;
pub use payment_store::PostgresPaymentStore;
pub use post_store::PostgresPostStore;
