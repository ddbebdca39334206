//! Application layer - use case orchestration.
//!
//! Handlers compose ports into the operations of the system; the
//! authorization gate and the per-community lock registry are the two
//! shared services they lean on.

pub mod authorization;
pub mod handlers;
pub mod locks;

pub use authorization::AuthorizationGate;
pub use locks::CommunityLocks;
