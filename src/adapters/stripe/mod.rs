//! Stripe gateway adapter.

mod adapter;

pub use adapter::StripeGateway;
