//! Adapters - Implementations of the ports.
//!
//! - `memory` - In-memory stores and mocks for tests and development
//! - `postgres` - sqlx-backed persistent stores
//! - `razorpay` / `stripe` - Payment gateway integrations
//! - `http` - Axum transport layer

pub mod http;
pub mod memory;
pub mod postgres;
pub mod razorpay;
pub mod stripe;
