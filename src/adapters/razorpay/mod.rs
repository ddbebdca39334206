//! Razorpay gateway adapter.

mod adapter;

pub use adapter::RazorpayGateway;
