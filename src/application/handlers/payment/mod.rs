//! Payment command handlers.

mod confirm_payment;
mod initiate_payment;

pub use confirm_payment::{ConfirmPaymentCommand, ConfirmPaymentHandler};
pub use initiate_payment::{
    InitiatePaymentCommand, InitiatePaymentHandler, InitiatePaymentResult,
};
