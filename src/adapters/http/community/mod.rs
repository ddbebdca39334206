//! Community HTTP area.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::routes;
