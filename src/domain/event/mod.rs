//! Event domain module.

mod aggregate;

pub use aggregate::{Event, EventChanges};
