//! In-memory EventPublisher adapter.
//!
//! Records envelopes for inspection in tests and logs them in development.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Event publisher that retains everything it publishes.
#[derive(Clone, Default)]
pub struct InMemoryEventPublisher {
    published: Arc<Mutex<Vec<EventEnvelope>>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// All envelopes published so far, in order.
    pub fn published(&self) -> Vec<EventEnvelope> {
        self.published.lock().unwrap().clone()
    }

    /// Event types published so far, in order.
    pub fn published_types(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::debug!(event_type = %event.event_type, event_id = %event.id, "Publishing domain event");
        self.published.lock().unwrap().push(event);
        Ok(())
    }
}
