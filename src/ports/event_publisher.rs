//! Event publisher port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Publication failures are logged and surfaced, never silently dropped,
/// but handlers publish after their state writes so a failed publish cannot
/// roll back a committed mutation.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event envelope.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish several envelopes in order.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_publisher_is_object_safe() {
        fn _accepts_dyn(_publisher: &dyn EventPublisher) {}
    }
}
