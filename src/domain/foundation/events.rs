//! Domain event envelope shared by all event kinds.
//!
//! Aggregates emit typed event enums; handlers wrap them into envelopes
//! before handing them to the `EventPublisher` port.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::Timestamp;

/// Serialized domain event ready for publication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique id of this envelope instance.
    pub id: Uuid,

    /// Versioned event type, e.g. `community.member_joined.v1`.
    pub event_type: String,

    /// JSON payload of the event.
    pub payload: Value,

    /// When the event occurred in the domain.
    pub occurred_at: Timestamp,
}

/// Trait for domain events that can be wrapped into an envelope.
pub trait DomainEvent: Serialize {
    /// Versioned event type string.
    fn event_type(&self) -> &'static str;

    /// When the event occurred.
    fn occurred_at(&self) -> Timestamp;

    /// Wraps the event into an envelope for publication.
    fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope {
            id: Uuid::new_v4(),
            event_type: self.event_type().to_string(),
            payload: serde_json::to_value(self).unwrap_or(Value::Null),
            occurred_at: self.occurred_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestEvent {
        subject: String,
        occurred_at: Timestamp,
    }

    impl DomainEvent for TestEvent {
        fn event_type(&self) -> &'static str {
            "test.happened.v1"
        }

        fn occurred_at(&self) -> Timestamp {
            self.occurred_at
        }
    }

    #[test]
    fn to_envelope_carries_type_and_payload() {
        let event = TestEvent {
            subject: "hello".to_string(),
            occurred_at: Timestamp::now(),
        };

        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type, "test.happened.v1");
        assert_eq!(envelope.payload["subject"], "hello");
    }

    #[test]
    fn envelopes_get_unique_ids() {
        let event = TestEvent {
            subject: "hello".to_string(),
            occurred_at: Timestamp::now(),
        };

        assert_ne!(event.to_envelope().id, event.to_envelope().id);
    }
}
