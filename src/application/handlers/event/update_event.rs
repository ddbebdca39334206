//! UpdateEventHandler - Command handler for editing an event.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::domain::event::{Event, EventChanges};
use crate::domain::foundation::{DomainError, ErrorCode, EventId, UserId};
use crate::ports::EventStore;

/// Command to update an event. Only provided fields change.
#[derive(Debug, Clone)]
pub struct UpdateEventCommand {
    pub event_id: EventId,
    pub acting_user: UserId,
    pub changes: EventChanges,
}

/// Handler for updating events. Creator-only.
pub struct UpdateEventHandler {
    events: Arc<dyn EventStore>,
    gate: AuthorizationGate,
}

impl UpdateEventHandler {
    pub fn new(events: Arc<dyn EventStore>, gate: AuthorizationGate) -> Self {
        Self { events, gate }
    }

    pub async fn handle(&self, cmd: UpdateEventCommand) -> Result<Event, DomainError> {
        let mut event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::EventNotFound,
                    format!("Event not found: {}", cmd.event_id),
                )
            })?;

        self.gate.check_modify(&event, &cmd.acting_user)?;

        event.apply(cmd.changes)?;
        self.events.update(&event).await?;

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        MemoryEventStore, MemoryMembershipStore, MemoryPaymentStore,
    };
    use crate::domain::foundation::{CommunityId, Timestamp};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn gate() -> AuthorizationGate {
        AuthorizationGate::new(
            Arc::new(MemoryMembershipStore::new()),
            Arc::new(MemoryPaymentStore::new()),
        )
    }

    async fn seed_event(events: &MemoryEventStore) -> Event {
        let event = Event::new(
            EventId::new(),
            "Summit hike",
            None,
            Timestamp::now().add_days(7),
            "Trailhead",
            0,
            user("u1"),
            CommunityId::new(),
        )
        .unwrap();
        events.insert(&event).await.unwrap();
        event
    }

    #[tokio::test]
    async fn creator_can_update() {
        let events = Arc::new(MemoryEventStore::new());
        let event = seed_event(&events).await;
        let handler = UpdateEventHandler::new(events.clone(), gate());

        let updated = handler
            .handle(UpdateEventCommand {
                event_id: event.id,
                acting_user: user("u1"),
                changes: EventChanges {
                    title: Some("Night hike".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(updated.title, "Night hike");
        let stored = events.find_by_id(&event.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Night hike");
    }

    #[tokio::test]
    async fn non_creator_is_forbidden() {
        let events = Arc::new(MemoryEventStore::new());
        let event = seed_event(&events).await;
        let handler = UpdateEventHandler::new(events.clone(), gate());

        let err = handler
            .handle(UpdateEventCommand {
                event_id: event.id,
                acting_user: user("u2"),
                changes: EventChanges::default(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        let stored = events.find_by_id(&event.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Summit hike");
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let handler = UpdateEventHandler::new(Arc::new(MemoryEventStore::new()), gate());

        let err = handler
            .handle(UpdateEventCommand {
                event_id: EventId::new(),
                acting_user: user("u1"),
                changes: EventChanges::default(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::EventNotFound);
    }
}
