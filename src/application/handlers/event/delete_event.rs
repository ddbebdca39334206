//! DeleteEventHandler - Command handler for removing an event.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::domain::foundation::{DomainError, ErrorCode, EventId, UserId};
use crate::ports::EventStore;

/// Command to delete an event.
#[derive(Debug, Clone)]
pub struct DeleteEventCommand {
    pub event_id: EventId,
    pub acting_user: UserId,
}

/// Handler for deleting events. Creator-only.
pub struct DeleteEventHandler {
    events: Arc<dyn EventStore>,
    gate: AuthorizationGate,
}

impl DeleteEventHandler {
    pub fn new(events: Arc<dyn EventStore>, gate: AuthorizationGate) -> Self {
        Self { events, gate }
    }

    pub async fn handle(&self, cmd: DeleteEventCommand) -> Result<(), DomainError> {
        let event = self
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

        self.events.delete(&cmd.event_id).await?;

        tracing::info!(event_id = %cmd.event_id, "Event deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        MemoryEventStore, MemoryMembershipStore, MemoryPaymentStore,
    };
    use crate::domain::event::Event;
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
    async fn creator_can_delete_own_event() {
        let events = Arc::new(MemoryEventStore::new());
        let event = seed_event(&events).await;
        let handler = DeleteEventHandler::new(events.clone(), gate());

        handler
            .handle(DeleteEventCommand {
                event_id: event.id,
                acting_user: user("u1"),
            })
            .await
            .unwrap();

        assert!(events.find_by_id(&event.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn other_user_is_forbidden() {
        let events = Arc::new(MemoryEventStore::new());
        let event = seed_event(&events).await;
        let handler = DeleteEventHandler::new(events.clone(), gate());

        let err = handler
            .handle(DeleteEventCommand {
                event_id: event.id,
                acting_user: user("u2"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert!(events.find_by_id(&event.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let handler = DeleteEventHandler::new(Arc::new(MemoryEventStore::new()), gate());

        let err = handler
            .handle(DeleteEventCommand {
                event_id: EventId::new(),
                acting_user: user("u1"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::EventNotFound);
    }
}
