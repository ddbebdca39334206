//! Query handlers for reading events.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::domain::event::Event;
use crate::domain::foundation::{CommunityId, DomainError, ErrorCode, EventId, UserId};
use crate::ports::EventStore;

/// Query for events, optionally restricted to one community.
#[derive(Debug, Clone, Default)]
pub struct ListEventsQuery {
    pub community_id: Option<CommunityId>,
}

/// Handler for listing events. Reads are open to everyone.
pub struct ListEventsHandler {
    events: Arc<dyn EventStore>,
}

impl ListEventsHandler {
    pub fn new(events: Arc<dyn EventStore>) -> Self {
        Self { events }
    }

    pub async fn handle(&self, query: ListEventsQuery) -> Result<Vec<Event>, DomainError> {
        self.events.list(query.community_id.as_ref()).await
    }
}

/// Query for a single event, with the caller's access decision.
#[derive(Debug, Clone)]
pub struct GetEventQuery {
    pub event_id: EventId,
    pub user_id: UserId,
}

/// A single event plus whether the caller may attend it.
#[derive(Debug, Clone)]
pub struct EventWithAccess {
    pub event: Event,
    /// True for free events, or when a completed payment exists for the
    /// caller and this event.
    pub can_attend: bool,
}

/// Handler for reading one event and evaluating attendance access.
pub struct GetEventHandler {
    events: Arc<dyn EventStore>,
    gate: AuthorizationGate,
}

impl GetEventHandler {
    pub fn new(events: Arc<dyn EventStore>, gate: AuthorizationGate) -> Self {
        Self { events, gate }
    }

    pub async fn handle(&self, query: GetEventQuery) -> Result<EventWithAccess, DomainError> {
        let event = self
            .events
            .find_by_id(&query.event_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::EventNotFound,
                    format!("Event not found: {}", query.event_id),
                )
            })?;

        let can_attend = self.gate.can_attend(&query.user_id, &event).await?;

        Ok(EventWithAccess { event, can_attend })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        MemoryEventStore, MemoryMembershipStore, MemoryPaymentStore,
    };
    use crate::domain::foundation::{PaymentId, Timestamp};
    use crate::domain::payment::{Payment, PaymentOutcome, PaymentProvider};
    use crate::ports::PaymentStore;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn seed_event(events: &MemoryEventStore, price: i64) -> Event {
        let event = Event::new(
            EventId::new(),
            "Summit hike",
            None,
            Timestamp::now().add_days(7),
            "Trailhead",
            price,
            user("u1"),
            CommunityId::new(),
        )
        .unwrap();
        events.insert(&event).await.unwrap();
        event
    }

    #[tokio::test]
    async fn list_filters_by_community() {
        let events = Arc::new(MemoryEventStore::new());
        let event = seed_event(&events, 0).await;
        seed_event(&events, 0).await;

        let handler = ListEventsHandler::new(events);

        let all = handler.handle(ListEventsQuery::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let scoped = handler
            .handle(ListEventsQuery {
                community_id: Some(event.community_id),
            })
            .await
            .unwrap();
        assert_eq!(scoped.len(), 1);
    }

    #[tokio::test]
    async fn get_event_reports_open_access_for_free_events() {
        let events = Arc::new(MemoryEventStore::new());
        let event = seed_event(&events, 0).await;
        let gate = AuthorizationGate::new(
            Arc::new(MemoryMembershipStore::new()),
            Arc::new(MemoryPaymentStore::new()),
        );

        let handler = GetEventHandler::new(events, gate);
        let result = handler
            .handle(GetEventQuery {
                event_id: event.id,
                user_id: user("u2"),
            })
            .await
            .unwrap();

        assert!(result.can_attend);
    }

    #[tokio::test]
    async fn priced_event_access_follows_paid_fact() {
        let events = Arc::new(MemoryEventStore::new());
        let payments = Arc::new(MemoryPaymentStore::new());
        let event = seed_event(&events, 500).await;
        let gate =
            AuthorizationGate::new(Arc::new(MemoryMembershipStore::new()), payments.clone());
        let handler = GetEventHandler::new(events, gate);

        let query = GetEventQuery {
            event_id: event.id,
            user_id: user("u2"),
        };

        assert!(!handler.handle(query.clone()).await.unwrap().can_attend);

        let payment = Payment::initiate(
            PaymentId::new(),
            user("u2"),
            event.community_id,
            Some(event.id),
            event.price,
            "INR",
            PaymentProvider::Razorpay,
            "order_1",
        )
        .unwrap();
        payments.insert(&payment).await.unwrap();
        payments
            .finalize(&payment.id, PaymentOutcome::Completed)
            .await
            .unwrap();

        assert!(handler.handle(query).await.unwrap().can_attend);
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let gate = AuthorizationGate::new(
            Arc::new(MemoryMembershipStore::new()),
            Arc::new(MemoryPaymentStore::new()),
        );
        let handler = GetEventHandler::new(Arc::new(MemoryEventStore::new()), gate);

        let err = handler
            .handle(GetEventQuery {
                event_id: EventId::new(),
                user_id: user("u2"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::EventNotFound);
    }
}
