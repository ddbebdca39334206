//! In-memory EventStore adapter.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::event::Event;
use crate::domain::foundation::{CommunityId, DomainError, ErrorCode, EventId};
use crate::ports::EventStore;

/// In-memory storage for events.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    events: Arc<RwLock<Vec<Event>>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn insert(&self, event: &Event) -> Result<(), DomainError> {
        self.events.write().await.push(event.clone());
        Ok(())
    }

    async fn update(&self, event: &Event) -> Result<(), DomainError> {
        let mut events = self.events.write().await;
        match events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => {
                *existing = event.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::EventNotFound,
                format!("Event not found: {}", event.id),
            )),
        }
    }

    async fn delete(&self, id: &EventId) -> Result<(), DomainError> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|e| &e.id != id);
        if events.len() == before {
            return Err(DomainError::new(
                ErrorCode::EventNotFound,
                format!("Event not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        let events = self.events.read().await;
        Ok(events.iter().find(|e| &e.id == id).cloned())
    }

    async fn list(
        &self,
        community_id: Option<&CommunityId>,
    ) -> Result<Vec<Event>, DomainError> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| community_id.map_or(true, |id| &e.community_id == id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};

    fn event(community_id: CommunityId, title: &str) -> Event {
        Event::new(
            EventId::new(),
            title,
            None,
            Timestamp::now().add_days(7),
            "Trailhead",
            0,
            UserId::new("u1").unwrap(),
            community_id,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn insert_and_find_roundtrip() {
        let store = MemoryEventStore::new();
        let summit = event(CommunityId::new(), "Summit hike");

        store.insert(&summit).await.unwrap();
        assert_eq!(store.find_by_id(&summit.id).await.unwrap(), Some(summit));
    }

    #[tokio::test]
    async fn list_filters_by_community() {
        let store = MemoryEventStore::new();
        let hikers = CommunityId::new();
        let climbers = CommunityId::new();

        store.insert(&event(hikers, "Summit hike")).await.unwrap();
        store.insert(&event(climbers, "Crag day")).await.unwrap();
        store.insert(&event(hikers, "Night walk")).await.unwrap();

        let all = store.list(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let titles: Vec<String> = store
            .list(Some(&hikers))
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Summit hike", "Night walk"]);
    }

    #[tokio::test]
    async fn delete_removes_event() {
        let store = MemoryEventStore::new();
        let summit = event(CommunityId::new(), "Summit hike");
        store.insert(&summit).await.unwrap();

        store.delete(&summit.id).await.unwrap();
        assert_eq!(store.find_by_id(&summit.id).await.unwrap(), None);

        let err = store.delete(&summit.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EventNotFound);
    }

    #[tokio::test]
    async fn update_unknown_event_fails() {
        let store = MemoryEventStore::new();

        let err = store
            .update(&event(CommunityId::new(), "Summit hike"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EventNotFound);
    }
}
