//! Event store port.

use async_trait::async_trait;

use crate::domain::event::Event;
use crate::domain::foundation::{CommunityId, DomainError, EventId};

/// Store port for Event aggregates.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Insert a new event.
    async fn insert(&self, event: &Event) -> Result<(), DomainError>;

    /// Update an existing event.
    ///
    /// # Errors
    ///
    /// - `EventNotFound` if the event doesn't exist
    async fn update(&self, event: &Event) -> Result<(), DomainError>;

    /// Delete an event.
    ///
    /// # Errors
    ///
    /// - `EventNotFound` if the event doesn't exist
    async fn delete(&self, id: &EventId) -> Result<(), DomainError>;

    /// Find an event by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError>;

    /// List events, optionally filtered to a community, in creation order.
    async fn list(&self, community_id: Option<&CommunityId>)
        -> Result<Vec<Event>, DomainError>;
}
