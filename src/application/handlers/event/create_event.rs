//! CreateEventHandler - Command handler for scheduling an event.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::domain::community::MemberRole;
use crate::domain::event::Event;
use crate::domain::foundation::{
    CommunityId, DomainError, ErrorCode, EventId, Timestamp, UserId,
};
use crate::ports::{CommunityStore, EventStore};

/// Command to create an event.
#[derive(Debug, Clone)]
pub struct CreateEventCommand {
    pub title: String,
    pub description: Option<String>,
    pub date: Timestamp,
    pub location: String,
    /// Entry price in minor currency units; 0 means free.
    pub price: i64,
    pub community_id: CommunityId,
    pub created_by: UserId,
}

/// Handler for creating events.
///
/// The creator must hold an active membership in the target community.
pub struct CreateEventHandler {
    events: Arc<dyn EventStore>,
    communities: Arc<dyn CommunityStore>,
    gate: AuthorizationGate,
}

impl CreateEventHandler {
    pub fn new(
        events: Arc<dyn EventStore>,
        communities: Arc<dyn CommunityStore>,
        gate: AuthorizationGate,
    ) -> Self {
        Self {
            events,
            communities,
            gate,
        }
    }

    pub async fn handle(&self, cmd: CreateEventCommand) -> Result<Event, DomainError> {
        if self
            .communities
            .find_by_id(&cmd.community_id)
            .await?
            .is_none()
        {
            return Err(DomainError::new(
                ErrorCode::CommunityNotFound,
                format!("Community not found: {}", cmd.community_id),
            ));
        }

        self.gate
            .require_role(&cmd.created_by, &cmd.community_id, MemberRole::Member)
            .await?;

        let event = Event::new(
            EventId::new(),
            cmd.title,
            cmd.description,
            cmd.date,
            cmd.location,
            cmd.price,
            cmd.created_by,
            cmd.community_id,
        )?;

        self.events.insert(&event).await?;

        tracing::info!(event_id = %event.id, community_id = %event.community_id, "Event created");

        Ok(event)
    }
}
