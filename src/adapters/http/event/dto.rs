//! HTTP DTOs for event endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::event::Event;
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create an event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: Timestamp,
    pub location: String,
    /// Entry price in minor currency units; defaults to free.
    #[serde(default)]
    pub price: i64,
    pub community_id: String,
}

/// Request to update an event. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    /// `null` clears the description; absence leaves it unchanged.
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
    pub date: Option<Timestamp>,
    pub location: Option<String>,
    pub price: Option<i64>,
}

/// Distinguishes an absent field from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(de).map(Some)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Event representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub location: String,
    pub price: i64,
    pub created_by: String,
    pub community_id: String,
    pub created_at: String,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id.to_string(),
            title: event.title,
            description: event.description,
            date: event.date.as_datetime().to_rfc3339(),
            location: event.location,
            price: event.price,
            created_by: event.created_by.to_string(),
            community_id: event.community_id.to_string(),
            created_at: event.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Detail view including the caller's access decision.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: EventResponse,
    /// True for free events, or when the caller holds a completed payment.
    pub can_attend: bool,
}

/// Query parameters for event listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEventsParams {
    pub community_id: Option<String>,
}
