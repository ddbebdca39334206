//! Event aggregate entity.
//!
//! A scheduled community event, optionally priced. Mutation is restricted to
//! the creator; reads are open to everyone. Prices are minor currency units
//! stored as `i64`.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CommunityId, EventId, OwnedByUser, Timestamp, UserId, ValidationError,
};

/// Event aggregate - a scheduled happening within a community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for this event.
    pub id: EventId,

    /// Event title.
    pub title: String,

    /// Optional free-form description.
    pub description: Option<String>,

    /// When the event takes place.
    pub date: Timestamp,

    /// Where the event takes place.
    pub location: String,

    /// Entry price in minor currency units; 0 means free.
    pub price: i64,

    /// The user who created the event; sole holder of mutation rights.
    pub created_by: UserId,

    /// The community the event belongs to.
    pub community_id: CommunityId,

    /// When the event was created.
    pub created_at: Timestamp,

    /// When the event was last updated.
    pub updated_at: Timestamp,
}

/// Partial update applied to an event by its creator.
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub date: Option<Timestamp>,
    pub location: Option<String>,
    pub price: Option<i64>,
}

impl Event {
    /// Creates a new event.
    ///
    /// # Errors
    ///
    /// Returns error if title or location is empty, or price is negative.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        description: Option<String>,
        date: Timestamp,
        location: impl Into<String>,
        price: i64,
        created_by: UserId,
        community_id: CommunityId,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let location = location.into();
        if location.trim().is_empty() {
            return Err(ValidationError::empty_field("location"));
        }
        if price < 0 {
            return Err(ValidationError::negative("price", price));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            title,
            description,
            date,
            location,
            price,
            created_by,
            community_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns true if the event has no entry price.
    pub fn is_free(&self) -> bool {
        self.price == 0
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns error if a changed field fails the same validation as `new`.
    pub fn apply(&mut self, changes: EventChanges) -> Result<(), ValidationError> {
        if let Some(title) = changes.title {
            if title.trim().is_empty() {
                return Err(ValidationError::empty_field("title"));
            }
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(date) = changes.date {
            self.date = date;
        }
        if let Some(location) = changes.location {
            if location.trim().is_empty() {
                return Err(ValidationError::empty_field("location"));
            }
            self.location = location;
        }
        if let Some(price) = changes.price {
            if price < 0 {
                return Err(ValidationError::negative("price", price));
            }
            self.price = price;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

impl OwnedByUser for Event {
    fn owner_id(&self) -> &UserId {
        &self.created_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn test_event(price: i64) -> Event {
        Event::new(
            EventId::new(),
            "Summit hike",
            Some("Dawn start".to_string()),
            Timestamp::now().add_days(7),
            "Trailhead",
            price,
            user("u1"),
            CommunityId::new(),
        )
        .unwrap()
    }

    #[test]
    fn price_defaults_make_event_free_at_zero() {
        assert!(test_event(0).is_free());
        assert!(!test_event(500).is_free());
    }

    #[test]
    fn negative_price_is_rejected() {
        let result = Event::new(
            EventId::new(),
            "Summit hike",
            None,
            Timestamp::now(),
            "Trailhead",
            -1,
            user("u1"),
            CommunityId::new(),
        );
        assert_eq!(result.unwrap_err(), ValidationError::negative("price", -1));
    }

    #[test]
    fn empty_title_is_rejected() {
        let result = Event::new(
            EventId::new(),
            " ",
            None,
            Timestamp::now(),
            "Trailhead",
            0,
            user("u1"),
            CommunityId::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn apply_updates_changed_fields_only() {
        let mut event = test_event(0);

        event
            .apply(EventChanges {
                title: Some("Night hike".to_string()),
                price: Some(250),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(event.title, "Night hike");
        assert_eq!(event.price, 250);
        assert_eq!(event.location, "Trailhead");
    }

    #[test]
    fn apply_can_clear_description() {
        let mut event = test_event(0);

        event
            .apply(EventChanges {
                description: Some(None),
                ..Default::default()
            })
            .unwrap();

        assert!(event.description.is_none());
    }

    #[test]
    fn apply_rejects_invalid_values() {
        let mut event = test_event(0);

        assert!(event
            .apply(EventChanges {
                price: Some(-100),
                ..Default::default()
            })
            .is_err());
        assert_eq!(event.price, 0);
    }

    #[test]
    fn creator_owns_the_event() {
        let event = test_event(0);

        assert!(event.check_ownership(&user("u1")).is_ok());
        assert!(event.check_ownership(&user("u2")).is_err());
    }
}
