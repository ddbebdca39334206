//! Event command/query handlers.

mod create_event;
mod delete_event;
mod list_events;
mod update_event;

pub use create_event::{CreateEventCommand, CreateEventHandler};
pub use delete_event::{DeleteEventCommand, DeleteEventHandler};
pub use list_events::{
    EventWithAccess, GetEventHandler, GetEventQuery, ListEventsHandler, ListEventsQuery,
};
pub use update_event::{UpdateEventCommand, UpdateEventHandler};
