//! HTTP handlers for event endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::AuthenticatedUser;
use crate::adapters::http::AppState;
use crate::application::handlers::event::{
    CreateEventCommand, DeleteEventCommand, GetEventQuery, ListEventsQuery,
    UpdateEventCommand,
};
use crate::domain::event::EventChanges;
use crate::domain::foundation::{CommunityId, EventId};

use super::dto::{
    CreateEventRequest, EventDetailResponse, EventResponse, ListEventsParams,
    UpdateEventRequest,
};

fn parse_event_id(id: &str) -> Result<EventId, ApiError> {
    id.parse()
        .map_err(|_| ApiError::validation("id", format!("'{}' is not a valid event id", id)))
}

fn parse_community_id(id: &str) -> Result<CommunityId, ApiError> {
    id.parse()
        .map_err(|_| {
            ApiError::validation("community_id", format!("'{}' is not a valid community id", id))
        })
}

/// POST /api/events - Schedule an event
pub async fn create_event(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let community_id = parse_community_id(&request.community_id)?;
    let handler = state.create_event_handler();
    let event = handler
        .handle(CreateEventCommand {
            title: request.title,
            description: request.description,
            date: request.date,
            location: request.location,
            price: request.price,
            community_id,
            created_by: user.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

/// GET /api/events - List events, optionally scoped to a community
pub async fn list_events(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<ListEventsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let community_id = params
        .community_id
        .as_deref()
        .map(parse_community_id)
        .transpose()?;

    let handler = state.list_events_handler();
    let events = handler.handle(ListEventsQuery { community_id }).await?;

    let response: Vec<EventResponse> = events.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// GET /api/events/:id - Event detail with the caller's access decision
pub async fn get_event(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let event_id = parse_event_id(&id)?;
    let handler = state.get_event_handler();
    let result = handler
        .handle(GetEventQuery {
            event_id,
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(EventDetailResponse {
        event: result.event.into(),
        can_attend: result.can_attend,
    }))
}

/// PUT /api/events/:id - Update an event (creator only)
pub async fn update_event(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let event_id = parse_event_id(&id)?;
    let handler = state.update_event_handler();
    let event = handler
        .handle(UpdateEventCommand {
            event_id,
            acting_user: user.user_id,
            changes: EventChanges {
                title: request.title,
                description: request.description,
                date: request.date,
                location: request.location,
                price: request.price,
            },
        })
        .await?;

    Ok(Json(EventResponse::from(event)))
}

/// DELETE /api/events/:id - Delete an event (creator only)
pub async fn delete_event(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let event_id = parse_event_id(&id)?;
    let handler = state.delete_event_handler();
    handler
        .handle(DeleteEventCommand {
            event_id,
            acting_user: user.user_id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
