//! Public catalog endpoints.
//!
//! - `GET /locations`
//! - `GET /events`
//! - `GET /events/:id`
//!
//! Collections are served whole; filtering and paging happen client-side.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use eventboard_core::domain::{EventId, EventRecord, Location};

/// All locations, in insertion order.
#[tracing::instrument(skip(state))]
pub async fn list_locations(State(state): State<AppState>) -> Result<Json<Vec<Location>>, AppError> {
    let locations = state.store.list_locations().await?;
    tracing::debug!(count = locations.len(), "Listed locations");
    Ok(Json(locations))
}

/// All events, in insertion order.
#[tracing::instrument(skip(state))]
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<EventRecord>>, AppError> {
    let events = state.store.list_events().await?;
    tracing::debug!(count = events.len(), "Listed events");
    Ok(Json(events))
}

/// One event by document id.
///
/// # Errors
///
/// 404 when no event has this id.
#[tracing::instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EventRecord>, AppError> {
    state
        .store
        .find_event(EventId::new(id.as_str()))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Event", id))
}
