//! Like and booking endpoints. All require a bearer session.
//!
//! - `GET /likes/events`, `GET /bookings/events`: the caller's marked events
//! - `POST /likes/:eventId`, `POST /bookings/:eventId`: flip the caller's mark

use crate::error::AppError;
use crate::extractors::AuthenticatedUser;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use eventboard_core::domain::{EventId, EventRecord, MarkToggled};
use eventboard_core::marks::MarkKind;

async fn marked(
    state: &AppState,
    kind: MarkKind,
    user: AuthenticatedUser,
) -> Result<Json<Vec<EventRecord>>, AppError> {
    let events = state.store.marked_events(kind, user.0).await?;
    tracing::debug!(kind = %kind, count = events.len(), "Listed marked events");
    Ok(Json(events))
}

async fn toggle(
    state: &AppState,
    kind: MarkKind,
    user: AuthenticatedUser,
    event_id: String,
) -> Result<Json<MarkToggled>, AppError> {
    let event_id = EventId::new(event_id);
    let marked = state
        .store
        .toggle_mark(kind, user.0, event_id.clone())
        .await?;

    metrics::counter!("web.marks.toggled", "kind" => kind.as_str()).increment(1);
    tracing::info!(kind = %kind, event_id = %event_id, marked, "Mark toggled");

    Ok(Json(MarkToggled { event_id, marked }))
}

/// Events the caller has liked.
#[tracing::instrument(skip(state))]
pub async fn liked_events(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<EventRecord>>, AppError> {
    marked(&state, MarkKind::Like, user).await
}

/// Events the caller has booked.
#[tracing::instrument(skip(state))]
pub async fn booked_events(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<EventRecord>>, AppError> {
    marked(&state, MarkKind::Booking, user).await
}

/// Flip the caller's like on an event.
///
/// # Errors
///
/// 404 when the event does not exist.
#[tracing::instrument(skip(state))]
pub async fn toggle_like(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(event_id): Path<String>,
) -> Result<Json<MarkToggled>, AppError> {
    toggle(&state, MarkKind::Like, user, event_id).await
}

/// Flip the caller's booking on an event.
///
/// # Errors
///
/// 404 when the event does not exist.
#[tracing::instrument(skip(state))]
pub async fn toggle_booking(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(event_id): Path<String>,
) -> Result<Json<MarkToggled>, AppError> {
    toggle(&state, MarkKind::Booking, user, event_id).await
}
