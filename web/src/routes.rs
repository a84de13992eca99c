//! Router assembly.

use crate::handlers::{catalog, health, marks};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// CORS policy admitting the single-page client's origin.
///
/// # Errors
///
/// Returns the parse error when `origin` is not a valid header value.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    let origin = HeaderValue::from_str(origin)?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-correlation-id"),
        ])
        .max_age(Duration::from_secs(60 * 60)))
}

/// Build the complete router.
///
/// | Route | Auth |
/// |---|---|
/// | `GET /health`, `GET /ready` | public |
/// | `GET /locations`, `GET /events`, `GET /events/:id` | public |
/// | `GET /likes/events`, `GET /bookings/events` | bearer |
/// | `POST /likes/:eventId`, `POST /bookings/:eventId` | bearer |
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/locations", get(catalog::list_locations))
        .route("/events", get(catalog::list_events))
        .route("/events/:id", get(catalog::get_event))
        .route("/likes/events", get(marks::liked_events))
        .route("/bookings/events", get(marks::booked_events))
        .route("/likes/:event_id", post(marks::toggle_like))
        .route("/bookings/:event_id", post(marks::toggle_booking))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
