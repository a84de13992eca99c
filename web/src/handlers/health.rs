//! Health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use eventboard_runtime::{HealthCheck, HealthReport, HealthStatus};
use std::time::Instant;

/// Liveness: the process is up. Dependencies are not checked.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Readiness: the document store answers a ping.
///
/// # Status Codes
///
/// - 200 OK: store reachable
/// - 503 Service Unavailable: store unreachable
///
/// # Endpoint
///
/// ```text
/// GET /ready
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "checks": [
///     { "component": "document_store", "status": "healthy", "metadata": [["latency_ms", "1"]] }
///   ],
///   "timestamp": "2025-01-01T00:00:00Z"
/// }
/// ```
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let started = Instant::now();
    let store = match state.store.ping().await {
        Ok(()) => HealthCheck::healthy("document_store"),
        Err(error) => {
            tracing::warn!(error = %error, "Readiness check failed");
            HealthCheck::unhealthy("document_store", error.to_string())
        },
    }
    .with_metadata("latency_ms", started.elapsed().as_millis().to_string());

    let report = HealthReport::new(vec![store]);
    let status = match report.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::StaticSessions;
    use eventboard_testing::InMemoryDocumentStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, body) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_readiness_with_reachable_store() {
        let state = AppState::new(
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(StaticSessions::new()),
        );

        let (status, Json(health)) = readiness_check(State(state)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(health.is_healthy());
        assert_eq!(health.checks.len(), 1);
        assert_eq!(health.checks[0].component, "document_store");
        assert_eq!(health.checks[0].metadata[0].0, "latency_ms");
    }
}
