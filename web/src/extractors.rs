//! Custom Axum extractors.
//!
//! - [`CorrelationId`]: request correlation id from the header, or a fresh one
//! - [`BearerToken`]: raw token from `Authorization: Bearer <token>`
//! - [`AuthenticatedUser`]: the verified caller; rejects with 401
//!
//! # Example
//!
//! ```ignore
//! async fn liked(
//!     State(state): State<AppState>,
//!     AuthenticatedUser(user): AuthenticatedUser,
//! ) -> Result<Json<Vec<EventRecord>>, AppError> {
//!     Ok(Json(state.store.marked_events(MarkKind::Like, user).await?))
//! }
//! ```

use crate::error::AppError;
use crate::middleware::CORRELATION_ID_HEADER;
use crate::session::SessionVerifier;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use eventboard_core::domain::UserId;
use std::sync::Arc;
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Prefers the id stored by the correlation middleware, then the
/// `X-Correlation-ID` header, and generates a UUID v4 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Uuid>() {
            return Ok(Self(*id));
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

/// Bearer token from the `Authorization` header.
#[derive(Clone)]
pub struct BearerToken(pub String);

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization format. Expected 'Bearer <token>'")
        })?;

        if token.trim().is_empty() {
            return Err(AppError::unauthorized("Empty bearer token"));
        }

        Ok(Self(token.trim().to_string()))
    }
}

/// The caller of an authenticated endpoint.
///
/// Use this as a handler parameter to require a valid bearer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    Arc<dyn SessionVerifier>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let bearer = BearerToken::from_request_parts(parts, state).await?;
        let sessions = Arc::<dyn SessionVerifier>::from_ref(state);

        sessions.verify(&bearer.0).map(Self).ok_or_else(|| {
            tracing::debug!("Rejected unknown bearer token");
            AppError::unauthorized("Invalid or expired session")
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code
mod tests {
    use super::*;
    use crate::session::StaticSessions;
    use axum::http::{Request, StatusCode};

    #[derive(Clone)]
    struct TestState {
        sessions: Arc<dyn SessionVerifier>,
    }

    impl FromRef<TestState> for Arc<dyn SessionVerifier> {
        fn from_ref(state: &TestState) -> Self {
            Arc::clone(&state.sessions)
        }
    }

    fn state() -> TestState {
        TestState {
            sessions: Arc::new(StaticSessions::new().with_token("good", UserId::new("alice"))),
        }
    }

    fn parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder();
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).expect("Valid request").into_parts().0
    }

    #[tokio::test]
    async fn test_correlation_id_from_header() {
        let uuid = Uuid::new_v4();
        let req = Request::builder()
            .header(CORRELATION_ID_HEADER, uuid.to_string())
            .body(())
            .expect("Valid request");

        let (mut parts, _) = req.into_parts();
        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_eq!(correlation_id.0, uuid);
    }

    #[tokio::test]
    async fn test_correlation_id_generates_new() {
        let mut parts = parts(None);
        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_ne!(correlation_id.0, Uuid::nil());
    }

    #[tokio::test]
    async fn test_bearer_token_extracted() {
        let mut parts = parts(Some("Bearer abc123"));
        let token = BearerToken::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(token.0, "abc123");
        assert_eq!(format!("{token:?}"), "BearerToken(<redacted>)");
    }

    #[tokio::test]
    async fn test_bearer_token_rejections() {
        for header in [None, Some("Basic abc"), Some("Bearer "), Some("Bearer    ")] {
            let mut parts = parts(header);
            let error = BearerToken::from_request_parts(&mut parts, &())
                .await
                .unwrap_err();
            assert_eq!(error.status(), StatusCode::UNAUTHORIZED, "header: {header:?}");
        }
    }

    #[tokio::test]
    async fn test_authenticated_user_resolves_known_token() {
        let mut parts = parts(Some("Bearer good"));
        let user = AuthenticatedUser::from_request_parts(&mut parts, &state())
            .await
            .unwrap();
        assert_eq!(user, AuthenticatedUser(UserId::new("alice")));
    }

    #[tokio::test]
    async fn test_authenticated_user_rejects_unknown_token() {
        let mut parts = parts(Some("Bearer forged"));
        let error = AuthenticatedUser::from_request_parts(&mut parts, &state())
            .await
            .unwrap_err();
        assert_eq!(error.status(), StatusCode::UNAUTHORIZED);
    }
}
