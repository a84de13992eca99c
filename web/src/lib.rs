//! REST layer for Eventboard.
//!
//! A thin axum shell over a [`DocumentStore`](eventboard_core::document_store::DocumentStore):
//! each route is one store call mapped to JSON. Like and booking routes need
//! a bearer session, resolved through a [`SessionVerifier`].
//!
//! # Request Flow
//!
//! 1. [`correlation_id_layer`] tags the request and opens a span
//! 2. `TraceLayer` logs the request and response
//! 3. Extractors pull path params and, where required, the [`AuthenticatedUser`]
//! 4. The handler calls the store
//! 5. Store errors become [`AppError`] responses with a `{code, message}` body
//!
//! # Example
//!
//! ```no_run
//! use eventboard_web::{build_router, cors_layer, session::StaticSessions, AppState};
//! use eventboard_testing::InMemoryDocumentStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState::new(
//!     Arc::new(InMemoryDocumentStore::new()),
//!     Arc::new(StaticSessions::parse("dev-token=alice")),
//! );
//! let app = build_router(state, cors_layer("http://localhost:5173")?);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;

pub use error::AppError;
pub use extractors::{AuthenticatedUser, BearerToken, CorrelationId};
pub use middleware::{correlation_id_layer, CorrelationIdExt, CORRELATION_ID_HEADER};
pub use routes::{build_router, cors_layer};
pub use session::{SessionVerifier, StaticSessions};
pub use state::AppState;
