//! Document store trait for locations, events and per-user marks.
//!
//! The backend handlers are written against [`DocumentStore`] only. Two
//! implementations exist:
//!
//! - `PostgresDocumentStore` (in `eventboard-postgres`): durable storage
//! - `InMemoryDocumentStore` (in `eventboard-testing`): tests and local runs
//!
//! # Example
//!
//! ```no_run
//! use eventboard_core::document_store::{DocumentStore, DocumentStoreError};
//! use eventboard_core::domain::{EventId, UserId};
//! use eventboard_core::marks::MarkKind;
//!
//! async fn like_twice<S: DocumentStore>(store: &S) -> Result<bool, DocumentStoreError> {
//!     let user = UserId::new("alice");
//!     let event = EventId::new("evt-1");
//!
//!     store.toggle_mark(MarkKind::Like, user.clone(), event.clone()).await?;
//!     store.toggle_mark(MarkKind::Like, user, event).await
//! }
//! ```

use crate::domain::{EventId, EventRecord, Location, LocationId, UserId};
use crate::marks::MarkKind;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by every [`DocumentStore`] operation.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, DocumentStoreError>> + Send + 'a>>;

/// Errors that can occur during document store operations.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// The event does not exist.
    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    /// The event references a location that does not exist.
    #[error("Location not found: {0}")]
    LocationNotFound(LocationId),

    /// A document with this identifier already exists.
    #[error("Duplicate document: {0}")]
    Duplicate(String),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Data access for the event board.
///
/// Listing order is insertion order for both collections. Marks are stored as
/// explicit booleans per (kind, user, event); a toggle on a never-marked
/// event yields `true`.
///
/// # Dyn Compatibility
///
/// Methods return [`StoreFuture`] instead of using `async fn` so that the
/// store can be shared as `Arc<dyn DocumentStore>` across handlers.
pub trait DocumentStore: Send + Sync {
    /// All locations.
    ///
    /// # Errors
    ///
    /// `DatabaseError` when the backing store fails.
    fn list_locations(&self) -> StoreFuture<'_, Vec<Location>>;

    /// All events.
    ///
    /// # Errors
    ///
    /// `DatabaseError` when the backing store fails.
    fn list_events(&self) -> StoreFuture<'_, Vec<EventRecord>>;

    /// One event, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// `DatabaseError` when the backing store fails.
    fn find_event(&self, id: EventId) -> StoreFuture<'_, Option<EventRecord>>;

    /// Events the user currently has marked `true` for this kind.
    ///
    /// # Errors
    ///
    /// `DatabaseError` when the backing store fails.
    fn marked_events(&self, kind: MarkKind, user: UserId) -> StoreFuture<'_, Vec<EventRecord>>;

    /// Flip a mark and return the new value.
    ///
    /// # Errors
    ///
    /// - `EventNotFound`: the event does not exist
    /// - `DatabaseError`: the backing store failed
    fn toggle_mark(
        &self,
        kind: MarkKind,
        user: UserId,
        event: EventId,
    ) -> StoreFuture<'_, bool>;

    /// Add a location.
    ///
    /// # Errors
    ///
    /// - `Duplicate`: a location with this id exists
    /// - `DatabaseError`: the backing store failed
    fn insert_location(&self, location: Location) -> StoreFuture<'_, ()>;

    /// Add an event.
    ///
    /// # Errors
    ///
    /// - `Duplicate`: an event with this id exists
    /// - `LocationNotFound`: the venue key does not resolve
    /// - `DatabaseError`: the backing store failed
    fn insert_event(&self, event: EventRecord) -> StoreFuture<'_, ()>;

    /// Cheap round-trip used by the readiness probe.
    ///
    /// # Errors
    ///
    /// `DatabaseError` when the backing store is unreachable.
    fn ping(&self) -> StoreFuture<'_, ()>;
}
