//! In-memory document store
//!
//! A `RwLock`-guarded implementation of [`DocumentStore`] for tests and for
//! running the backend without a database. Collections keep insertion order.

use eventboard_core::document_store::{DocumentStore, DocumentStoreError, StoreFuture};
use eventboard_core::domain::{EventId, EventRecord, Location, UserId};
use eventboard_core::marks::MarkKind;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Documents {
    locations: Vec<Location>,
    events: Vec<EventRecord>,
    marks: HashMap<(MarkKind, UserId, EventId), bool>,
}

/// In-memory document store.
///
/// Clones share the same underlying data.
///
/// # Example
///
/// ```
/// use eventboard_testing::InMemoryDocumentStore;
/// use eventboard_core::document_store::DocumentStore;
/// use eventboard_core::domain::{EventId, UserId};
/// use eventboard_core::marks::MarkKind;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryDocumentStore::with_catalog(
///     eventboard_testing::fixtures::locations(),
///     eventboard_testing::fixtures::events(),
/// );
///
/// let liked = store
///     .toggle_mark(MarkKind::Like, UserId::new("alice"), EventId::new("evt-1"))
///     .await?;
/// assert!(liked);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<Documents>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with locations and events
    ///
    /// No referential checks are made, so fixtures with dangling venue keys
    /// can be built on purpose.
    #[must_use]
    pub fn with_catalog(locations: Vec<Location>, events: Vec<EventRecord>) -> Self {
        Self {
            documents: Arc::new(RwLock::new(Documents {
                locations,
                events,
                marks: HashMap::new(),
            })),
        }
    }

    /// Number of stored events
    pub async fn event_count(&self) -> usize {
        self.documents.read().await.events.len()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn list_locations(&self) -> StoreFuture<'_, Vec<Location>> {
        Box::pin(async move { Ok(self.documents.read().await.locations.clone()) })
    }

    fn list_events(&self) -> StoreFuture<'_, Vec<EventRecord>> {
        Box::pin(async move { Ok(self.documents.read().await.events.clone()) })
    }

    fn find_event(&self, id: EventId) -> StoreFuture<'_, Option<EventRecord>> {
        Box::pin(async move {
            Ok(self
                .documents
                .read()
                .await
                .events
                .iter()
                .find(|event| event.id == id)
                .cloned())
        })
    }

    fn marked_events(&self, kind: MarkKind, user: UserId) -> StoreFuture<'_, Vec<EventRecord>> {
        Box::pin(async move {
            let documents = self.documents.read().await;
            Ok(documents
                .events
                .iter()
                .filter(|event| {
                    documents
                        .marks
                        .get(&(kind, user.clone(), event.id.clone()))
                        .copied()
                        .unwrap_or(false)
                })
                .cloned()
                .collect())
        })
    }

    fn toggle_mark(&self, kind: MarkKind, user: UserId, event: EventId) -> StoreFuture<'_, bool> {
        Box::pin(async move {
            let mut documents = self.documents.write().await;
            if !documents.events.iter().any(|e| e.id == event) {
                return Err(DocumentStoreError::EventNotFound(event));
            }

            let mark = documents.marks.entry((kind, user, event)).or_insert(false);
            *mark = !*mark;
            tracing::debug!(kind = %kind, marked = *mark, "Toggled mark in memory");
            Ok(*mark)
        })
    }

    fn insert_location(&self, location: Location) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let mut documents = self.documents.write().await;
            if documents.locations.iter().any(|l| l.id == location.id) {
                return Err(DocumentStoreError::Duplicate(location.id.to_string()));
            }
            documents.locations.push(location);
            Ok(())
        })
    }

    fn insert_event(&self, event: EventRecord) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let mut documents = self.documents.write().await;
            if documents.events.iter().any(|e| e.id == event.id) {
                return Err(DocumentStoreError::Duplicate(event.id.to_string()));
            }
            if !documents.locations.iter().any(|l| l.id == event.venue) {
                return Err(DocumentStoreError::LocationNotFound(event.venue));
            }
            documents.events.push(event);
            Ok(())
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}
