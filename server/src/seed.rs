//! Startup catalog seeding.
//!
//! A seed file is a JSON document of the form
//! `{"locations": [...], "events": [...]}` using the same field names the
//! REST API serves. Locations are inserted before events so venue
//! references resolve. Documents that already exist are skipped, so a
//! restart against a persistent database is harmless.

use eventboard_core::document_store::{DocumentStore, DocumentStoreError};
use eventboard_core::domain::{EventRecord, Location};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Catalog read from a seed file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeedData {
    /// Venues, inserted first
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Events referencing the venues above
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

/// Outcome of seeding a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// New locations
    pub locations_inserted: usize,
    /// New events
    pub events_inserted: usize,
    /// Documents already present
    pub skipped: usize,
}

/// Seeding errors
#[derive(Error, Debug)]
pub enum SeedError {
    /// The file could not be read
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid catalog document
    #[error("Invalid seed file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The store refused a document
    #[error("Seeding failed: {0}")]
    Store(#[from] DocumentStoreError),
}

impl SeedData {
    /// Parse seed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a seed file.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Io`] or [`SeedError::Parse`].
    pub async fn load(path: &Path) -> Result<Self, SeedError> {
        let display = path.display().to_string();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SeedError::Io { path: display.clone(), source })?;

        Self::from_json(&json).map_err(|source| SeedError::Parse { path: display, source })
    }
}

/// Insert a catalog into `store`, skipping documents that already exist.
///
/// # Errors
///
/// Returns the first store error other than a duplicate, e.g. an event
/// whose venue is unknown.
pub async fn seed_store(store: &dyn DocumentStore, data: SeedData) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    for location in data.locations {
        match store.insert_location(location).await {
            Ok(()) => report.locations_inserted += 1,
            Err(DocumentStoreError::Duplicate(id)) => {
                tracing::debug!(location = %id, "Location already present");
                report.skipped += 1;
            },
            Err(e) => return Err(e.into()),
        }
    }

    for event in data.events {
        match store.insert_event(event).await {
            Ok(()) => report.events_inserted += 1,
            Err(DocumentStoreError::Duplicate(id)) => {
                tracing::debug!(event = %id, "Event already present");
                report.skipped += 1;
            },
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(
        locations = report.locations_inserted,
        events = report.events_inserted,
        skipped = report.skipped,
        "Catalog seeded"
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code
mod tests {
    use super::*;
    use eventboard_core::domain::{EventId, LocationId};
    use eventboard_testing::{fixtures, InMemoryDocumentStore};

    const SEED: &str = r#"{
        "locations": [{"_id": "loc-a", "name": "Arena"}],
        "events": [
            {"_id": "e-1", "eventId": 7, "title": "Opening", "price": "$5", "venue": "loc-a"},
            {"_id": "e-2", "title": "Closing", "venue": "loc-a"}
        ]
    }"#;

    #[test]
    fn parses_api_field_names() {
        let data = SeedData::from_json(SEED).unwrap();

        assert_eq!(data.locations, vec![Location::new(LocationId::new("loc-a"), "Arena")]);
        assert_eq!(data.events.len(), 2);
        assert_eq!(data.events[0].event_id, Some(7));
        assert_eq!(data.events[1].price, "");
    }

    #[test]
    fn missing_sections_default_to_empty() {
        assert_eq!(SeedData::from_json("{}").unwrap(), SeedData::default());
    }

    #[tokio::test]
    async fn seeds_empty_store() {
        let store = InMemoryDocumentStore::new();

        let report = seed_store(&store, SeedData::from_json(SEED).unwrap()).await.unwrap();

        assert_eq!(
            report,
            SeedReport { locations_inserted: 1, events_inserted: 2, skipped: 0 }
        );
        let ids: Vec<EventId> = store.list_events().await.unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EventId::new("e-1"), EventId::new("e-2")]);
    }

    #[tokio::test]
    async fn reseeding_skips_existing_documents() {
        let store = InMemoryDocumentStore::with_catalog(fixtures::locations(), fixtures::events());
        let data = SeedData { locations: fixtures::locations(), events: fixtures::events() };

        let report = seed_store(&store, data).await.unwrap();

        assert_eq!(report.skipped, 7);
        assert_eq!(report.events_inserted, 0);
        assert_eq!(store.event_count().await, 4);
    }

    #[tokio::test]
    async fn dangling_venue_fails() {
        let store = InMemoryDocumentStore::new();
        let data = SeedData {
            locations: vec![],
            events: vec![EventRecord::new(EventId::new("x"), "Lost", LocationId::new("nowhere"))],
        };

        let error = seed_store(&store, data).await.unwrap_err();

        assert!(matches!(
            error,
            SeedError::Store(DocumentStoreError::LocationNotFound(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let error = SeedData::load(Path::new("/definitely/not/here.json")).await.unwrap_err();
        assert!(matches!(error, SeedError::Io { .. }));
    }

    #[tokio::test]
    async fn bundled_sample_catalog_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/catalog.json");
        let store = InMemoryDocumentStore::new();

        let data = SeedData::load(&path).await.unwrap();
        let report = seed_store(&store, data).await.unwrap();

        assert_eq!(report.skipped, 0);
        assert!(report.events_inserted > 0);
    }
}
