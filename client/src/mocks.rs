//! In-process [`EventsApi`] for tests.
//!
//! Available to this crate's tests and, with the `test-utils` feature, to
//! other crates.

use crate::api::{ApiFuture, EventsApi};
use crate::error::ClientError;
use crate::session::Session;
use eventboard_core::domain::{EventId, EventRecord, Location, MarkToggled};
use eventboard_core::marks::MarkKind;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct MockData {
    locations: Vec<Location>,
    events: Vec<EventRecord>,
    marks: HashMap<(MarkKind, EventId), bool>,
    catalog_error: Option<ClientError>,
    marks_error: Option<ClientError>,
    toggle_error: Option<ClientError>,
    toggles: Vec<(MarkKind, EventId)>,
}

/// Mock backend for a single signed-in user.
///
/// Clones share state, so a test can keep a handle after moving one into
/// the page environment.
///
/// # Example
///
/// ```ignore
/// let api = MockEventsApi::new(fixtures::locations(), fixtures::events())
///     .with_marks(MarkKind::Like, ["evt-1"]);
/// api.fail_toggles(ClientError::Transport("offline".into()));
/// ```
#[derive(Clone, Default)]
pub struct MockEventsApi {
    data: Arc<Mutex<MockData>>,
}

impl MockEventsApi {
    /// A backend serving this catalog with nothing marked
    #[must_use]
    pub fn new(locations: Vec<Location>, events: Vec<EventRecord>) -> Self {
        Self {
            data: Arc::new(Mutex::new(MockData {
                locations,
                events,
                ..MockData::default()
            })),
        }
    }

    /// Pre-mark events for the user
    #[must_use]
    pub fn with_marks<I, S>(self, kind: MarkKind, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut data = self.lock();
            for id in ids {
                data.marks.insert((kind, EventId::new(id)), true);
            }
        }
        self
    }

    /// Make `locations` and `events` fail with `error`
    pub fn fail_catalog(&self, error: ClientError) {
        self.lock().catalog_error = Some(error);
    }

    /// Make the marked-events listings fail with `error`
    pub fn fail_marks(&self, error: ClientError) {
        self.lock().marks_error = Some(error);
    }

    /// Make every toggle fail with `error`
    pub fn fail_toggles(&self, error: ClientError) {
        self.lock().toggle_error = Some(error);
    }

    /// Stop injecting failures
    pub fn clear_failures(&self) {
        let mut data = self.lock();
        data.catalog_error = None;
        data.marks_error = None;
        data.toggle_error = None;
    }

    /// Every toggle request received, in order (failed ones included)
    #[must_use]
    pub fn toggle_calls(&self) -> Vec<(MarkKind, EventId)> {
        self.lock().toggles.clone()
    }

    /// Backend-side value of a mark
    #[must_use]
    pub fn is_marked(&self, kind: MarkKind, id: &EventId) -> bool {
        self.lock()
            .marks
            .get(&(kind, id.clone()))
            .copied()
            .unwrap_or(false)
    }

    fn lock(&self) -> MutexGuard<'_, MockData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventsApi for MockEventsApi {
    fn locations(&self) -> ApiFuture<'_, Vec<Location>> {
        let result = {
            let data = self.lock();
            data.catalog_error
                .clone()
                .map_or_else(|| Ok(data.locations.clone()), Err)
        };
        Box::pin(async move { result })
    }

    fn events(&self) -> ApiFuture<'_, Vec<EventRecord>> {
        let result = {
            let data = self.lock();
            data.catalog_error
                .clone()
                .map_or_else(|| Ok(data.events.clone()), Err)
        };
        Box::pin(async move { result })
    }

    fn marked_events<'a>(
        &'a self,
        kind: MarkKind,
        _session: &'a Session,
    ) -> ApiFuture<'a, Vec<EventRecord>> {
        let result = {
            let data = self.lock();
            match data.marks_error.clone() {
                Some(error) => Err(error),
                None => Ok(data
                    .events
                    .iter()
                    .filter(|e| data.marks.get(&(kind, e.id.clone())).copied().unwrap_or(false))
                    .cloned()
                    .collect()),
            }
        };
        Box::pin(async move { result })
    }

    fn toggle_mark<'a>(
        &'a self,
        kind: MarkKind,
        event_id: &'a EventId,
        _session: &'a Session,
    ) -> ApiFuture<'a, MarkToggled> {
        let result = {
            let mut data = self.lock();
            data.toggles.push((kind, event_id.clone()));

            if let Some(error) = data.toggle_error.clone() {
                Err(error)
            } else if data.events.iter().any(|e| &e.id == event_id) {
                let mark = data.marks.entry((kind, event_id.clone())).or_insert(false);
                *mark = !*mark;
                Ok(MarkToggled {
                    event_id: event_id.clone(),
                    marked: *mark,
                })
            } else {
                Err(ClientError::Api {
                    status: 404,
                    message: format!("Event with id {event_id} not found"),
                })
            }
        };
        Box::pin(async move { result })
    }
}
