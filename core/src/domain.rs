//! Event, location and user types.
//!
//! Field names on the wire follow the document shape the backend has always
//! served (`_id`, `eventId`, `dateTime`, `venue`), so these types serialize
//! straight into the REST payloads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Marker text separating the presenter prefix from the presenter name.
pub const PRESENTED_BY: &str = "Presented by";

macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw document identifier
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the raw identifier
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

document_id!(
    /// Document identifier of an event (`_id`)
    EventId
);

document_id!(
    /// Document identifier of a location (`_id`)
    LocationId
);

document_id!(
    /// Identifier of an authenticated user
    UserId
);

/// A venue an event takes place at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Document identifier
    #[serde(rename = "_id")]
    pub id: LocationId,
    /// Human-readable venue name
    pub name: String,
}

impl Location {
    /// Creates a location
    #[must_use]
    pub fn new(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// An event document as stored and served by the backend.
///
/// `venue` is a foreign key into the location collection. All text fields
/// are free-form; `price` may hold any number of `$<digits>` tokens and the
/// free-admission marker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Document identifier
    #[serde(rename = "_id")]
    pub id: EventId,
    /// Numeric code shown in the "ID" column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<u64>,
    /// Display title
    pub title: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Free-text date and time
    #[serde(default)]
    pub date_time: String,
    /// `<prefix>Presented by<name>`
    #[serde(default)]
    pub presenter: String,
    /// Free-text price
    #[serde(default)]
    pub price: String,
    /// Location foreign key
    pub venue: LocationId,
}

impl EventRecord {
    /// Creates an event with empty free-text fields
    #[must_use]
    pub fn new(id: EventId, title: impl Into<String>, venue: LocationId) -> Self {
        Self {
            id,
            event_id: None,
            title: title.into(),
            description: String::new(),
            date_time: String::new(),
            presenter: String::new(),
            price: String::new(),
            venue,
        }
    }

    /// Sets the price text
    #[must_use]
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    /// Sets the presenter text
    #[must_use]
    pub fn with_presenter(mut self, presenter: impl Into<String>) -> Self {
        self.presenter = presenter.into();
        self
    }

    /// Sets the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the date/time text
    #[must_use]
    pub fn with_date_time(mut self, date_time: impl Into<String>) -> Self {
        self.date_time = date_time.into();
        self
    }

    /// Sets the numeric display code
    #[must_use]
    pub const fn with_code(mut self, code: u64) -> Self {
        self.event_id = Some(code);
        self
    }

    /// The presenter's name: the text between the first `"Presented by"` and
    /// the next one, if any.
    ///
    /// Returns `None` when the marker is absent.
    ///
    /// ```
    /// use eventboard_core::domain::{EventId, EventRecord, LocationId};
    ///
    /// let event = EventRecord::new(EventId::new("e"), "Talk", LocationId::new("l"))
    ///     .with_presenter("Science Club Presented by Dr. Chan");
    /// assert_eq!(event.presenter_name(), Some("Dr. Chan"));
    /// ```
    #[must_use]
    pub fn presenter_name(&self) -> Option<&str> {
        self.presenter.split(PRESENTED_BY).nth(1).map(str::trim)
    }
}

/// An event with its venue resolved to a display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    /// The underlying document
    pub record: EventRecord,
    /// Resolved location name
    pub venue_name: String,
}

impl EventView {
    /// Event document identifier
    #[must_use]
    pub const fn id(&self) -> &EventId {
        &self.record.id
    }
}

/// Result of toggling a like or booking on the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkToggled {
    /// The event whose mark changed
    pub event_id: EventId,
    /// Whether the mark is now set
    pub marked: bool,
}

/// Failure to attach venue names to events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// An event references a location that does not exist.
    #[error("event {event} references unknown location {venue}")]
    UnresolvedVenue {
        /// The event carrying the dangling key
        event: EventId,
        /// The key that did not resolve
        venue: LocationId,
    },
}

/// Resolve each event's venue key to the location's display name.
///
/// Order is preserved. A single unresolved key fails the whole join.
///
/// # Errors
///
/// Returns [`JoinError::UnresolvedVenue`] for the first event whose venue
/// key matches no location.
pub fn join_venues(
    events: Vec<EventRecord>,
    locations: &[Location],
) -> Result<Vec<EventView>, JoinError> {
    let names: HashMap<&LocationId, &str> = locations
        .iter()
        .map(|location| (&location.id, location.name.as_str()))
        .collect();

    events
        .into_iter()
        .map(|record| match names.get(&record.venue) {
            Some(name) => Ok(EventView {
                venue_name: (*name).to_string(),
                record,
            }),
            None => Err(JoinError::UnresolvedVenue {
                event: record.id.clone(),
                venue: record.venue.clone(),
            }),
        })
        .collect()
}
