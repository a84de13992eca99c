//! Per-user like and booking marks.
//!
//! A mark set maps event identifiers to a boolean. Absent means "not
//! marked"; toggling always writes an explicit `true` or `false` and never
//! removes the key.

use crate::domain::{EventId, EventRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Which kind of mark a user can place on an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    /// "Like" (thumbs up)
    Like,
    /// Booking
    Booking,
}

impl MarkKind {
    /// Both kinds, in display order
    pub const ALL: [Self; 2] = [Self::Like, Self::Booking];

    /// Lowercase name, used in logs, metrics and storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Booking => "booking",
        }
    }

    /// REST collection segment (`/likes/...`, `/bookings/...`)
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Like => "likes",
            Self::Booking => "bookings",
        }
    }
}

impl fmt::Display for MarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "booking" => Ok(Self::Booking),
            other => Err(format!("unknown mark kind: {other}")),
        }
    }
}

/// Event id → marked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkSet(HashMap<EventId, bool>);

impl MarkSet {
    /// An empty set (nothing marked)
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Mark every event in a backend "marked events" response
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a EventRecord>) -> Self {
        events.into_iter().map(|event| event.id.clone()).collect()
    }

    /// Whether the event is marked
    #[must_use]
    pub fn is_marked(&self, id: &EventId) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Overwrite the mark for an event
    pub fn set(&mut self, id: EventId, marked: bool) {
        self.0.insert(id, marked);
    }

    /// Flip the mark for an event and return the new value.
    ///
    /// Toggling twice restores the original value.
    pub fn toggle(&mut self, id: &EventId) -> bool {
        let next = !self.is_marked(id);
        self.0.insert(id.clone(), next);
        next
    }

    /// Identifiers currently marked `true`
    pub fn marked_ids(&self) -> impl Iterator<Item = &EventId> {
        self.0
            .iter()
            .filter_map(|(id, marked)| marked.then_some(id))
    }

    /// Number of events currently marked `true`
    #[must_use]
    pub fn marked_count(&self) -> usize {
        self.0.values().filter(|marked| **marked).count()
    }
}

impl FromIterator<EventId> for MarkSet {
    fn from_iter<I: IntoIterator<Item = EventId>>(iter: I) -> Self {
        Self(iter.into_iter().map(|id| (id, true)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LocationId;
    use proptest::prelude::*;

    #[test]
    fn absent_is_not_marked() {
        let marks = MarkSet::new();
        assert!(!marks.is_marked(&EventId::new("x")));
        assert_eq!(marks.marked_count(), 0);
    }

    #[test]
    fn from_events_marks_each_record() {
        let events = [
            EventRecord::new(EventId::new("a"), "A", LocationId::new("l")),
            EventRecord::new(EventId::new("b"), "B", LocationId::new("l")),
        ];

        let marks = MarkSet::from_events(&events);

        assert!(marks.is_marked(&EventId::new("a")));
        assert!(marks.is_marked(&EventId::new("b")));
        assert_eq!(marks.marked_count(), 2);
    }

    #[test]
    fn toggle_writes_false_instead_of_removing() {
        let id = EventId::new("a");
        let mut marks: MarkSet = std::iter::once(id.clone()).collect();

        assert!(!marks.toggle(&id));
        assert!(!marks.is_marked(&id));
        assert_eq!(marks.0.get(&id), Some(&false));
        assert_eq!(marks.marked_ids().count(), 0);
    }

    #[test]
    fn mark_kind_names() {
        assert_eq!(MarkKind::Like.collection(), "likes");
        assert_eq!(MarkKind::Booking.collection(), "bookings");
        assert_eq!("booking".parse::<MarkKind>(), Ok(MarkKind::Booking));
        assert!("ticket".parse::<MarkKind>().is_err());
    }

    proptest! {
        #[test]
        fn toggle_twice_restores_original(initial in any::<Option<bool>>(), id in "[a-z0-9]{1,8}") {
            let id = EventId::new(id);
            let mut marks = MarkSet::new();
            if let Some(marked) = initial {
                marks.set(id.clone(), marked);
            }
            let before = marks.is_marked(&id);

            marks.toggle(&id);
            marks.toggle(&id);

            prop_assert_eq!(marks.is_marked(&id), before);
        }
    }
}
