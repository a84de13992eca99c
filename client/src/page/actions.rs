//! Everything that can happen on the event page.

use crate::error::ClientError;
use eventboard_core::domain::{EventId, EventRecord, EventView};
use eventboard_core::filter::{CategoryFilter, PriceCeiling};
use eventboard_core::marks::MarkKind;

/// Event page actions: user intents plus fetch and mutation results.
#[derive(Clone, Debug, PartialEq)]
pub enum EventPageAction {
    /// Page mounted: fetch the catalog and both mark lists
    Load,

    /// Locations and events arrived and joined
    CatalogLoaded {
        /// Events with venue names
        events: Vec<EventView>,
    },

    /// Catalog fetch or join failed
    CatalogFailed {
        /// Cause
        error: ClientError,
    },

    /// The user's marked events arrived
    MarksLoaded {
        /// Which list
        kind: MarkKind,
        /// Events marked `true`
        events: Vec<EventRecord>,
    },

    /// A marked-events fetch failed
    MarksFailed {
        /// Which list
        kind: MarkKind,
        /// Cause
        error: ClientError,
    },

    /// Category selector changed
    SetCategory {
        /// New category
        category: CategoryFilter,
    },

    /// Price input changed; `None` clears the ceiling
    SetPriceCeiling {
        /// New ceiling
        ceiling: Option<PriceCeiling>,
    },

    /// Pager moved
    SetPage {
        /// Zero-based page
        page: usize,
    },

    /// Rows-per-page selector changed
    SetPageSize {
        /// One of the offered sizes
        page_size: usize,
    },

    /// Like checkbox clicked
    ToggleLike {
        /// Event to flip
        event_id: EventId,
    },

    /// Book/Cancel button clicked
    ToggleBooking {
        /// Event to flip
        event_id: EventId,
    },

    /// Backend applied a toggle
    MarkConfirmed {
        /// Which mark
        kind: MarkKind,
        /// Event whose mark changed
        event_id: EventId,
        /// Value the backend now holds
        marked: bool,
    },

    /// Backend refused or never received a toggle
    MarkRejected {
        /// Which mark
        kind: MarkKind,
        /// Event whose flip is reverted
        event_id: EventId,
        /// Cause
        error: ClientError,
    },

    /// Toast closed, by the user or its timer
    DismissNotification {
        /// Notification id
        id: u64,
    },
}

impl EventPageAction {
    /// Toggle intent for a mark kind
    #[must_use]
    pub fn toggle(kind: MarkKind, event_id: EventId) -> Self {
        match kind {
            MarkKind::Like => Self::ToggleLike { event_id },
            MarkKind::Booking => Self::ToggleBooking { event_id },
        }
    }

    /// Whether this action settles a toggle (confirmed or rejected)
    #[must_use]
    pub const fn is_mark_settled(&self) -> bool {
        matches!(self, Self::MarkConfirmed { .. } | Self::MarkRejected { .. })
    }
}
