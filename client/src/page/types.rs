//! Event page state and its derived view model.

use chrono::{DateTime, Utc};
use eventboard_core::domain::{EventId, EventView};
use eventboard_core::filter::{self, FilterCriteria};
use eventboard_core::marks::{MarkKind, MarkSet};
use eventboard_core::pagination::Pagination;
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;

/// Toast after a booking is confirmed
pub const BOOKED_MESSAGE: &str = "Event booked successfully!";

/// Toast after a booking is cancelled
pub const CANCELED_MESSAGE: &str = "Booking canceled successfully!";

/// Toast after a booking request fails
pub const BOOKING_FAILED_MESSAGE: &str = "Failed to book the event. Please try again.";

/// How long a toast stays up before it dismisses itself
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Toast severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Green toast
    Success,
    /// Red toast
    Error,
}

/// A transient user-facing message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Identifier used to dismiss it
    pub id: u64,
    /// Severity
    pub level: NotificationLevel,
    /// Text shown to the user
    pub message: String,
    /// When it was raised
    pub raised_at: DateTime<Utc>,
}

/// One rendered table row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRow {
    /// Document id, used for toggles
    pub id: EventId,
    /// "ID" column
    pub code: Option<u64>,
    /// "Title" column
    pub title: String,
    /// "Venue" column (resolved name)
    pub venue: String,
    /// "Description" column
    pub description: String,
    /// "Date/Time" column
    pub date_time: String,
    /// "Presenter" column: the name after "Presented by", blank otherwise
    pub presenter: String,
    /// "Price" column
    pub price: String,
    /// Like checkbox
    pub liked: bool,
    /// Whether the event is booked
    pub booked: bool,
    /// Book button label: `"Book"` or `"Cancel"`
    pub book_label: &'static str,
    /// Like checkbox disabled while a request is in flight
    pub like_pending: bool,
    /// Book button disabled while a request is in flight
    pub booking_pending: bool,
}

/// Everything the event page shows.
///
/// `visible` caches the positions of events passing the current filters and
/// is rebuilt by [`EventPageState::refilter`] whenever events, marks or
/// criteria change.
#[derive(Clone, Debug, Default)]
pub struct EventPageState {
    /// Full catalog with venue names resolved
    pub events: Vec<EventView>,
    /// The user's likes
    pub likes: MarkSet,
    /// The user's bookings
    pub bookings: MarkSet,
    /// Active filters
    pub criteria: FilterCriteria,
    /// Page cursor over the filtered list
    pub pagination: Pagination,
    /// Toasts currently shown
    pub notifications: Vec<Notification>,
    pending: HashSet<(MarkKind, EventId)>,
    visible: Vec<usize>,
    next_notification: u64,
}

impl EventPageState {
    /// An empty page (nothing fetched yet)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks of one kind
    #[must_use]
    pub const fn marks(&self, kind: MarkKind) -> &MarkSet {
        match kind {
            MarkKind::Like => &self.likes,
            MarkKind::Booking => &self.bookings,
        }
    }

    /// Marks of one kind, mutably
    pub fn marks_mut(&mut self, kind: MarkKind) -> &mut MarkSet {
        match kind {
            MarkKind::Like => &mut self.likes,
            MarkKind::Booking => &mut self.bookings,
        }
    }

    /// Whether a toggle for this (kind, event) is awaiting the backend
    #[must_use]
    pub fn is_pending(&self, kind: MarkKind, id: &EventId) -> bool {
        self.pending.contains(&(kind, id.clone()))
    }

    /// Number of toggles awaiting the backend
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn begin_pending(&mut self, kind: MarkKind, id: EventId) -> bool {
        self.pending.insert((kind, id))
    }

    pub(crate) fn end_pending(&mut self, kind: MarkKind, id: &EventId) -> bool {
        self.pending.remove(&(kind, id.clone()))
    }

    pub(crate) fn pending_ids(&self, kind: MarkKind) -> impl Iterator<Item = &EventId> {
        self.pending
            .iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, id)| id)
    }

    /// Number of events passing the filters; this is the pagination total
    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.visible.len()
    }

    /// Pages available for the filtered list
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.filtered_count())
    }

    /// Events on the current page, in catalog order
    pub fn page_events(&self) -> impl Iterator<Item = &EventView> {
        self.pagination
            .slice(&self.visible)
            .iter()
            .filter_map(|index| self.events.get(*index))
    }

    /// Rows on the current page
    #[must_use]
    pub fn rows(&self) -> Vec<EventRow> {
        self.page_events().map(|view| self.row(view)).collect()
    }

    fn row(&self, view: &EventView) -> EventRow {
        let record = &view.record;
        let booked = self.bookings.is_marked(&record.id);
        EventRow {
            id: record.id.clone(),
            code: record.event_id,
            title: record.title.clone(),
            venue: view.venue_name.clone(),
            description: record.description.clone(),
            date_time: record.date_time.clone(),
            presenter: record.presenter_name().unwrap_or_default().to_string(),
            price: record.price.clone(),
            liked: self.likes.is_marked(&record.id),
            booked,
            book_label: if booked { "Cancel" } else { "Book" },
            like_pending: self.is_pending(MarkKind::Like, &record.id),
            booking_pending: self.is_pending(MarkKind::Booking, &record.id),
        }
    }

    /// Rebuild the filtered list and pull the page back into range.
    pub fn refilter(&mut self) {
        self.visible = filter::apply_indices(&self.events, &self.likes, &self.bookings, &self.criteria);
        let total = self.visible.len();
        if self.pagination.clamp_to(total) {
            tracing::debug!(
                page = self.pagination.page(),
                filtered = total,
                "Clamped page to filtered list"
            );
        }
    }

    pub(crate) fn notify(
        &mut self,
        level: NotificationLevel,
        message: &str,
        raised_at: DateTime<Utc>,
    ) -> u64 {
        let id = self.next_notification;
        self.next_notification += 1;
        self.notifications.push(Notification {
            id,
            level,
            message: message.to_string(),
            raised_at,
        });
        id
    }

    pub(crate) fn dismiss(&mut self, id: u64) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventboard_core::domain::join_venues;
    use eventboard_core::filter::CategoryFilter;
    use eventboard_testing::fixtures;

    fn loaded() -> EventPageState {
        let mut state = EventPageState::new();
        state.events = join_venues(fixtures::events(), &fixtures::locations()).unwrap_or_default();
        state.refilter();
        state
    }

    #[test]
    fn rows_carry_every_column() {
        let mut state = loaded();
        state.bookings.set(EventId::new("evt-1"), true);
        state.refilter();

        let rows = state.rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].code, Some(1001));
        assert_eq!(rows[0].venue, "City Concert Hall");
        assert_eq!(rows[0].presenter, "City Philharmonic");
        assert_eq!(rows[0].book_label, "Cancel");
        assert_eq!(rows[2].presenter, "");
        assert_eq!(rows[2].book_label, "Book");
    }

    #[test]
    fn refilter_counts_filtered_events() {
        let mut state = loaded();
        state.likes.set(EventId::new("evt-3"), true);
        state.criteria.category = CategoryFilter::Liked;
        state.refilter();

        assert_eq!(state.filtered_count(), 1);
        assert_eq!(state.page_count(), 1);
        assert_eq!(state.rows()[0].title, "Chamber Works");
    }

    #[test]
    fn notifications_get_distinct_ids() {
        let mut state = EventPageState::new();
        let now = Utc::now();
        let first = state.notify(NotificationLevel::Success, BOOKED_MESSAGE, now);
        let second = state.notify(NotificationLevel::Error, BOOKING_FAILED_MESSAGE, now);

        assert_ne!(first, second);
        assert!(state.dismiss(first));
        assert!(!state.dismiss(first));
        assert_eq!(state.notifications.len(), 1);
    }
}
