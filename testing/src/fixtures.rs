//! Sample catalog shared by tests across the workspace.

use eventboard_core::domain::{EventId, EventRecord, Location, LocationId};

/// Concert hall, studio and a museum.
#[must_use]
pub fn locations() -> Vec<Location> {
    vec![
        Location::new(LocationId::new("loc-hall"), "City Concert Hall"),
        Location::new(LocationId::new("loc-studio"), "Black Box Studio"),
        Location::new(LocationId::new("loc-museum"), "Museum of History"),
    ]
}

/// Four events covering a single price, free admission, several prices,
/// and a price text without any amount.
#[must_use]
pub fn events() -> Vec<EventRecord> {
    vec![
        EventRecord::new(EventId::new("evt-1"), "Symphony Night", LocationId::new("loc-hall"))
            .with_code(1001)
            .with_price("$20")
            .with_date_time("Fri 12 Sep 2025 20:00")
            .with_presenter("Music Office Presented by City Philharmonic")
            .with_description("An evening of late Romantic repertoire."),
        EventRecord::new(EventId::new("evt-2"), "Gallery Talk", LocationId::new("loc-museum"))
            .with_code(1002)
            .with_price("Free admission.")
            .with_date_time("Sat 13 Sep 2025 15:00")
            .with_presenter("Presented by Museum of History"),
        EventRecord::new(EventId::new("evt-3"), "Chamber Works", LocationId::new("loc-studio"))
            .with_code(1003)
            .with_price("$10, $25")
            .with_date_time("Sun 14 Sep 2025 19:30"),
        EventRecord::new(EventId::new("evt-4"), "Open Rehearsal", LocationId::new("loc-hall"))
            .with_code(1004)
            .with_price("Tickets available at the door")
            .with_date_time("Mon 15 Sep 2025 10:00"),
    ]
}

/// `count` events at the concert hall priced `$0`..; useful for paging.
#[must_use]
pub fn numbered_events(count: usize) -> Vec<EventRecord> {
    (0..count)
        .map(|i| {
            EventRecord::new(
                EventId::new(format!("n-{i}")),
                format!("Event {i}"),
                LocationId::new("loc-hall"),
            )
            .with_price(format!("${i}"))
        })
        .collect()
}
