//! Catalog fetch: locations and events together, joined on venue.

use crate::api::EventsApi;
use crate::error::ClientError;
use eventboard_core::domain::{join_venues, EventView};

/// Fetch locations and events in parallel and resolve venue names.
///
/// # Errors
///
/// - the first failing fetch's error
/// - [`ClientError::Join`] if any event's venue is not a known location
pub async fn fetch_catalog(api: &dyn EventsApi) -> Result<Vec<EventView>, ClientError> {
    let (locations, events) = futures::try_join!(api.locations(), api.events())?;
    tracing::debug!(
        locations = locations.len(),
        events = events.len(),
        "Fetched catalog"
    );
    Ok(join_venues(events, &locations)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::mocks::MockEventsApi;
    use eventboard_core::domain::{EventId, EventRecord, JoinError, LocationId};
    use eventboard_testing::fixtures;

    #[tokio::test]
    async fn joins_venue_names_in_event_order() {
        let api = MockEventsApi::new(fixtures::locations(), fixtures::events());

        let views = fetch_catalog(&api).await.unwrap();

        let venues: Vec<&str> = views.iter().map(|v| v.venue_name.as_str()).collect();
        assert_eq!(
            venues,
            vec![
                "City Concert Hall",
                "Museum of History",
                "Black Box Studio",
                "City Concert Hall"
            ]
        );
    }

    #[tokio::test]
    async fn dangling_venue_fails_the_whole_catalog() {
        let mut events = fixtures::events();
        events.push(EventRecord::new(
            EventId::new("evt-x"),
            "Pop-up",
            LocationId::new("loc-gone"),
        ));
        let api = MockEventsApi::new(fixtures::locations(), events);

        let error = fetch_catalog(&api).await.unwrap_err();

        assert_eq!(
            error,
            ClientError::Join(JoinError::UnresolvedVenue {
                event: EventId::new("evt-x"),
                venue: LocationId::new("loc-gone"),
            })
        );
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let api = MockEventsApi::new(fixtures::locations(), fixtures::events());
        api.fail_catalog(ClientError::Transport("connection refused".into()));

        let error = fetch_catalog(&api).await.unwrap_err();
        assert!(matches!(error, ClientError::Transport(_)));
    }
}
