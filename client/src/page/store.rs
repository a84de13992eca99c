//! The event page wired into a runtime [`Store`].

use super::actions::EventPageAction;
use super::environment::EventPageEnvironment;
use super::reducer::EventPageReducer;
use super::types::EventPageState;
use eventboard_runtime::{Store, StoreError};
use std::time::Duration;

/// Event page store
pub type EventPageStore =
    Store<EventPageState, EventPageAction, EventPageEnvironment, EventPageReducer>;

/// A store for a freshly mounted page.
#[must_use]
pub fn event_page_store(env: EventPageEnvironment) -> EventPageStore {
    Store::new(EventPageState::new(), EventPageReducer::new(), env)
}

/// Dispatch `Load` and wait until every fetch has settled.
///
/// Each fetch result is applied before its effect completes, so the state is
/// fully updated when this returns. Fetch failures are not errors here; they
/// leave their slice of state untouched.
///
/// # Errors
///
/// - [`StoreError::ShutdownInProgress`]: the page was already torn down
/// - [`StoreError::Timeout`]: fetches did not settle in time
pub async fn load(store: &EventPageStore, timeout: Duration) -> Result<(), StoreError> {
    let mut handle = store.send(EventPageAction::Load).await?;
    handle.wait_with_timeout(timeout).await
}
