//! Dependencies injected into the event page reducer.

use crate::api::EventsApi;
use crate::session::Session;
use eventboard_core::environment::Clock;
use std::sync::Arc;

/// Event page environment.
#[derive(Clone)]
pub struct EventPageEnvironment {
    /// Backend
    pub api: Arc<dyn EventsApi>,
    /// Signed-in session; `None` makes every authenticated call fail
    pub session: Option<Session>,
    /// Timestamps for notifications
    pub clock: Arc<dyn Clock>,
}

impl EventPageEnvironment {
    /// Creates a new `EventPageEnvironment`
    #[must_use]
    pub fn new(api: Arc<dyn EventsApi>, session: Option<Session>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            session,
            clock,
        }
    }
}
