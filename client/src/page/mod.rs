//! The event list page as a reducer.
//!
//! State, actions and environment follow the usual split:
//!
//! - [`EventPageState`]: catalog, marks, filters, page cursor, toasts
//! - [`EventPageAction`]: intents (`SetCategory`, `ToggleBooking`, ..) and results
//! - [`EventPageEnvironment`]: [`EventsApi`](crate::api::EventsApi), session, clock
//! - [`EventPageReducer`]: the pure transition function
//!
//! Run it in an [`EventPageStore`] to have effects executed.

mod actions;
mod environment;
mod reducer;
mod store;
mod types;

pub use actions::EventPageAction;
pub use environment::EventPageEnvironment;
pub use reducer::EventPageReducer;
pub use store::{event_page_store, load, EventPageStore};
pub use types::{
    EventPageState, EventRow, Notification, NotificationLevel, BOOKED_MESSAGE,
    BOOKING_FAILED_MESSAGE, CANCELED_MESSAGE, NOTIFICATION_TTL,
};
