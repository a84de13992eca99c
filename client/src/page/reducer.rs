//! Event page reducer.
//!
//! Fetches run as independent effects and settle in any order; each result
//! updates only its own slice of state. Toggles flip the local mark first,
//! then confirm or roll back when the backend answers.

use super::actions::EventPageAction;
use super::environment::EventPageEnvironment;
use super::types::{
    EventPageState, NotificationLevel, BOOKED_MESSAGE, BOOKING_FAILED_MESSAGE, CANCELED_MESSAGE,
    NOTIFICATION_TTL,
};
use crate::catalog::fetch_catalog;
use crate::error::ClientError;
use eventboard_core::domain::{EventId, EventRecord};
use eventboard_core::marks::{MarkKind, MarkSet};
use eventboard_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

type Effects = SmallVec<[Effect<EventPageAction>; 4]>;

/// Reducer for the event list page
#[derive(Clone, Debug, Default)]
pub struct EventPageReducer;

impl EventPageReducer {
    /// Creates a new `EventPageReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn fetch_catalog(env: &EventPageEnvironment) -> Effect<EventPageAction> {
        let api = env.api.clone();
        Effect::future(async move {
            Some(match fetch_catalog(api.as_ref()).await {
                Ok(events) => EventPageAction::CatalogLoaded { events },
                Err(error) => EventPageAction::CatalogFailed { error },
            })
        })
    }

    fn fetch_marks(env: &EventPageEnvironment, kind: MarkKind) -> Effect<EventPageAction> {
        let api = env.api.clone();
        let session = env.session.clone();
        Effect::future(async move {
            let result = match &session {
                Some(session) => api.marked_events(kind, session).await,
                None => Err(ClientError::Unauthenticated),
            };
            Some(match result {
                Ok(events) => EventPageAction::MarksLoaded { kind, events },
                Err(error) => EventPageAction::MarksFailed { kind, error },
            })
        })
    }

    fn send_toggle(
        env: &EventPageEnvironment,
        kind: MarkKind,
        event_id: EventId,
    ) -> Effect<EventPageAction> {
        let api = env.api.clone();
        let session = env.session.clone();
        Effect::future(async move {
            let result = match &session {
                Some(session) => api.toggle_mark(kind, &event_id, session).await,
                None => Err(ClientError::Unauthenticated),
            };
            Some(match result {
                Ok(toggled) => {
                    if toggled.event_id != event_id {
                        tracing::warn!(
                            requested = %event_id,
                            answered = %toggled.event_id,
                            "Toggle answered for a different event"
                        );
                    }
                    EventPageAction::MarkConfirmed {
                        kind,
                        event_id,
                        marked: toggled.marked,
                    }
                },
                Err(error) => EventPageAction::MarkRejected {
                    kind,
                    event_id,
                    error,
                },
            })
        })
    }

    /// Replace one mark list with a fetched one, keeping the optimistic value
    /// of any toggle still in flight.
    fn load_marks(state: &mut EventPageState, kind: MarkKind, events: &[EventRecord]) {
        let mut fresh = MarkSet::from_events(events);
        for id in state.pending_ids(kind) {
            fresh.set(id.clone(), state.marks(kind).is_marked(id));
        }
        *state.marks_mut(kind) = fresh;
        state.refilter();
    }

    fn toggle(
        state: &mut EventPageState,
        kind: MarkKind,
        event_id: EventId,
        env: &EventPageEnvironment,
    ) -> Effects {
        if state.is_pending(kind, &event_id) {
            tracing::debug!(kind = %kind, event_id = %event_id, "Toggle ignored: request in flight");
            return SmallVec::new();
        }

        let marked = state.marks_mut(kind).toggle(&event_id);
        state.begin_pending(kind, event_id.clone());
        state.refilter();
        tracing::debug!(kind = %kind, event_id = %event_id, marked, "Optimistic toggle");

        smallvec![Self::send_toggle(env, kind, event_id)]
    }

    fn notify(
        state: &mut EventPageState,
        env: &EventPageEnvironment,
        level: NotificationLevel,
        message: &str,
    ) -> Effects {
        let id = state.notify(level, message, env.clock.now());
        smallvec![Effect::Delay {
            duration: NOTIFICATION_TTL,
            action: Box::new(EventPageAction::DismissNotification { id }),
        }]
    }
}

impl Reducer for EventPageReducer {
    type State = EventPageState;
    type Action = EventPageAction;
    type Environment = EventPageEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            EventPageAction::Load => smallvec![
                Self::fetch_catalog(env),
                Self::fetch_marks(env, MarkKind::Like),
                Self::fetch_marks(env, MarkKind::Booking),
            ],

            EventPageAction::CatalogLoaded { events } => {
                tracing::info!(events = events.len(), "Catalog loaded");
                state.events = events;
                state.refilter();
                SmallVec::new()
            },

            EventPageAction::CatalogFailed { error } => {
                tracing::warn!(error = %error, "Failed to load events");
                SmallVec::new()
            },

            EventPageAction::MarksLoaded { kind, events } => {
                tracing::debug!(kind = %kind, marked = events.len(), "Marks loaded");
                Self::load_marks(state, kind, &events);
                SmallVec::new()
            },

            EventPageAction::MarksFailed { kind, error } => {
                tracing::warn!(kind = %kind, error = %error, "Failed to load marked events");
                SmallVec::new()
            },

            EventPageAction::SetCategory { category } => {
                state.criteria.category = category;
                state.refilter();
                SmallVec::new()
            },

            EventPageAction::SetPriceCeiling { ceiling } => {
                state.criteria.price_ceiling = ceiling;
                state.refilter();
                SmallVec::new()
            },

            EventPageAction::SetPage { page } => {
                state.pagination.set_page(page);
                state.pagination.clamp_to(state.filtered_count());
                SmallVec::new()
            },

            EventPageAction::SetPageSize { page_size } => {
                if let Err(error) = state.pagination.set_page_size(page_size) {
                    tracing::warn!(error = %error, "Page size ignored");
                }
                SmallVec::new()
            },

            EventPageAction::ToggleLike { event_id } => {
                Self::toggle(state, MarkKind::Like, event_id, env)
            },

            EventPageAction::ToggleBooking { event_id } => {
                Self::toggle(state, MarkKind::Booking, event_id, env)
            },

            EventPageAction::MarkConfirmed {
                kind,
                event_id,
                marked,
            } => {
                state.end_pending(kind, &event_id);
                state.marks_mut(kind).set(event_id, marked);
                state.refilter();

                match kind {
                    MarkKind::Like => SmallVec::new(),
                    MarkKind::Booking => {
                        let message = if marked { BOOKED_MESSAGE } else { CANCELED_MESSAGE };
                        Self::notify(state, env, NotificationLevel::Success, message)
                    },
                }
            },

            EventPageAction::MarkRejected {
                kind,
                event_id,
                error,
            } => {
                tracing::warn!(kind = %kind, event_id = %event_id, error = %error, "Toggle failed");

                if state.end_pending(kind, &event_id) {
                    state.marks_mut(kind).toggle(&event_id);
                    state.refilter();
                }

                match kind {
                    MarkKind::Like => SmallVec::new(),
                    MarkKind::Booking => {
                        Self::notify(state, env, NotificationLevel::Error, BOOKING_FAILED_MESSAGE)
                    },
                }
            },

            EventPageAction::DismissNotification { id } => {
                state.dismiss(id);
                SmallVec::new()
            },
        }
    }
}
