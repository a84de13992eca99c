//! # Eventboard Core
//!
//! Domain types, reducer traits and the pure event-list pipeline for Eventboard.
//!
//! Everything in this crate is free of I/O. Side effects are *described* by
//! reducers as [`effect::Effect`] values and executed by the runtime crate.
//!
//! ## Core Concepts
//!
//! - **State**: Owned, cloneable view state for a feature (e.g. the event page)
//! - **Action**: Every input to a reducer (user intents and fetch/mutation results)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Domain
//!
//! - [`domain`]: events, locations, identifiers and the venue join
//! - [`marks`]: per-user like/booking membership sets
//! - [`filter`]: category and price-ceiling filtering
//! - [`pagination`]: page cursor and slicing
//! - [`document_store`]: the data-access abstraction the backend is written against
//!
//! ## Example
//!
//! ```
//! use eventboard_core::filter::{self, CategoryFilter, FilterCriteria, PriceCeiling};
//! use eventboard_core::domain::{EventId, EventRecord, LocationId};
//! use eventboard_core::marks::MarkSet;
//!
//! let events = vec![
//!     EventRecord::new(EventId::new("1"), "Gala", LocationId::new("hall")).with_price("$20"),
//!     EventRecord::new(EventId::new("2"), "Talk", LocationId::new("hall")).with_price("Free admission."),
//! ];
//! let criteria = FilterCriteria {
//!     category: CategoryFilter::All,
//!     price_ceiling: PriceCeiling::new(15.0),
//! };
//!
//! let visible = filter::apply(&events, &MarkSet::new(), &MarkSet::new(), &criteria);
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].id.as_str(), "2");
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

pub mod document_store;
pub mod domain;
pub mod filter;
pub mod marks;
pub mod pagination;

/// Reducer module - The core trait for view and business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all decision logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for EventPageReducer {
    ///     type State = EventPageState;
    ///     type Action = EventPageAction;
    ///     type Environment = EventPageEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut EventPageState,
    ///         action: EventPageAction,
    ///         env: &EventPageEnvironment,
    ///     ) -> SmallVec<[Effect<EventPageAction>; 4]> {
    ///         match action {
    ///             EventPageAction::SetPage { page } => {
    ///                 state.pagination.set_page(page);
    ///                 SmallVec::new()
    ///             }
    ///             _ => SmallVec::new(),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timeouts, debouncing)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Wrap an async computation as an effect
        pub fn future<F>(future: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(future))
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use eventboard_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let now = clock.now();
    /// assert!(now.timestamp() > 0);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
