//! # Eventboard Testing
//!
//! Testing utilities and helpers for Eventboard.
//!
//! This crate provides:
//! - [`ReducerTest`]: fluent Given-When-Then reducer harness
//! - [`assertions`] and [`effects`]: effect inspection helpers
//! - [`FixedClock`]: deterministic time
//! - [`InMemoryDocumentStore`]: `DocumentStore` without a database
//! - [`fixtures`]: a small sample catalog
//!
//! ## Example
//!
//! ```
//! use eventboard_testing::{fixtures, InMemoryDocumentStore};
//! use eventboard_core::document_store::DocumentStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryDocumentStore::with_catalog(fixtures::locations(), fixtures::events());
//! assert_eq!(store.list_events().await?.len(), 4);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use eventboard_core::environment::Clock;

mod document_store;
pub mod fixtures;

pub use document_store::InMemoryDocumentStore;
pub use reducer_test::{assertions, effects, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use eventboard_testing::mocks::FixedClock;
    /// use eventboard_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }
}

pub use mocks::{test_clock, FixedClock};
