//! # Eventboard Client
//!
//! Talks to the Eventboard REST backend and drives the event list page.
//!
//! - [`api`]: the [`EventsApi`] trait and the reqwest-backed [`HttpEventsApi`]
//! - [`catalog`]: parallel locations + events fetch with venue resolution
//! - [`page`]: the event page reducer (fetch, filter, paginate, like, book)
//! - [`session`]: the bearer session passed explicitly into every call
//!
//! ## Example
//!
//! ```no_run
//! use eventboard_client::{page, ClientConfig, HttpEventsApi, Session};
//! use eventboard_core::environment::SystemClock;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = HttpEventsApi::new(&ClientConfig::from_env()?)?;
//! let env = page::EventPageEnvironment::new(
//!     Arc::new(api),
//!     Some(Session::new("token-from-sign-in")),
//!     Arc::new(SystemClock),
//! );
//!
//! let store = page::event_page_store(env);
//! page::load(&store, Duration::from_secs(10)).await?;
//!
//! for row in store.state(page::EventPageState::rows).await {
//!     println!("{} | {} | {} | {}", row.title, row.venue, row.price, row.book_label);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod page;
pub mod session;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use api::{ApiFuture, EventsApi, HttpEventsApi};
pub use config::ClientConfig;
pub use error::ClientError;
pub use session::Session;
