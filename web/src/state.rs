//! Application state for Axum handlers.

use crate::session::SessionVerifier;
use axum::extract::FromRef;
use eventboard_core::document_store::DocumentStore;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; both fields are `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// Document store holding locations, events and marks
    pub store: Arc<dyn DocumentStore>,

    /// Bearer token verification for the mark endpoints
    pub sessions: Arc<dyn SessionVerifier>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, sessions: Arc<dyn SessionVerifier>) -> Self {
        Self { store, sessions }
    }
}

// Lets `AuthenticatedUser` pull the verifier out of any state that holds one.
impl FromRef<AppState> for Arc<dyn SessionVerifier> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}
