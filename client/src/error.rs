//! Error types for the Eventboard API client

use eventboard_core::domain::JoinError;
use thiserror::Error;

/// Errors that can occur when talking to the Eventboard backend
///
/// `Clone` so failures can travel inside page actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The call needs a bearer session and none was provided
    #[error("Not signed in")]
    Unauthenticated,

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The request never produced a response (connect, timeout, TLS)
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// `message` from the error body, or the raw body
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// An event references a location that does not exist
    #[error(transparent)]
    Join(#[from] JoinError),
}

impl ClientError {
    /// Whether the backend rejected the session (HTTP 401) or none was sent
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Api { status: 401, .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}
