//! Client configuration.

use crate::error::ClientError;
use std::time::Duration;

/// Backend base URL when `EVENTBOARD_API_URL` is unset
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Request timeout when `EVENTBOARD_API_TIMEOUT_SECS` is unset
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the backend lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Point at a specific backend with the default timeout
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from the process environment.
    ///
    /// - `EVENTBOARD_API_URL` (default `http://localhost:3000`)
    /// - `EVENTBOARD_API_TIMEOUT_SECS` (default 10)
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the timeout is not a whole number.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the timeout is not a whole number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("EVENTBOARD_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup("EVENTBOARD_API_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                ClientError::Config(format!("EVENTBOARD_API_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self::new(base_url).with_timeout(timeout))
    }
}
