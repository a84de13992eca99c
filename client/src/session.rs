//! Explicit bearer session.
//!
//! The token comes from an external sign-in flow and is handed to whatever
//! needs it; nothing here reads shared storage.

use std::fmt;

/// A signed-in user's bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    /// Wrap a bearer token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The raw token
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// `Authorization` header value
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let session = Session::new("s3cr3t");
        assert!(!format!("{session:?}").contains("s3cr3t"));
        assert_eq!(session.authorization(), "Bearer s3cr3t");
    }
}
