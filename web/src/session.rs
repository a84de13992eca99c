//! Bearer session verification.
//!
//! Login is handled elsewhere; the REST layer only needs to turn a bearer
//! token into a [`UserId`]. [`SessionVerifier`] is that seam.

use eventboard_core::domain::UserId;
use std::collections::HashMap;
use std::fmt;

/// Resolves a bearer token to the user it was issued for.
pub trait SessionVerifier: Send + Sync {
    /// The session's user, or `None` when the token is unknown or expired.
    fn verify(&self, token: &str) -> Option<UserId>;
}

/// A fixed token table, loaded from configuration.
///
/// # Example
///
/// ```
/// use eventboard_web::session::{SessionVerifier, StaticSessions};
///
/// let sessions = StaticSessions::parse("t0k3n=alice, other=bob");
/// assert_eq!(sessions.verify("t0k3n").map(|u| u.to_string()), Some("alice".into()));
/// assert!(sessions.verify("nope").is_none());
/// ```
#[derive(Clone, Default)]
pub struct StaticSessions {
    tokens: HashMap<String, UserId>,
}

impl StaticSessions {
    /// An empty table; every request is unauthenticated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse comma-separated `token=user` pairs.
    ///
    /// Malformed pairs and empty halves are skipped with a warning.
    #[must_use]
    pub fn parse(pairs: &str) -> Self {
        let mut sessions = Self::new();
        for pair in pairs.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match pair.split_once('=') {
                Some((token, user)) if !token.trim().is_empty() && !user.trim().is_empty() => {
                    sessions = sessions.with_token(token.trim(), UserId::new(user.trim()));
                },
                _ => tracing::warn!("Skipping malformed session entry"),
            }
        }
        sessions
    }

    /// Register a token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, user: UserId) -> Self {
        self.tokens.insert(token.into(), user);
        self
    }

    /// Number of known tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no tokens are known
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl SessionVerifier for StaticSessions {
    fn verify(&self, token: &str) -> Option<UserId> {
        self.tokens.get(token).cloned()
    }
}

// Tokens never reach logs.
impl fmt::Debug for StaticSessions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticSessions")
            .field("tokens", &self.tokens.len())
            .finish()
    }
}
