//! Configuration management for the Eventboard server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unparseable numbers fall back to their default.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Host to bind to (`HOST`, default `0.0.0.0`)
    pub host: String,
    /// Port to bind to (`PORT`, default 3000)
    pub port: u16,
    /// Graceful shutdown timeout (`SHUTDOWN_TIMEOUT` seconds, default 30)
    pub shutdown_timeout: Duration,
    /// `PostgreSQL` settings; `None` runs on the in-memory store
    pub database: Option<DatabaseConfig>,
    /// JSON catalog loaded at startup (`SEED_FILE`)
    pub seed_file: Option<PathBuf>,
    /// Comma-separated `token=user` pairs (`AUTH_TOKENS`)
    pub auth_tokens: String,
    /// Origin allowed by CORS (`CORS_ALLOWED_ORIGIN`)
    pub cors_allowed_origin: String,
}

/// `PostgreSQL` configuration
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Connection URL (`DATABASE_URL`)
    pub url: String,
    /// Maximum number of connections in the pool (`DATABASE_MAX_CONNECTIONS`, default 10)
    pub max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: non_empty("PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            shutdown_timeout: Duration::from_secs(
                non_empty("SHUTDOWN_TIMEOUT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            database: non_empty("DATABASE_URL").map(|url| DatabaseConfig {
                url,
                max_connections: non_empty("DATABASE_MAX_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            }),
            seed_file: non_empty("SEED_FILE").map(PathBuf::from),
            auth_tokens: lookup("AUTH_TOKENS").unwrap_or_default(),
            cors_allowed_origin: non_empty("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|| "http://localhost:5173".to_string()),
        }
    }

    /// `host:port` to bind
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("shutdown_timeout", &self.shutdown_timeout)
            .field("database", &self.database.as_ref().map(|d| d.max_connections))
            .field("seed_file", &self.seed_file)
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        Config::from_lookup(|key| map.get(key).map(|v| (*v).to_string()))
    }

    #[test]
    fn defaults() {
        let config = config(&[]);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.shutdown_timeout, Duration::from_secs(30));
        assert!(config.database.is_none());
        assert!(config.seed_file.is_none());
        assert_eq!(config.auth_tokens, "");
        assert_eq!(config.cors_allowed_origin, "http://localhost:5173");
    }

    #[test]
    fn reads_every_variable() {
        let config = config(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("SHUTDOWN_TIMEOUT", "5"),
            ("DATABASE_URL", "postgres://u:p@db/eventboard"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("SEED_FILE", "data/seed.json"),
            ("AUTH_TOKENS", "a=alice"),
            ("CORS_ALLOWED_ORIGIN", "https://events.example.org"),
        ]);

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.shutdown_timeout, Duration::from_secs(5));
        let database = config.database.as_ref().map(|d| (d.url.as_str(), d.max_connections));
        assert_eq!(database, Some(("postgres://u:p@db/eventboard", 4)));
        assert_eq!(config.seed_file, Some(PathBuf::from("data/seed.json")));
        assert_eq!(config.auth_tokens, "a=alice");
        assert_eq!(config.cors_allowed_origin, "https://events.example.org");
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = config(&[("PORT", "eighty"), ("DATABASE_URL", "postgres://db"), ("DATABASE_MAX_CONNECTIONS", "-1")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.database.map(|d| d.max_connections), Some(10));
    }

    #[test]
    fn debug_hides_credentials() {
        let config = config(&[("DATABASE_URL", "postgres://u:hunter2@db"), ("AUTH_TOKENS", "tok=alice")]);
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("tok"));
    }
}
