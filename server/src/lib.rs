//! # Eventboard Server
//!
//! Wires configuration, the document store and the REST router together.
//! The binary in `main.rs` adds tracing, signal handling and the listener.

use anyhow::Context;
use axum::Router;
use eventboard_core::document_store::DocumentStore;
use eventboard_postgres::PostgresDocumentStore;
use eventboard_testing::InMemoryDocumentStore;
use eventboard_web::{build_router, cors_layer, AppState, StaticSessions};
use std::sync::Arc;

pub mod config;
pub mod seed;

pub use config::{Config, DatabaseConfig};
pub use seed::{seed_store, SeedData, SeedError, SeedReport};

/// Open the configured document store.
///
/// Connects and migrates `PostgreSQL` when `DATABASE_URL` is set, otherwise
/// returns an empty in-memory store.
///
/// # Errors
///
/// Returns an error if the database is unreachable or migration fails.
pub async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match &config.database {
        Some(database) => {
            let store = PostgresDocumentStore::connect(&database.url, database.max_connections)
                .await
                .context("connecting to PostgreSQL")?;
            store.migrate().await.context("running migrations")?;
            Ok(Arc::new(store))
        },
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory document store");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        },
    }
}

/// Load `SEED_FILE` into `store` if one is configured.
///
/// # Errors
///
/// Returns [`SeedError`] if the file cannot be read or inserted.
pub async fn seed_if_configured(
    config: &Config,
    store: &dyn DocumentStore,
) -> Result<Option<SeedReport>, SeedError> {
    let Some(path) = &config.seed_file else {
        return Ok(None);
    };
    let data = SeedData::load(path).await?;
    seed_store(store, data).await.map(Some)
}

/// Build the application router over `store`.
///
/// # Errors
///
/// Returns an error if `CORS_ALLOWED_ORIGIN` is not a valid header value.
pub fn build_app(config: &Config, store: Arc<dyn DocumentStore>) -> anyhow::Result<Router> {
    let sessions = StaticSessions::parse(&config.auth_tokens);
    if sessions.is_empty() {
        tracing::warn!("AUTH_TOKENS is empty, every authenticated route will answer 401");
    } else {
        tracing::info!(sessions = sessions.len(), "Static sessions loaded");
    }

    let cors = cors_layer(&config.cors_allowed_origin)
        .with_context(|| format!("invalid CORS origin {:?}", config.cors_allowed_origin))?;

    Ok(build_router(AppState::new(store, Arc::new(sessions)), cors))
}
