//! `PostgreSQL` document store for Eventboard.
//!
//! Implements [`DocumentStore`] over three tables:
//!
//! - `locations`: venues, in insertion order
//! - `events`: event documents, `venue` references `locations`
//! - `marks`: one boolean per (kind, user, event)
//!
//! Toggles are a single `INSERT .. ON CONFLICT .. DO UPDATE` statement, so
//! concurrent toggles on the same mark serialize in the database.
//!
//! # Example
//!
//! ```no_run
//! use eventboard_postgres::PostgresDocumentStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PostgresDocumentStore::connect("postgres://localhost/eventboard", 10).await?;
//! store.migrate().await?;
//! # Ok(())
//! # }
//! ```

use eventboard_core::document_store::{DocumentStore, DocumentStoreError, StoreFuture};
use eventboard_core::domain::{EventId, EventRecord, Location, LocationId, UserId};
use eventboard_core::marks::MarkKind;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

/// Schema statements, run in order by [`PostgresDocumentStore::migrate`].
const MIGRATIONS: [&str; 4] = [
    r"
    CREATE TABLE IF NOT EXISTS locations (
        seq BIGSERIAL,
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS events (
        seq BIGSERIAL,
        id TEXT PRIMARY KEY,
        event_code BIGINT,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        date_time TEXT NOT NULL DEFAULT '',
        presenter TEXT NOT NULL DEFAULT '',
        price TEXT NOT NULL DEFAULT '',
        venue TEXT NOT NULL REFERENCES locations(id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS marks (
        kind TEXT NOT NULL,
        user_id TEXT NOT NULL,
        event_id TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
        marked BOOLEAN NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        PRIMARY KEY (kind, user_id, event_id)
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_marks_user ON marks(kind, user_id) WHERE marked",
];

const EVENT_COLUMNS: &str =
    "e.id, e.event_code, e.title, e.description, e.date_time, e.presenter, e.price, e.venue";

/// `SQLSTATE` for a foreign key violation
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// `SQLSTATE` for a unique violation
const UNIQUE_VIOLATION: &str = "23505";

/// `PostgreSQL`-backed [`DocumentStore`].
#[derive(Clone, Debug)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Connect with a pool of at most `max_connections`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::DatabaseError`] if the connection fails.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, DocumentStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(database_error)?;

        tracing::info!(max_connections, "Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create tables and indexes if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::DatabaseError`] if a statement fails.
    pub async fn migrate(&self) -> Result<(), DocumentStoreError> {
        for statement in MIGRATIONS {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(database_error)?;
        }
        tracing::info!(statements = MIGRATIONS.len(), "Schema migrated");
        Ok(())
    }
}

fn database_error(error: sqlx::Error) -> DocumentStoreError {
    DocumentStoreError::DatabaseError(error.to_string())
}

fn sqlstate(error: &sqlx::Error) -> Option<String> {
    error
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}

fn location_from_row(row: &PgRow) -> Result<Location, sqlx::Error> {
    Ok(Location {
        id: LocationId::new(row.try_get::<String, _>("id")?),
        name: row.try_get("name")?,
    })
}

fn event_from_row(row: &PgRow) -> Result<EventRecord, sqlx::Error> {
    let code: Option<i64> = row.try_get("event_code")?;
    Ok(EventRecord {
        id: EventId::new(row.try_get::<String, _>("id")?),
        event_id: code.and_then(|c| u64::try_from(c).ok()),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        date_time: row.try_get("date_time")?,
        presenter: row.try_get("presenter")?,
        price: row.try_get("price")?,
        venue: LocationId::new(row.try_get::<String, _>("venue")?),
    })
}

fn events_from_rows(rows: &[PgRow]) -> Result<Vec<EventRecord>, DocumentStoreError> {
    rows.iter()
        .map(event_from_row)
        .collect::<Result<_, _>>()
        .map_err(|e| DocumentStoreError::SerializationError(e.to_string()))
}

impl DocumentStore for PostgresDocumentStore {
    fn list_locations(&self) -> StoreFuture<'_, Vec<Location>> {
        Box::pin(async move {
            let rows = sqlx::query("SELECT id, name FROM locations ORDER BY seq")
                .fetch_all(&self.pool)
                .await
                .map_err(database_error)?;

            rows.iter()
                .map(location_from_row)
                .collect::<Result<_, _>>()
                .map_err(|e| DocumentStoreError::SerializationError(e.to_string()))
        })
    }

    fn list_events(&self) -> StoreFuture<'_, Vec<EventRecord>> {
        Box::pin(async move {
            let rows = sqlx::query(&format!("SELECT {EVENT_COLUMNS} FROM events e ORDER BY e.seq"))
                .fetch_all(&self.pool)
                .await
                .map_err(database_error)?;

            events_from_rows(&rows)
        })
    }

    fn find_event(&self, id: EventId) -> StoreFuture<'_, Option<EventRecord>> {
        Box::pin(async move {
            let row = sqlx::query(&format!("SELECT {EVENT_COLUMNS} FROM events e WHERE e.id = $1"))
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?;

            row.as_ref()
                .map(event_from_row)
                .transpose()
                .map_err(|e| DocumentStoreError::SerializationError(e.to_string()))
        })
    }

    fn marked_events(&self, kind: MarkKind, user: UserId) -> StoreFuture<'_, Vec<EventRecord>> {
        Box::pin(async move {
            let rows = sqlx::query(&format!(
                "SELECT {EVENT_COLUMNS} FROM events e
                 JOIN marks m ON m.event_id = e.id
                 WHERE m.kind = $1 AND m.user_id = $2 AND m.marked
                 ORDER BY e.seq"
            ))
            .bind(kind.as_str())
            .bind(user.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

            events_from_rows(&rows)
        })
    }

    fn toggle_mark(&self, kind: MarkKind, user: UserId, event: EventId) -> StoreFuture<'_, bool> {
        Box::pin(async move {
            let result = sqlx::query(
                r"
                INSERT INTO marks (kind, user_id, event_id, marked)
                VALUES ($1, $2, $3, TRUE)
                ON CONFLICT (kind, user_id, event_id)
                DO UPDATE SET marked = NOT marks.marked, updated_at = now()
                RETURNING marked
                ",
            )
            .bind(kind.as_str())
            .bind(user.as_str())
            .bind(event.as_str())
            .fetch_one(&self.pool)
            .await;

            match result {
                Ok(row) => {
                    let marked: bool = row.try_get("marked").map_err(database_error)?;
                    metrics::counter!("document_store.marks.toggled", "kind" => kind.as_str())
                        .increment(1);
                    Ok(marked)
                },
                Err(error) if sqlstate(&error).as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
                    Err(DocumentStoreError::EventNotFound(event))
                },
                Err(error) => {
                    tracing::warn!(kind = %kind, error = %error, "Toggle mark failed");
                    Err(database_error(error))
                },
            }
        })
    }

    fn insert_location(&self, location: Location) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let result = sqlx::query("INSERT INTO locations (id, name) VALUES ($1, $2)")
                .bind(location.id.as_str())
                .bind(&location.name)
                .execute(&self.pool)
                .await;

            match result {
                Ok(_) => Ok(()),
                Err(error) if sqlstate(&error).as_deref() == Some(UNIQUE_VIOLATION) => {
                    Err(DocumentStoreError::Duplicate(location.id.to_string()))
                },
                Err(error) => Err(database_error(error)),
            }
        })
    }

    fn insert_event(&self, event: EventRecord) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let code = event.event_id.and_then(|c| i64::try_from(c).ok());
            let result = sqlx::query(
                r"
                INSERT INTO events
                    (id, event_code, title, description, date_time, presenter, price, venue)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ",
            )
            .bind(event.id.as_str())
            .bind(code)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.date_time)
            .bind(&event.presenter)
            .bind(&event.price)
            .bind(event.venue.as_str())
            .execute(&self.pool)
            .await;

            match result {
                Ok(_) => Ok(()),
                Err(error) => match sqlstate(&error).as_deref() {
                    Some(UNIQUE_VIOLATION) => Err(DocumentStoreError::Duplicate(event.id.to_string())),
                    Some(FOREIGN_KEY_VIOLATION) => {
                        Err(DocumentStoreError::LocationNotFound(event.venue))
                    },
                    _ => Err(database_error(error)),
                },
            }
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map(|_| ())
                .map_err(database_error)
        })
    }
}
