//! Lyra Storage
//!
//! `SQLite` song catalog for the Lyra server.
//!
//! A single `songs` table holds one row per audio file the server hosts.
//! Rows are created by seeding from the music directory and read back by
//! the `/api/songs` endpoint.
//!
//! # Example
//!
//! ```rust,no_run
//! use lyra_storage::{create_pool, run_migrations, songs};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://lyra.db").await?;
//! run_migrations(&pool).await?;
//!
//! let report = songs::seed_from_dir(&pool, "./music".as_ref(), "/music").await?;
//! println!("Inserted {} songs", report.inserted);
//!
//! let all = songs::get_all(&pool).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod types;

// Vertical slices
pub mod songs;

pub use error::{Result, StorageError};
pub use types::{CreateSong, Song};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Creates the schema if it does not exist yet. Safe to call on every start.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://lyra.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create a migrated in-memory database
///
/// Uses a single connection: every `SQLite` memory connection is its own
/// database.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail
pub async fn create_memory_pool() -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}
