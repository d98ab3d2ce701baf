//! Storage layer: the shared SQLite pool, the schema, the seed fixture and
//! the per-entity data access services.

pub mod models;
pub mod schema;
pub mod seed;
pub mod services;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub type DbPool = SqlitePool;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    OperationFailed(sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StorageError::Conflict(db_err.message().to_string());
            }
        }
        StorageError::OperationFailed(err)
    }
}

pub const IN_MEMORY: &str = ":memory:";

/// Opens the process-wide pool for the database at `path`, creating the file
/// if it does not exist yet. `:memory:` opens a private in-memory database.
pub async fn connect(path: &str) -> Result<DbPool, StorageError> {
    let (options, pool_options) = if path == IN_MEMORY {
        // Every connection to `:memory:` is its own database, so pin a single
        // connection for the lifetime of the pool.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StorageError::Unavailable(format!("invalid SQLite URL: {e}")))?;
        let pool_options = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        (options, pool_options)
    } else {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool_options = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(5);
        (options, pool_options)
    };

    let pool = pool_options
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Unavailable(format!("failed to open database at {path}: {e}")))?;

    info!(path = %path, "Database pool opened.");
    Ok(pool)
}

/// Deletes the database file at `path` together with its WAL side files.
/// Missing files are not an error.
pub fn remove_database_files(path: &str) -> Result<(), StorageError> {
    if path == IN_MEMORY {
        return Ok(());
    }

    for candidate in [path.to_string(), format!("{path}-wal"), format!("{path}-shm")] {
        let file = Path::new(&candidate);
        if file.exists() {
            std::fs::remove_file(file).map_err(|e| {
                StorageError::Unavailable(format!("failed to remove {candidate}: {e}"))
            })?;
            warn!(file = %candidate, "Removed existing database file.");
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> DbPool {
    let pool = connect(IN_MEMORY).await.unwrap();
    schema::create_schema(&pool).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_database_persists_across_pools() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aqua.db");
        let path = path.to_str().unwrap();

        let pool = connect(path).await.unwrap();
        schema::create_schema(&pool).await.unwrap();
        services::insert_host(&pool, 7, "uuid-7", "Edge Host", "10.0.0.7")
            .await
            .unwrap();
        pool.close().await;

        let pool = connect(path).await.unwrap();
        let host = services::get_host_by_id(&pool, 7).await.unwrap();
        assert_eq!(host.name, "Edge Host");
        pool.close().await;
    }

    #[tokio::test]
    async fn test_remove_database_files_wipes_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aqua.db");
        let path = path.to_str().unwrap();

        let pool = connect(path).await.unwrap();
        schema::create_schema(&pool).await.unwrap();
        seed::seed_hosts(&pool).await.unwrap();
        pool.close().await;

        remove_database_files(path).unwrap();
        assert!(!Path::new(path).exists());

        let pool = connect(path).await.unwrap();
        schema::create_schema(&pool).await.unwrap();
        assert_eq!(services::count_hosts(&pool).await.unwrap(), 0);
        pool.close().await;
    }

    #[test]
    fn test_remove_missing_database_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-created.db");
        assert!(remove_database_files(path.to_str().unwrap()).is_ok());
        assert!(remove_database_files(IN_MEMORY).is_ok());
    }
}
