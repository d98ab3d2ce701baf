use crate::db::{DbPool, StorageError};
use tracing::{error, info};

const CREATE_HOSTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS hosts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    uuid TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    ip_address TEXT NOT NULL
)
"#;

// host_id is a plain column: containers may reference hosts that do not exist.
const CREATE_CONTAINERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS containers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    host_id INTEGER NOT NULL,
    image_name INTEGER NOT NULL
)
"#;

const CREATE_CONTAINERS_HOST_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_containers_host_id ON containers (host_id)";

/// Creates the `hosts` and `containers` tables. Safe to run against an
/// already initialized database.
pub async fn create_schema(pool: &DbPool) -> Result<(), StorageError> {
    info!("Creating database schema...");
    for statement in [
        CREATE_HOSTS_TABLE,
        CREATE_CONTAINERS_TABLE,
        CREATE_CONTAINERS_HOST_INDEX,
    ] {
        sqlx::query(statement).execute(pool).await.map_err(|e| {
            error!(error = %e, "Failed to create database schema.");
            StorageError::Unavailable(format!("schema creation failed: {e}"))
        })?;
    }
    info!("Database schema ready.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connect, IN_MEMORY};

    #[tokio::test]
    async fn test_create_schema_is_idempotent() {
        let pool = connect(IN_MEMORY).await.unwrap();
        create_schema(&pool).await.unwrap();
        create_schema(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('hosts', 'containers') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(
            tables,
            vec![("containers".to_string(),), ("hosts".to_string(),)]
        );
    }
}
