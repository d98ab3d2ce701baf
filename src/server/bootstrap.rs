use crate::db::{self, schema, seed, DbPool, StorageError};
use crate::server::config::ServerConfig;
use tracing::info;

/// Opens the database described by `config` and brings it to a servable
/// state: optionally wiped, schema created, seed hosts present.
pub async fn prepare_database(config: &ServerConfig) -> Result<DbPool, StorageError> {
    if config.recreate_database {
        info!(path = %config.database_path, "Recreating database.");
        db::remove_database_files(&config.database_path)?;
    }

    let pool = db::connect(&config.database_path).await?;
    schema::create_schema(&pool).await?;
    if seed::seed_if_empty(&pool).await? {
        info!(count = seed::SEED_HOSTS.len(), "Seed hosts inserted.");
    }
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::NewContainer;
    use crate::db::services::{count_hosts, insert_container, list_containers};

    fn file_config(dir: &tempfile::TempDir, recreate_database: bool) -> ServerConfig {
        ServerConfig {
            database_path: dir.path().join("aqua.db").to_str().unwrap().to_string(),
            recreate_database,
            ..ServerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_restart_keeps_rows_by_default() {
        let dir = tempfile::tempdir().unwrap();

        let pool = prepare_database(&file_config(&dir, false)).await.unwrap();
        insert_container(
            &pool,
            &NewContainer {
                id: Some(1),
                name: "web".to_string(),
                host_id: 1,
                image_name: 10,
            },
        )
        .await
        .unwrap();
        pool.close().await;

        let pool = prepare_database(&file_config(&dir, false)).await.unwrap();
        assert_eq!(count_hosts(&pool).await.unwrap(), 4);
        assert_eq!(list_containers(&pool).await.unwrap().len(), 1);
        pool.close().await;
    }

    #[tokio::test]
    async fn test_recreate_resets_to_seed_rows() {
        let dir = tempfile::tempdir().unwrap();

        let pool = prepare_database(&file_config(&dir, false)).await.unwrap();
        insert_container(
            &pool,
            &NewContainer {
                id: None,
                name: "web".to_string(),
                host_id: 2,
                image_name: 3,
            },
        )
        .await
        .unwrap();
        pool.close().await;

        let pool = prepare_database(&file_config(&dir, true)).await.unwrap();
        assert_eq!(count_hosts(&pool).await.unwrap(), 4);
        assert!(list_containers(&pool).await.unwrap().is_empty());
        pool.close().await;
    }
}
