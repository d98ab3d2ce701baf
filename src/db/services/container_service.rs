use crate::db::models::{Container, NewContainer};
use crate::db::{DbPool, StorageError};
use tracing::{debug, warn};

/// Inserts a container and returns the stored row. The referenced host is
/// not checked.
pub async fn insert_container(
    pool: &DbPool,
    new_container: &NewContainer,
) -> Result<Container, StorageError> {
    debug!(
        container_id = ?new_container.id,
        host_id = new_container.host_id,
        "Inserting container record."
    );
    // A NULL id makes SQLite pick the next AUTOINCREMENT value.
    let container = sqlx::query_as::<_, Container>(
        "INSERT INTO containers (id, name, host_id, image_name) VALUES (?, ?, ?, ?) RETURNING id, host_id, name, image_name",
    )
    .bind(new_container.id)
    .bind(&new_container.name)
    .bind(new_container.host_id)
    .bind(new_container.image_name)
    .fetch_one(pool)
    .await
    .map_err(|e| match StorageError::from(e) {
        StorageError::Conflict(detail) => {
            warn!(container_id = ?new_container.id, detail = %detail, "Container insert rejected by a unique constraint.");
            match new_container.id {
                Some(id) => StorageError::Conflict(format!("Container with id {id} already exists")),
                None => StorageError::Conflict("Container already exists".to_string()),
            }
        }
        other => other,
    })?;
    Ok(container)
}

pub async fn list_containers(pool: &DbPool) -> Result<Vec<Container>, StorageError> {
    let containers = sqlx::query_as::<_, Container>(
        "SELECT id, host_id, name, image_name FROM containers ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(containers)
}

pub async fn get_container_by_id(
    pool: &DbPool,
    container_id: i64,
) -> Result<Container, StorageError> {
    sqlx::query_as::<_, Container>(
        "SELECT id, host_id, name, image_name FROM containers WHERE id = ?",
    )
    .bind(container_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StorageError::NotFound(format!("Container with id {container_id} not found")))
}

pub async fn list_containers_by_host_id(
    pool: &DbPool,
    host_id: i64,
) -> Result<Vec<Container>, StorageError> {
    let containers = sqlx::query_as::<_, Container>(
        "SELECT id, host_id, name, image_name FROM containers WHERE host_id = ? ORDER BY id ASC",
    )
    .bind(host_id)
    .fetch_all(pool)
    .await?;
    Ok(containers)
}
