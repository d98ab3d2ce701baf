use crate::db::models::Host;
use crate::db::{DbPool, StorageError};
use tracing::{debug, warn};

/// Inserts a host with a caller-chosen identifier.
pub async fn insert_host(
    pool: &DbPool,
    id: i64,
    uuid: &str,
    name: &str,
    ip_address: &str,
) -> Result<Host, StorageError> {
    debug!(host_id = id, uuid = %uuid, "Inserting host record.");
    let host = sqlx::query_as::<_, Host>(
        "INSERT INTO hosts (id, uuid, name, ip_address) VALUES (?, ?, ?, ?) RETURNING id, uuid, name, ip_address",
    )
    .bind(id)
    .bind(uuid)
    .bind(name)
    .bind(ip_address)
    .fetch_one(pool)
    .await
    .map_err(|e| match StorageError::from(e) {
        StorageError::Conflict(detail) => {
            warn!(host_id = id, uuid = %uuid, detail = %detail, "Host insert rejected by a unique constraint.");
            StorageError::Conflict(format!("Host with id {id} or uuid {uuid} already exists"))
        }
        other => other,
    })?;
    Ok(host)
}

pub async fn list_hosts(pool: &DbPool) -> Result<Vec<Host>, StorageError> {
    let hosts = sqlx::query_as::<_, Host>(
        "SELECT id, uuid, name, ip_address FROM hosts ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(hosts)
}

pub async fn get_host_by_id(pool: &DbPool, host_id: i64) -> Result<Host, StorageError> {
    sqlx::query_as::<_, Host>("SELECT id, uuid, name, ip_address FROM hosts WHERE id = ?")
        .bind(host_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StorageError::NotFound(format!("Host with id {host_id} not found")))
}

pub async fn count_hosts(pool: &DbPool) -> Result<i64, StorageError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM hosts")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
