use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A machine that runs containers.
/// Corresponds to the `hosts` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Host {
    pub id: i64,
    pub uuid: String,
    pub name: String,
    pub ip_address: String,
}

/// A workload running on a host.
/// Corresponds to the `containers` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Container {
    pub id: i64,
    pub host_id: i64,
    pub name: String,
    pub image_name: i64, // numeric image reference, kept as stored
}

/// Fields accepted when creating a container. `id` is optional; when absent
/// the database assigns the next identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewContainer {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub host_id: i64,
    pub image_name: i64,
}
