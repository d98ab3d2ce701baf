use crate::db::services::{count_hosts, insert_host};
use crate::db::{DbPool, StorageError};
use tracing::info;

pub struct SeedHost {
    pub id: i64,
    pub uuid: &'static str,
    pub name: &'static str,
    pub ip_address: &'static str,
}

pub const SEED_HOSTS: [SeedHost; 4] = [
    SeedHost {
        id: 1,
        uuid: "4e9edc48-2869-4172-903d-65008fd2895e",
        name: "AWS Host",
        ip_address: "1.2.3.4",
    },
    SeedHost {
        id: 2,
        uuid: "f89cda2e-628a-4f6e-b1d8-1ecf389e2454",
        name: "Azure Host",
        ip_address: "4.5.6.7",
    },
    SeedHost {
        id: 3,
        uuid: "863d9084-935e-4c71-990d-3a7dad113097",
        name: "GCP Host",
        ip_address: "7.8.9.0",
    },
    SeedHost {
        id: 4,
        uuid: "86d33421-8945-4a50-bcf6-fd3750e51942",
        name: "IBM Host",
        ip_address: "4.5.6.7",
    },
];

/// Inserts the fixed host fixture.
pub async fn seed_hosts(pool: &DbPool) -> Result<(), StorageError> {
    for host in &SEED_HOSTS {
        insert_host(pool, host.id, host.uuid, host.name, host.ip_address).await?;
        info!(host_id = host.id, name = host.name, "Seeded host.");
    }
    Ok(())
}

/// Seeds the host fixture only when the `hosts` table is empty, so a
/// persisted database keeps whatever it already holds. Returns whether rows
/// were inserted.
pub async fn seed_if_empty(pool: &DbPool) -> Result<bool, StorageError> {
    let existing = count_hosts(pool).await?;
    if existing > 0 {
        info!(existing, "Hosts already present, skipping seed data.");
        return Ok(false);
    }
    seed_hosts(pool).await?;
    Ok(true)
}
