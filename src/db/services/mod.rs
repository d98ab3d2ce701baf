//! Data access for the inventory tables.
//!
//! Every value that comes from a request is passed as a bound parameter;
//! no statement text is ever assembled from caller input. Lookups by id
//! report a missing row as `StorageError::NotFound`.

pub mod container_service;
pub mod host_service;

pub use container_service::*;
pub use host_service::*;
