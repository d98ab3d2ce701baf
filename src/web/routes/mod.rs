pub mod container_routes;
pub mod host_routes;
