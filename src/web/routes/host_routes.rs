use crate::db::{models::Host, services::host_service};
use crate::web::{AppError, AppState};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;

// --- Route Handlers ---

async fn list_hosts_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<Host>>, AppError> {
    let hosts = host_service::list_hosts(&app_state.db_pool).await?;
    Ok(Json(hosts))
}

async fn get_host_handler(
    State(app_state): State<Arc<AppState>>,
    WithRejection(Path(host_id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<Host>, AppError> {
    let host = host_service::get_host_by_id(&app_state.db_pool, host_id).await?;
    Ok(Json(host))
}

// --- Router ---

pub fn create_hosts_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_hosts_handler))
        .route("/{id}", get(get_host_handler))
}
