use crate::db::{
    models::{Container, NewContainer},
    services::container_service,
};
use crate::web::{AppError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;
use tracing::info;

// --- Route Handlers ---

async fn list_containers_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<Container>>, AppError> {
    let containers = container_service::list_containers(&app_state.db_pool).await?;
    Ok(Json(containers))
}

async fn get_container_handler(
    State(app_state): State<Arc<AppState>>,
    WithRejection(Path(container_id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<Container>, AppError> {
    let container = container_service::get_container_by_id(&app_state.db_pool, container_id).await?;
    Ok(Json(container))
}

async fn list_containers_by_host_handler(
    State(app_state): State<Arc<AppState>>,
    WithRejection(Path(host_id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<Vec<Container>>, AppError> {
    let containers =
        container_service::list_containers_by_host_id(&app_state.db_pool, host_id).await?;
    Ok(Json(containers))
}

async fn create_container_handler(
    State(app_state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<NewContainer>, AppError>,
) -> Result<(StatusCode, Json<Container>), AppError> {
    let container = container_service::insert_container(&app_state.db_pool, &payload).await?;
    info!(
        container_id = container.id,
        host_id = container.host_id,
        "Container created."
    );
    Ok((StatusCode::CREATED, Json(container)))
}

// --- Router ---

pub fn create_containers_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_containers_handler))
        .route("/create", post(create_container_handler))
        .route("/sort/{host_id}", get(list_containers_by_host_handler))
        .route("/{id}", get(get_container_handler))
}
