use axum::{
    http::{header, Method, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::db::DbPool;
use crate::server::config::ServerConfig;
use crate::web::routes::*;

pub use crate::web::error::AppError;

pub mod error;
pub mod routes;

pub const WELCOME_TEXT: &str = "Welcome to the Aqua host inventory API!";

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
}

async fn home_page_handler() -> &'static str {
    info!("Endpoint hit: home page");
    WELCOME_TEXT
}

/// The timeout layer answers with an empty 408; give it the same JSON error
/// body as every other failure.
async fn request_timeout_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        warn!("Request exceeded its deadline and was cancelled.");
        return AppError::RequestTimeout("request did not complete in time".to_string())
            .into_response();
    }
    response
}

pub fn create_axum_router(db_pool: DbPool, config: &ServerConfig) -> Router {
    let request_timeout = Duration::from_secs(config.request_timeout_secs);
    let app_state = Arc::new(AppState { db_pool });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(home_page_handler))
        .nest("/host", host_routes::create_hosts_router())
        .nest("/container", container_routes::create_containers_router())
        .with_state(app_state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(map_response(request_timeout_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// The full HTTP application: the router behind a layer that strips a
/// trailing slash before routing, so `/host/` and `/host` are the same route.
pub fn app(db_pool: DbPool, config: &ServerConfig) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_axum_router(db_pool, config))
}
