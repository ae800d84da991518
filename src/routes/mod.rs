// HTTP routes for the stats API

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::docker_repo::DockerRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) docker_repo: Arc<DockerRepo>,
    pub(crate) config: AppConfig,
}

pub fn app(docker_repo: Arc<DockerRepo>, config: AppConfig) -> Router {
    let state = AppState {
        docker_repo,
        config,
    };
    Router::new()
        .route("/stats", get(http::stats_handler)) // GET /stats?api_key=...
        .route("/version", get(http::version_handler)) // GET /version
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
