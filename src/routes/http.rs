// GET handlers: stats, version

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use super::AppState;
use crate::version::{NAME, VERSION};

#[derive(Deserialize)]
pub(super) struct StatsQuery {
    api_key: Option<String>,
}

/// GET /stats — one stats record per running container, in listing order.
/// 403 unless the api_key query parameter matches the configured key.
pub(super) async fn stats_handler(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Response {
    if query.api_key.as_deref() != Some(state.config.server.api_key.as_str()) {
        return (
            StatusCode::FORBIDDEN,
            axum::Json(serde_json::json!({"error": "Unauthorized. Invalid API key."})),
        )
            .into_response();
    }

    match state.docker_repo.collect_stats().await {
        Ok(stats) => axum::Json(stats).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, operation = "collect_stats", "stats collection failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}
