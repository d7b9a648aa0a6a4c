use super::models::{HealthCheck, NodeInfo};
use crate::common::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(healthz))
        .routes(routes!(get_node_info))
        .with_state(state.clone())
}

#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = OK, description = "Service and database are reachable", body = HealthCheck),
        (status = INTERNAL_SERVER_ERROR, description = "Database ping failed", body = HealthCheck)
    )
)]
pub async fn healthz(State(state): State<AppState>) -> (StatusCode, Json<HealthCheck>) {
    if let Err(err) = state.db.ping().await {
        tracing::warn!("Health check failed: {err}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthCheck {
                status: "error".to_string(),
            }),
        );
    }

    (
        StatusCode::OK,
        Json(HealthCheck {
            status: "ok".to_string(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/api/config",
    responses(
        (status = OK, description = "Node information", body = NodeInfo)
    )
)]
pub async fn get_node_info(State(state): State<AppState>) -> Json<NodeInfo> {
    Json(NodeInfo::from(&state.config))
}
