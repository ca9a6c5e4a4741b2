// GET handlers: version, topology, containers, hosts, container detail

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use super::AppState;
use crate::models::{ContainerDetail, ContainerUsage};

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn not_ready() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "error": "topology not collected yet" })),
    )
        .into_response()
}

/// GET /api/topology — the latest published snapshot.
pub(super) async fn topology_handler(State(state): State<AppState>) -> Response {
    match state.latest.read().await.as_ref() {
        Some(snapshot) => Json(snapshot.as_ref()).into_response(),
        None => not_ready(),
    }
}

/// GET /api/containers — container rows of the latest snapshot.
pub(super) async fn containers_handler(State(state): State<AppState>) -> Response {
    match state.latest.read().await.as_ref() {
        Some(snapshot) => Json(&snapshot.containers).into_response(),
        None => not_ready(),
    }
}

/// GET /api/hosts — reachability of each configured host in the latest cycle.
pub(super) async fn hosts_handler(State(state): State<AppState>) -> Response {
    match state.latest.read().await.as_ref() {
        Some(snapshot) => Json(&snapshot.hosts).into_response(),
        None => not_ready(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainerDetailResponse {
    #[serde(rename = "containerID")]
    container_id: String,
    host_identifier: String,
    usage: ContainerUsage,
    #[serde(flatten)]
    detail: ContainerDetail,
}

/// GET /api/container/{host}/{container_id} — proxied on-demand detail; no retry.
pub(super) async fn container_detail_handler(
    State(state): State<AppState>,
    Path((host, container_id)): Path<(String, String)>,
) -> Response {
    let Some(target) = state.hosts.iter().find(|t| t.id.as_str() == host) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Host not found" })),
        )
            .into_response();
    };

    match state
        .client
        .fetch_container_detail(target, &container_id)
        .await
    {
        Ok(detail) => Json(ContainerDetailResponse {
            container_id,
            host_identifier: host,
            usage: ContainerUsage::from_stats(&detail.stats),
            detail,
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(
                host = %target.id,
                container_id = %container_id,
                error = %e,
                "container detail fetch failed"
            );
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "Failed to fetch container details" })),
            )
                .into_response()
        }
    }
}
