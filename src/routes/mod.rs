// HTTP + WebSocket publication of the fused topology

mod http;
mod ws;

use axum::{Router, routing::get};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

use crate::host_client::{HostClient, HostTarget};
use crate::models::TopologySnapshot;
use crate::poller::SharedTopology;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) topology_tx: broadcast::Sender<Arc<TopologySnapshot>>,
    pub(crate) latest: SharedTopology,
    pub(crate) hosts: Arc<[HostTarget]>,
    pub(crate) client: Arc<HostClient>,
    pub(crate) ws_connections: Arc<AtomicUsize>,
}

pub fn app(
    topology_tx: broadcast::Sender<Arc<TopologySnapshot>>,
    latest: SharedTopology,
    hosts: Arc<[HostTarget]>,
    client: Arc<HostClient>,
    ws_connections: Arc<AtomicUsize>,
) -> Router {
    let state = AppState {
        topology_tx,
        latest,
        hosts,
        client,
        ws_connections,
    };
    Router::new()
        .route("/", get(|| async { "clustermap: cluster topology aggregator" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/topology", get(http::topology_handler)) // GET /api/topology
        .route("/api/containers", get(http::containers_handler)) // GET /api/containers
        .route("/api/hosts", get(http::hosts_handler)) // GET /api/hosts
        .route(
            "/api/container/{host}/{container_id}",
            get(http::container_detail_handler),
        ) // GET /api/container/{host}/{container_id}
        .route("/ws/topology", get(ws::ws_topology)) // WS /ws/topology
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
