// WebSocket handler: pushes every published topology snapshot

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::broadcast;
use tokio::time::{Duration, timeout};

use super::AppState;
use crate::models::TopologySnapshot;
use crate::poller::SharedTopology;

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Decrements the topology connection count on drop (connect = +1, drop = -1).
struct WsTopologyGuard(Arc<AtomicUsize>);

impl Drop for WsTopologyGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, std::sync::atomic::Ordering::Relaxed);
    }
}

pub(super) async fn ws_topology(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let conn_count = state.ws_connections.clone();
    let (mut rx, latest) = attach(&state.topology_tx, &state.latest).await;
    ws.on_upgrade(move |socket| async move {
        if let Err(e) = stream_topology(socket, &mut rx, conn_count, latest).await {
            tracing::info!("Topology stream error: {}", e);
        }
    })
}

/// Subscribes before reading `latest`, so a snapshot published in between is still queued on
/// the receiver (it may then arrive through both; see `stream_topology`).
async fn attach(
    tx: &broadcast::Sender<Arc<TopologySnapshot>>,
    latest: &SharedTopology,
) -> (
    broadcast::Receiver<Arc<TopologySnapshot>>,
    Option<Arc<TopologySnapshot>>,
) {
    let rx = tx.subscribe();
    let current = latest.read().await.clone();
    (rx, current)
}

async fn send_text(socket: &mut WebSocket, json: String) -> bool {
    let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Text(json.into()))).await;
    matches!(r, Ok(Ok(())))
}

async fn stream_topology(
    mut socket: WebSocket,
    rx: &mut broadcast::Receiver<Arc<TopologySnapshot>>,
    conn_count: Arc<AtomicUsize>,
    latest: Option<Arc<TopologySnapshot>>,
) -> anyhow::Result<()> {
    conn_count.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    let _guard = WsTopologyGuard(conn_count);
    tracing::info!("Client connected to topology stream");

    // New clients get the current view right away instead of waiting a full cycle.
    if let Some(snapshot) = &latest
        && !send_text(&mut socket, serde_json::to_string(snapshot.as_ref())?).await
    {
        return Ok(());
    }

    let mut ping_interval = tokio::time::interval(WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(snapshot) => {
                        if latest.as_ref().is_some_and(|sent| Arc::ptr_eq(sent, &snapshot)) {
                            continue;
                        }
                        let json = serde_json::to_string(snapshot.as_ref())?;
                        if !send_text(&mut socket, json).await {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("WebSocket /ws/topology client lagged, skipped {} messages", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Ping(Bytes::new()))).await;
                if !matches!(r, Ok(Ok(()))) {
                    break;
                }
            }
        }
    }
    Ok(())
}
