// Polling scheduler (replaces the stats worker loop).
// Every tick fans out one fetch per host on its own task; settled fan-ins come back over a
// channel and are run through the pipeline one at a time, so fetches may overlap but cycles never do.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::join_all;
use tokio::sync::{RwLock, broadcast, mpsc};
use tokio::time::{Duration, Instant, interval};
use tracing::Instrument;

use crate::host_client::{HostTarget, SnapshotSource};
use crate::models::TopologySnapshot;
use crate::pipeline::{HostOutcome, Pipeline};

/// Latest published snapshot; `None` until the first cycle completes.
pub type SharedTopology = Arc<RwLock<Option<Arc<TopologySnapshot>>>>;

/// Rate limit for "no receivers" debug line.
const NO_RECEIVERS_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// Fan-ins waiting for the pipeline; a fan-out blocks on send when this many are queued.
const PENDING_CYCLES: usize = 4;

/// Collaborators and channels for the poller.
pub struct PollerDeps<S> {
    pub source: Arc<S>,
    pub hosts: Arc<[HostTarget]>,
    pub pipeline: Pipeline,
    pub tx: broadcast::Sender<Arc<TopologySnapshot>>,
    pub latest: SharedTopology,
    pub ws_connections: Arc<AtomicUsize>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

pub struct PollerConfig {
    pub poll_interval_ms: u64,
    /// How often to log app stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Fetches every host concurrently and waits for all of them to settle, success or not.
/// Outcomes keep the order of `hosts`.
pub async fn fetch_all<S: SnapshotSource>(source: &S, hosts: &[HostTarget]) -> Vec<HostOutcome> {
    join_all(hosts.iter().map(|target| async move {
        HostOutcome {
            target: target.clone(),
            result: source.fetch_snapshot(target).await,
        }
    }))
    .await
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, operation = "get_timestamp", "system time error");
            0
        })
}

/// Spawns the scheduler. The first cycle starts immediately.
///
/// On shutdown, fan-outs still in flight are left to finish; their results are dropped.
pub fn spawn<S: SnapshotSource>(
    deps: PollerDeps<S>,
    config: PollerConfig,
) -> tokio::task::JoinHandle<()> {
    let PollerDeps {
        source,
        hosts,
        mut pipeline,
        tx,
        latest,
        ws_connections,
        mut shutdown_rx,
    } = deps;
    let PollerConfig {
        poll_interval_ms,
        stats_log_interval_secs,
    } = config;

    let poller_span = tracing::span!(
        tracing::Level::DEBUG,
        "poller",
        poll_interval_ms,
        hosts = hosts.len()
    );

    tokio::spawn(
        async move {
            let mut tick = interval(Duration::from_millis(poll_interval_ms));
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
            stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            let (results_tx, mut results_rx) = mpsc::channel::<Vec<HostOutcome>>(PENDING_CYCLES);
            let mut cycles_completed: u64 = 0;
            let mut hosts_reachable = 0usize;
            let mut last_no_receivers_log: Option<Instant> = None;

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        let source = source.clone();
                        let hosts = hosts.clone();
                        let results_tx = results_tx.clone();
                        tokio::spawn(async move {
                            let outcomes = fetch_all(source.as_ref(), &hosts).await;
                            if results_tx.send(outcomes).await.is_err() {
                                tracing::debug!("poller gone; discarding fetch results");
                            }
                        });
                    }
                    Some(outcomes) = results_rx.recv() => {
                        let snapshot = Arc::new(pipeline.run_cycle(&outcomes, now_millis()));
                        hosts_reachable = snapshot.hosts.iter().filter(|h| h.reachable).count();
                        cycles_completed += 1;

                        *latest.write().await = Some(snapshot.clone());
                        if tx.send(snapshot).is_err() {
                            let should_log = last_no_receivers_log
                                .is_none_or(|t| t.elapsed() >= NO_RECEIVERS_LOG_INTERVAL);
                            if should_log {
                                tracing::debug!(
                                    operation = "broadcast_topology",
                                    "No active WebSocket clients; broadcast channel has no receivers"
                                );
                                last_no_receivers_log = Some(Instant::now());
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Poller shutting down");
                        break;
                    }
                    _ = stats_log_tick.tick() => {
                        tracing::info!(
                            ws_topology_clients = ws_connections.load(Ordering::Relaxed),
                            cycles_completed,
                            hosts_reachable,
                            hosts_configured = hosts.len(),
                            "app stats"
                        );
                    }
                }
            }
        }
        .instrument(poller_span),
    )
}
