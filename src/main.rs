use anyhow::Result;
use clustermap::*;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::time::Duration;
use tokio::sync::{RwLock, broadcast};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    let hosts: Arc<[host_client::HostTarget]> = app_config.cluster.host_targets()?.into();
    let client = Arc::new(
        host_client::HostClient::new(Duration::from_millis(app_config.cluster.fetch_timeout_ms))
            .map_err(|e| anyhow::anyhow!("http client: {}", e))?,
    );

    let (tx, _) = broadcast::channel(app_config.publishing.broadcast_capacity);
    let latest: poller::SharedTopology = Arc::new(RwLock::new(None));
    let ws_connections = Arc::new(AtomicUsize::new(0));
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let bandwidth =
        bandwidth::BandwidthEngine::new(Duration::from_millis(app_config.cluster.poll_interval_ms));
    let poller_handle = poller::spawn(
        poller::PollerDeps {
            source: client.clone(),
            hosts: hosts.clone(),
            pipeline: pipeline::Pipeline::new(
                app_config.cluster.uplink_interface.clone(),
                bandwidth,
            ),
            tx: tx.clone(),
            latest: latest.clone(),
            ws_connections: ws_connections.clone(),
            shutdown_rx,
        },
        poller::PollerConfig {
            poll_interval_ms: app_config.cluster.poll_interval_ms,
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
        },
    );
    tracing::info!(
        hosts = hosts.len(),
        poll_interval_ms = app_config.cluster.poll_interval_ms,
        uplink_interface = %app_config.cluster.uplink_interface,
        "poller started"
    );

    let app = routes::app(tx, latest, hosts, client, ws_connections);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
            let _ = poller_handle.await;
        }
    }

    Ok(())
}
