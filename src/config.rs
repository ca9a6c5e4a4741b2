use std::collections::HashSet;

use serde::Deserialize;

use crate::host_client::HostTarget;
use crate::uplink::DEFAULT_UPLINK_INTERFACE;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cluster: ClusterConfig,
    pub publishing: PublishingConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterConfig {
    /// Snapshot URLs, in merge order. The hostname of each is its namespace prefix.
    pub hosts: Vec<String>,
    #[serde(default = "default_uplink_interface")]
    pub uplink_interface: String,
    /// Fetch cadence; also the window bandwidth rates are normalised by.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

fn default_uplink_interface() -> String {
    DEFAULT_UPLINK_INTERFACE.to_string()
}

fn default_poll_interval_ms() -> u64 {
    5000
}

fn default_fetch_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishingConfig {
    /// Max number of topology snapshots kept in the broadcast channel for /ws/topology (slow clients may lag).
    pub broadcast_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// How often to log app stats (ws clients, cycles, reachable hosts) at INFO level.
    pub stats_log_interval_secs: u64,
}

impl ClusterConfig {
    /// Parsed host list. Duplicate hostnames are allowed but collide in the namespace.
    pub fn host_targets(&self) -> anyhow::Result<Vec<HostTarget>> {
        let targets = self
            .hosts
            .iter()
            .map(|h| HostTarget::parse(h))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        for target in &targets {
            if !seen.insert(target.id.clone()) {
                tracing::warn!(
                    host = %target.id,
                    url = %target.url,
                    "duplicate hostname in cluster.hosts; ids from these hosts will collide"
                );
            }
        }
        Ok(targets)
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.cluster.hosts.is_empty(),
            "cluster.hosts must list at least one host"
        );
        for host in &self.cluster.hosts {
            HostTarget::parse(host).map_err(|e| anyhow::anyhow!("cluster.hosts: {}", e))?;
        }
        anyhow::ensure!(
            !self.cluster.uplink_interface.is_empty(),
            "cluster.uplink_interface must be non-empty"
        );
        anyhow::ensure!(
            self.cluster.poll_interval_ms > 0,
            "cluster.poll_interval_ms must be > 0, got {}",
            self.cluster.poll_interval_ms
        );
        anyhow::ensure!(
            self.cluster.fetch_timeout_ms > 0,
            "cluster.fetch_timeout_ms must be > 0, got {}",
            self.cluster.fetch_timeout_ms
        );
        anyhow::ensure!(
            self.publishing.broadcast_capacity > 0,
            "publishing.broadcast_capacity must be > 0, got {}",
            self.publishing.broadcast_capacity
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        Ok(())
    }
}
