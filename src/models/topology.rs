// Published cluster view (one per completed cycle)

use serde::{Deserialize, Serialize};

use super::{ContainerSummary, Edge, Node};

/// Reachability of one configured host during the last cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostStatus {
    pub host_identifier: String,
    pub url: String,
    pub reachable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Immutable hand-off to renderers and the container table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologySnapshot {
    /// Unix millis at which the cycle finished.
    pub timestamp: u64,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub containers: Vec<ContainerSummary>,
    pub hosts: Vec<HostStatus>,
}
