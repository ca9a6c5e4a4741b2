// One polling cycle after fan-in: merge, synthesize uplinks, prune, display, bandwidth.
// Runs synchronously; the scheduler never executes two cycles at once.

use tracing::{debug, warn};

use crate::bandwidth::BandwidthEngine;
use crate::host_client::{FetchError, HostTarget};
use crate::merge::MergedGraph;
use crate::models::{HostStatus, RawSnapshot, TopologySnapshot};
use crate::surface::LiveTopology;
use crate::uplink;

/// Settled result of one host fetch.
#[derive(Debug)]
pub struct HostOutcome {
    pub target: HostTarget,
    pub result: Result<RawSnapshot, FetchError>,
}

/// Cross-cycle state of the aggregator: the displayed graph and the bandwidth counters.
#[derive(Debug)]
pub struct Pipeline {
    uplink_interface: String,
    surface: LiveTopology,
    bandwidth: BandwidthEngine,
}

impl Pipeline {
    pub fn new(uplink_interface: impl Into<String>, bandwidth: BandwidthEngine) -> Self {
        Self {
            uplink_interface: uplink_interface.into(),
            surface: LiveTopology::new(),
            bandwidth,
        }
    }

    pub fn surface(&self) -> &LiveTopology {
        &self.surface
    }

    /// Fuses the settled outcomes (in configured host order) and returns what to publish.
    pub fn run_cycle(&mut self, outcomes: &[HostOutcome], timestamp: u64) -> TopologySnapshot {
        let mut graph = MergedGraph::default();
        let mut hosts = Vec::with_capacity(outcomes.len());

        for outcome in outcomes {
            let target = &outcome.target;
            match &outcome.result {
                Ok(snapshot) => {
                    graph.add_host(&target.id, snapshot);
                    hosts.push(HostStatus {
                        host_identifier: target.id.to_string(),
                        url: target.url.to_string(),
                        reachable: true,
                        error: None,
                    });
                }
                Err(e) => {
                    warn!(host = %target.id, url = %target.url, error = %e, "host fetch failed");
                    hosts.push(HostStatus {
                        host_identifier: target.id.to_string(),
                        url: target.url.to_string(),
                        reachable: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let links = uplink::connect_uplinks(&graph.nodes, &self.uplink_interface);
        let inter_host_links = links.len();
        graph.edges.extend(links);
        graph.prune_dangling_edges();

        let MergedGraph {
            nodes,
            edges,
            containers,
            stats,
        } = graph;
        self.surface.sync(nodes, edges);
        let labelled = self.bandwidth.update(&mut self.surface);

        debug!(
            hosts_ok = stats.hosts,
            hosts_failed = outcomes.len() - stats.hosts,
            nodes = self.surface.nodes().len(),
            edges = self.surface.edges().len(),
            containers = containers.len(),
            inter_host_links,
            bandwidth_labels = labelled,
            nodes_dropped = stats.nodes_dropped,
            edges_dropped = stats.edges_dropped,
            edges_dangling = stats.edges_dangling,
            parents_rehomed = stats.parents_rehomed,
            "cycle complete"
        );

        TopologySnapshot {
            timestamp,
            nodes: self.surface.nodes().to_vec(),
            edges: self.surface.edges().to_vec(),
            containers,
            hosts,
        }
    }
}
