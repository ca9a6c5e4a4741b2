// Throughput labels for interface-to-interface edges, from cumulative counters sampled once per cycle.
//
// Rates are normalised by the configured polling window, not by the wall-clock gap between
// observations; a delayed or skipped cycle therefore over-reports.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::models::InterfaceStats;
use crate::surface::LiveTopology;

const MIB: f64 = 1024.0 * 1024.0;

/// Keeps last cycle's counters per interface node id.
#[derive(Debug)]
pub struct BandwidthEngine {
    window_secs: f64,
    previous: HashMap<String, InterfaceStats>,
}

impl BandwidthEngine {
    /// `window` is the polling interval the rates are normalised by.
    pub fn new(window: Duration) -> Self {
        Self {
            window_secs: window.as_secs_f64(),
            previous: HashMap::new(),
        }
    }

    /// Counters retained from the last `update`.
    pub fn previous(&self, node_id: &str) -> Option<&InterfaceStats> {
        self.previous.get(node_id)
    }

    /// Rewrites labels on every displayed edge joining two interface nodes.
    ///
    /// Only the source endpoint's counters are used. Edges whose source has no counters in
    /// either this or the previous cycle keep whatever label they had. Returns the number of
    /// labels written.
    pub fn update(&mut self, surface: &mut LiveTopology) -> usize {
        let (nodes, edges) = surface.split_mut();

        let mut current = HashMap::new();
        let mut interfaces = HashSet::new();
        for node in nodes.iter().filter(|n| n.is_interface) {
            interfaces.insert(node.id.as_str());
            if let Some(stats) = node.interface_stats() {
                current.insert(node.id.clone(), stats);
            }
        }

        let mut written = 0;
        for edge in edges.iter_mut() {
            if !interfaces.contains(edge.source.as_str())
                || !interfaces.contains(edge.target.as_str())
            {
                continue;
            }
            let (Some(prev), Some(curr)) = (
                self.previous.get(&edge.source),
                current.get(&edge.source),
            ) else {
                continue;
            };
            edge.label = Some(format_rate(self.rate(prev, curr)));
            written += 1;
        }

        self.previous = current;
        written
    }

    /// Sent + received, in MB/s over the configured window.
    pub fn rate(&self, prev: &InterfaceStats, curr: &InterfaceStats) -> f64 {
        let divisor = self.window_secs * MIB;
        let sent = (curr.bytes_sent as f64 - prev.bytes_sent as f64) / divisor;
        let recv = (curr.bytes_recv as f64 - prev.bytes_recv as f64) / divisor;
        sent + recv
    }
}

pub fn format_rate(mb_per_sec: f64) -> String {
    format!("{mb_per_sec:.2} MB/s")
}
