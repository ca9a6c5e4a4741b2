// Fuses per-host snapshots into one graph: namespacing, host roots, container rows,
// and dropping edges whose endpoints are not in the final node set.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::models::{ContainerSummary, Edge, Node, RawSnapshot};
use crate::namespace::{self, HostId};

/// Drop counters for one merge; logged per cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub hosts: usize,
    pub nodes_dropped: usize,
    pub edges_dropped: usize,
    pub edges_dangling: usize,
    pub parents_rehomed: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub containers: Vec<ContainerSummary>,
    pub stats: MergeStats,
}

impl MergedGraph {
    /// Appends one host's contribution: its namespaced nodes, then its root node, then its edges.
    pub fn add_host(&mut self, host: &HostId, snapshot: &RawSnapshot) {
        self.stats.hosts += 1;
        let first = self.nodes.len();

        for element in &snapshot.nodes {
            match namespace::resolve_node(host, element) {
                Ok(node) => {
                    if node.is_container {
                        self.containers.push(container_summary(host, &node));
                    }
                    self.nodes.push(node);
                }
                Err(reason) => {
                    warn!(host = %host, reason = %reason, "dropping node");
                    self.stats.nodes_dropped += 1;
                }
            }
        }
        self.nodes.push(host.root_node());
        self.rehome_orphans(host, first);

        for element in &snapshot.edges {
            match namespace::resolve_edge(host, element) {
                Ok(edge) => self.edges.push(edge),
                Err(reason) => {
                    warn!(host = %host, reason = %reason, "dropping edge");
                    self.stats.edges_dropped += 1;
                }
            }
        }
    }

    /// Points parents that are not among this host's nodes (dropped or never sent) at the host root.
    fn rehome_orphans(&mut self, host: &HostId, first: usize) {
        let ids: HashSet<String> = self.nodes[first..].iter().map(|n| n.id.clone()).collect();
        let root = host.root_id();
        for node in &mut self.nodes[first..] {
            if let Some(parent) = &node.parent
                && !ids.contains(parent)
            {
                warn!(host = %host, node = %node.id, parent = %parent, "parent not found; attaching to host root");
                node.parent = Some(root.clone());
                self.stats.parents_rehomed += 1;
            }
        }
    }

    /// Removes every edge whose source or target is not a node of the merged set.
    /// Returns how many were removed.
    pub fn prune_dangling_edges(&mut self) -> usize {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let before = self.edges.len();
        self.edges.retain(|e| {
            let valid = ids.contains(e.source.as_str()) && ids.contains(e.target.as_str());
            if !valid {
                debug!(edge = %e.id, source = %e.source, target = %e.target, "dropping dangling edge");
            }
            valid
        });
        let removed = before - self.edges.len();
        self.stats.edges_dangling += removed;
        removed
    }
}

/// Merges hosts in iteration order. Failed hosts are simply not passed in.
pub fn merge_hosts<'a, I>(hosts: I) -> MergedGraph
where
    I: IntoIterator<Item = (&'a HostId, &'a RawSnapshot)>,
{
    let mut graph = MergedGraph::default();
    for (host, snapshot) in hosts {
        graph.add_host(host, snapshot);
    }
    graph
}

fn container_summary(host: &HostId, node: &Node) -> ContainerSummary {
    ContainerSummary {
        name: node.label.clone(),
        image: node.extra_str("image").map(str::to_string),
        status: node.extra_str("status").map(str::to_string),
        host_identifier: host.as_str().to_string(),
        container_id: node.container_id.clone().unwrap_or_default(),
    }
}
