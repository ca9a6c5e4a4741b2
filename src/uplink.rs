// Inter-host links: every pair of uplink interfaces in the merged graph gets an edge.

use crate::models::{Edge, Node};

pub const DEFAULT_UPLINK_INTERFACE: &str = "ens33";

/// Label of a synthesized link until the bandwidth engine replaces it.
pub const INTER_HOST_LABEL: &str = "Inter-host Connection";

/// Interface nodes whose id ends in `_<uplink>`, in collection order.
///
/// Host identity is not checked, so two uplinks on the same host are paired as well.
pub fn uplink_interfaces<'a>(nodes: &'a [Node], uplink: &str) -> Vec<&'a Node> {
    let suffix = format!("_{uplink}");
    nodes
        .iter()
        .filter(|n| n.is_interface && n.id.ends_with(&suffix))
        .collect()
}

/// One edge per unordered pair of uplinks, ids `<a>-<b>` with `a` before `b` in node order.
/// Regenerated from scratch every cycle.
pub fn connect_uplinks(nodes: &[Node], uplink: &str) -> Vec<Edge> {
    let uplinks = uplink_interfaces(nodes, uplink);
    let mut edges = Vec::with_capacity(uplinks.len() * uplinks.len().saturating_sub(1) / 2);
    for (i, a) in uplinks.iter().enumerate() {
        for b in &uplinks[i + 1..] {
            edges.push(Edge {
                id: format!("{}-{}", a.id, b.id),
                source: a.id.clone(),
                target: b.id.clone(),
                label: Some(INTER_HOST_LABEL.to_string()),
                ..Default::default()
            });
        }
    }
    edges
}
