// Live graph as currently displayed. Survives across cycles so that labels written by the
// bandwidth engine stay put until the incoming data for that edge actually changes.

use std::collections::HashMap;

use crate::models::{Edge, Node};

#[derive(Debug, Default)]
pub struct LiveTopology {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// Label each edge carried in the last synced graph, before any display-side rewrite.
    incoming_labels: HashMap<String, Option<String>>,
}

impl LiveTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the displayed graph with `nodes`/`edges`.
    ///
    /// An edge that was already displayed keeps its displayed label when its incoming label
    /// is the same as last cycle's; otherwise the incoming label wins.
    pub fn sync(&mut self, nodes: Vec<Node>, mut edges: Vec<Edge>) {
        let displayed: HashMap<&str, &Option<String>> = self
            .edges
            .iter()
            .map(|e| (e.id.as_str(), &e.label))
            .collect();

        let mut incoming_labels = HashMap::with_capacity(edges.len());
        for edge in &mut edges {
            let incoming = edge.label.clone();
            let unchanged = self.incoming_labels.get(&edge.id) == Some(&incoming);
            if unchanged && let Some(label) = displayed.get(edge.id.as_str()) {
                edge.label = (*label).clone();
            }
            incoming_labels.insert(edge.id.clone(), incoming);
        }

        self.nodes = nodes;
        self.edges = edges;
        self.incoming_labels = incoming_labels;
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Nodes read-only, edges writable (labels are the only display-side mutation).
    pub fn split_mut(&mut self) -> (&[Node], &mut [Edge]) {
        (&self.nodes, &mut self.edges)
    }
}
