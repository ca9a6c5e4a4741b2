// Domain models: host-local raw elements, the fused global graph, and what gets published

mod container;
mod graph;
mod raw;
mod topology;

pub use container::{ContainerDetail, ContainerSummary, ContainerUsage};
pub use graph::{Edge, InterfaceStats, Node};
pub use raw::{RawEdge, RawNode, RawSnapshot};
pub use topology::{HostStatus, TopologySnapshot};
