// Rewrites host-local ids into the cluster-wide namespace (`<host>_<localId>`).

use std::fmt;

use reqwest::Url;
use serde_json::Value;

use crate::models::{Edge, Node, RawEdge, RawNode};

/// Suffix of every host's synthetic root node id.
pub const HOST_ROOT_SUFFIX: &str = "localhost";

/// Namespace prefix of one host: the hostname portion of its configured URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostId(String);

impl HostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Hostname of `url`; `None` for URLs without a host (e.g. `file:`).
    pub fn from_url(url: &Url) -> Option<Self> {
        url.host_str().filter(|h| !h.is_empty()).map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<host>_<local>`
    pub fn scoped(&self, local: &str) -> String {
        format!("{}_{}", self.0, local)
    }

    /// Id of the synthetic node that parents this host's top-level nodes.
    pub fn root_id(&self) -> String {
        self.scoped(HOST_ROOT_SUFFIX)
    }

    /// The synthetic root node itself, labelled with the host identifier.
    pub fn root_node(&self) -> Node {
        Node {
            id: self.root_id(),
            label: Some(self.0.clone()),
            ..Default::default()
        }
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a raw element was left out of the merge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("element is not an object")]
    NotAnObject,
    #[error("element could not be decoded: {0}")]
    Malformed(String),
    #[error("element has no id")]
    MissingId,
    #[error("edge has no {0}")]
    MissingEndpoint(&'static str),
    #[error("node id {0:?} collides with the host root")]
    ReservedId(String),
}

/// Accepts both bare records and `{ "data": { ... } }` graph-element envelopes.
fn element_body(element: &Value) -> Result<&Value, SkipReason> {
    let obj = element.as_object().ok_or(SkipReason::NotAnObject)?;
    match obj.get("data") {
        Some(data) if data.is_object() => Ok(data),
        Some(_) => Err(SkipReason::NotAnObject),
        None => Ok(element),
    }
}

fn decode<T: serde::de::DeserializeOwned>(element: &Value) -> Result<T, SkipReason> {
    let body = element_body(element)?;
    serde_json::from_value(body.clone()).map_err(|e| SkipReason::Malformed(e.to_string()))
}

fn present(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

/// Decodes and namespaces one node element from `host`.
pub fn resolve_node(host: &HostId, element: &Value) -> Result<Node, SkipReason> {
    let raw: RawNode = decode(element)?;
    namespace_node(host, raw)
}

/// Namespaces an already-decoded node.
pub fn namespace_node(host: &HostId, raw: RawNode) -> Result<Node, SkipReason> {
    let RawNode {
        id,
        parent,
        label,
        is_network,
        is_interface,
        is_container,
        container_id,
        stats,
        mut extra,
    } = raw;
    let local_id = present(id).ok_or(SkipReason::MissingId)?;
    if local_id == HOST_ROOT_SUFFIX {
        return Err(SkipReason::ReservedId(local_id));
    }

    let parent = match present(parent) {
        Some(p) => host.scoped(&p),
        None => host.root_id(),
    };

    let (host_identifier, container_id) = if is_container {
        extra.remove("hostIdentifier");
        let original = present(container_id).unwrap_or_else(|| local_id.clone());
        (Some(host.as_str().to_string()), Some(original))
    } else {
        (None, container_id)
    };

    Ok(Node {
        id: host.scoped(&local_id),
        parent: Some(parent),
        label,
        is_network,
        is_interface,
        is_container,
        host_identifier,
        container_id,
        stats,
        extra,
    })
}

/// Decodes and namespaces one edge element from `host`. Both endpoints get the same prefix.
pub fn resolve_edge(host: &HostId, element: &Value) -> Result<Edge, SkipReason> {
    let raw: RawEdge = decode(element)?;
    namespace_edge(host, raw)
}

pub fn namespace_edge(host: &HostId, raw: RawEdge) -> Result<Edge, SkipReason> {
    let RawEdge {
        id,
        source,
        target,
        label,
        extra,
    } = raw;
    let id = present(id).ok_or(SkipReason::MissingId)?;
    let source = present(source).ok_or(SkipReason::MissingEndpoint("source"))?;
    let target = present(target).ok_or(SkipReason::MissingEndpoint("target"))?;

    Ok(Edge {
        id: host.scoped(&id),
        source: host.scoped(&source),
        target: host.scoped(&target),
        label,
        extra,
    })
}
