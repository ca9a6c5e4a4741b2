// Global (host-prefixed) graph elements

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn is_false(b: &bool) -> bool {
    !*b
}

/// A node in the fused cluster graph. `id` and `parent` live in the global namespace;
/// `container_id` is still the host-local container id (detail lookups are host-local).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_network: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_interface: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_container: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_identifier: Option<String>,
    #[serde(
        default,
        rename = "containerID",
        skip_serializing_if = "Option::is_none"
    )]
    pub container_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    /// String value of a passthrough field (e.g. "image", "status").
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    /// Cumulative interface counters, if `stats` carries both of them.
    pub fn interface_stats(&self) -> Option<InterfaceStats> {
        self.stats.as_ref().and_then(InterfaceStats::from_value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cumulative byte counters of one interface, as reported in its `stats` blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceStats {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

impl InterfaceStats {
    /// Counters may arrive as integers or as whole-number floats (`1000.0`).
    pub fn from_value(stats: &Value) -> Option<Self> {
        let obj = stats.as_object()?;
        Some(Self {
            bytes_sent: counter(obj.get("bytesSent")?)?,
            bytes_recv: counter(obj.get("bytesRecv")?)?,
        })
    }
}

fn counter(v: &Value) -> Option<u64> {
    v.as_u64().or_else(|| {
        v.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}
