// Container models: tabular summary row and on-demand detail

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of the container table; collected while merging, one per container node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSummary {
    pub name: Option<String>,
    pub image: Option<String>,
    pub status: Option<String>,
    pub host_identifier: String,
    #[serde(rename = "containerID")]
    pub container_id: String,
}

/// Body of `GET <hostBaseURL>/api/container/<containerID>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerDetail {
    #[serde(default)]
    pub stats: Value,
    #[serde(default)]
    pub logs: String,
}

/// Resource usage derived from a Docker stats blob; `None` when the inputs are missing or zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerUsage {
    pub cpu_percent: Option<f64>,
    pub memory_usage_mb: Option<f64>,
    pub memory_limit_mb: Option<f64>,
    pub memory_percent: Option<f64>,
}

const MIB: f64 = 1024.0 * 1024.0;

fn non_zero(v: Option<&Value>) -> Option<f64> {
    v.and_then(Value::as_f64).filter(|n| *n != 0.0)
}

impl ContainerUsage {
    pub fn from_stats(stats: &Value) -> Self {
        let cpu_usage = non_zero(stats.pointer("/cpu_stats/cpu_usage/total_usage"));
        let system_cpu_usage = non_zero(stats.pointer("/cpu_stats/system_cpu_usage"));
        let mem_usage = non_zero(stats.pointer("/memory_stats/usage"));
        let mem_limit = non_zero(stats.pointer("/memory_stats/limit"));

        Self {
            cpu_percent: cpu_usage
                .zip(system_cpu_usage)
                .map(|(cpu, system)| cpu / system * 100.0),
            memory_usage_mb: mem_usage.map(|u| u / MIB),
            memory_limit_mb: mem_limit.map(|l| l / MIB),
            memory_percent: mem_usage
                .zip(mem_limit)
                .map(|(usage, limit)| usage / limit * 100.0),
        }
    }
}
