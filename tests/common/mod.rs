// Shared test helpers: raw host elements and host targets

#![allow(dead_code)]

use clustermap::host_client::HostTarget;
use clustermap::models::RawSnapshot;
use serde_json::{Value, json};

pub fn target(url: &str) -> HostTarget {
    HostTarget::parse(url).expect("valid host url")
}

pub fn node(id: &str) -> Value {
    json!({ "data": { "id": id, "label": id } })
}

pub fn child(id: &str, parent: &str) -> Value {
    json!({ "data": { "id": id, "label": id, "parent": parent } })
}

pub fn interface(id: &str, bytes_sent: u64, bytes_recv: u64) -> Value {
    json!({
        "data": {
            "id": id,
            "label": id,
            "isInterface": true,
            "stats": { "bytesSent": bytes_sent, "bytesRecv": bytes_recv }
        }
    })
}

pub fn container(id: &str, label: &str, image: &str, status: &str) -> Value {
    json!({
        "data": {
            "id": id,
            "label": label,
            "isContainer": true,
            "image": image,
            "status": status
        }
    })
}

pub fn edge(id: &str, source: &str, target: &str) -> Value {
    json!({ "data": { "id": id, "source": source, "target": target } })
}

pub fn snapshot(nodes: Vec<Value>, edges: Vec<Value>) -> RawSnapshot {
    RawSnapshot { nodes, edges }
}

/// One host: a bridge network with one container and an uplink interface.
pub fn small_host(ens33_sent: u64) -> RawSnapshot {
    snapshot(
        vec![
            json!({ "data": { "id": "bridge", "label": "bridge", "isNetwork": true } }),
            container("web", "web", "nginx", "running"),
            interface("ens33", ens33_sent, 0),
            interface("docker0", 0, 0),
        ],
        vec![
            edge("e1", "web", "bridge"),
            edge("e2", "docker0", "ens33"),
        ],
    )
}
