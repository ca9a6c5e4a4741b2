// Model serialization tests (camelCase wire names, passthrough fields, usage derivation)

use clustermap::models::*;
use serde_json::json;

#[test]
fn test_raw_node_unknown_fields_land_in_extra() {
    let raw: RawNode = serde_json::from_value(json!({
        "id": "c1",
        "isContainer": true,
        "containerID": "abc",
        "image": "nginx",
        "status": "running"
    }))
    .unwrap();
    assert_eq!(raw.id.as_deref(), Some("c1"));
    assert!(raw.is_container);
    assert!(!raw.is_interface);
    assert_eq!(raw.container_id.as_deref(), Some("abc"));
    assert_eq!(raw.extra.get("image"), Some(&json!("nginx")));
    assert_eq!(raw.extra.get("status"), Some(&json!("running")));
}

#[test]
fn test_raw_snapshot_missing_arrays_default_to_empty() {
    let snapshot: RawSnapshot = serde_json::from_value(json!({})).unwrap();
    assert!(snapshot.nodes.is_empty());
    assert!(snapshot.edges.is_empty());
}

#[test]
fn test_node_serialization_camel_case_and_sparse() {
    let node = Node {
        id: "h1_c1".into(),
        parent: Some("h1_localhost".into()),
        is_container: true,
        host_identifier: Some("h1".into()),
        container_id: Some("abc".into()),
        extra: serde_json::from_value(json!({ "image": "nginx" })).unwrap(),
        ..Default::default()
    };
    let value = serde_json::to_value(&node).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "h1_c1",
            "parent": "h1_localhost",
            "isContainer": true,
            "hostIdentifier": "h1",
            "containerID": "abc",
            "image": "nginx"
        })
    );
    let back: Node = serde_json::from_value(value).unwrap();
    assert_eq!(back, node);
    assert_eq!(back.extra_str("image"), Some("nginx"));
}

#[test]
fn test_interface_stats_require_both_counters() {
    assert_eq!(
        InterfaceStats::from_value(&json!({ "bytesSent": 1, "bytesRecv": 2, "packets": 3 })),
        Some(InterfaceStats {
            bytes_sent: 1,
            bytes_recv: 2
        })
    );
    assert_eq!(InterfaceStats::from_value(&json!({ "bytesSent": 1 })), None);
    assert_eq!(InterfaceStats::from_value(&json!("n/a")), None);
}

#[test]
fn test_interface_stats_accept_whole_number_floats() {
    assert_eq!(
        InterfaceStats::from_value(&json!({ "bytesSent": 1000.0, "bytesRecv": 2048 })),
        Some(InterfaceStats {
            bytes_sent: 1000,
            bytes_recv: 2048
        })
    );
    assert_eq!(
        InterfaceStats::from_value(&json!({ "bytesSent": 10.5, "bytesRecv": 0 })),
        None
    );
    assert_eq!(
        InterfaceStats::from_value(&json!({ "bytesSent": -1.0, "bytesRecv": 0 })),
        None
    );
}

#[test]
fn test_raw_node_wrong_typed_fields_are_lenient() {
    let raw: RawNode = serde_json::from_value(json!({
        "id": 7,
        "label": 5,
        "isInterface": null,
        "isContainer": 0,
        "isNetwork": 1,
        "containerID": 42,
        "parent": ["x"]
    }))
    .unwrap();
    assert_eq!(raw.id.as_deref(), Some("7"));
    assert_eq!(raw.label.as_deref(), Some("5"));
    assert!(!raw.is_interface);
    assert!(!raw.is_container);
    assert!(raw.is_network);
    assert_eq!(raw.container_id.as_deref(), Some("42"));
    assert_eq!(raw.parent, None);
}

#[test]
fn test_container_summary_wire_names() {
    let summary = ContainerSummary {
        name: Some("web".into()),
        image: Some("nginx".into()),
        status: Some("running".into()),
        host_identifier: "h1".into(),
        container_id: "abc".into(),
    };
    assert_eq!(
        serde_json::to_value(&summary).unwrap(),
        json!({
            "name": "web",
            "image": "nginx",
            "status": "running",
            "hostIdentifier": "h1",
            "containerID": "abc"
        })
    );
}

#[test]
fn test_container_usage_from_docker_stats() {
    let usage = ContainerUsage::from_stats(&json!({
        "cpu_stats": { "cpu_usage": { "total_usage": 50 }, "system_cpu_usage": 200 },
        "memory_stats": { "usage": 2097152, "limit": 8388608 }
    }));
    assert_eq!(usage.cpu_percent, Some(25.0));
    assert_eq!(usage.memory_usage_mb, Some(2.0));
    assert_eq!(usage.memory_limit_mb, Some(8.0));
    assert_eq!(usage.memory_percent, Some(25.0));
}

#[test]
fn test_container_usage_missing_or_zero_inputs() {
    let usage = ContainerUsage::from_stats(&json!({
        "cpu_stats": { "cpu_usage": { "total_usage": 50 }, "system_cpu_usage": 0 },
        "memory_stats": { "usage": 1048576 }
    }));
    assert_eq!(usage.cpu_percent, None);
    assert_eq!(usage.memory_usage_mb, Some(1.0));
    assert_eq!(usage.memory_limit_mb, None);
    assert_eq!(usage.memory_percent, None);
    assert_eq!(ContainerUsage::from_stats(&json!(null)), ContainerUsage::default());
}

#[test]
fn test_container_detail_defaults() {
    let detail: ContainerDetail = serde_json::from_value(json!({ "logs": "x" })).unwrap();
    assert_eq!(detail.logs, "x");
    assert!(detail.stats.is_null());
}
