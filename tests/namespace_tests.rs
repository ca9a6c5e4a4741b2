// Namespace resolver tests: id/parent/edge rewriting and malformed element handling

use clustermap::namespace::{HostId, SkipReason, resolve_edge, resolve_node};
use serde_json::json;

#[test]
fn node_id_and_parent_are_prefixed() {
    let host = HostId::new("h1");
    let node = resolve_node(&host, &json!({ "data": { "id": "c1", "parent": "net1" } })).unwrap();
    assert_eq!(node.id, "h1_c1");
    assert_eq!(node.parent.as_deref(), Some("h1_net1"));
}

#[test]
fn node_without_parent_hangs_off_host_root() {
    let host = HostId::new("h1");
    let node = resolve_node(&host, &json!({ "data": { "id": "net1" } })).unwrap();
    assert_eq!(node.parent.as_deref(), Some("h1_localhost"));
    assert_eq!(host.root_id(), "h1_localhost");
}

#[test]
fn flags_stats_and_passthrough_fields_are_copied() {
    let host = HostId::new("h1");
    let node = resolve_node(
        &host,
        &json!({
            "data": {
                "id": "eth0",
                "label": "eth0",
                "isInterface": true,
                "isNetwork": false,
                "stats": { "bytesSent": 10, "bytesRecv": 20 },
                "mtu": 1500
            }
        }),
    )
    .unwrap();
    assert!(node.is_interface);
    assert!(!node.is_network);
    assert_eq!(node.label.as_deref(), Some("eth0"));
    assert_eq!(node.stats, Some(json!({ "bytesSent": 10, "bytesRecv": 20 })));
    assert_eq!(node.extra.get("mtu"), Some(&json!(1500)));
}

#[test]
fn container_keeps_original_container_id_and_gets_host() {
    let host = HostId::new("h1");
    let node = resolve_node(
        &host,
        &json!({ "data": { "id": "n7", "isContainer": true, "containerID": "abc123" } }),
    )
    .unwrap();
    assert_eq!(node.id, "h1_n7");
    assert_eq!(node.container_id.as_deref(), Some("abc123"));
    assert_eq!(node.host_identifier.as_deref(), Some("h1"));
}

#[test]
fn container_without_container_id_falls_back_to_local_id() {
    let host = HostId::new("h1");
    let node = resolve_node(&host, &json!({ "data": { "id": "abc", "isContainer": true } })).unwrap();
    assert_eq!(node.container_id.as_deref(), Some("abc"));
}

#[test]
fn node_without_id_is_skipped() {
    let host = HostId::new("h1");
    let err = resolve_node(&host, &json!({ "data": { "label": "orphan" } })).unwrap_err();
    assert_eq!(err, SkipReason::MissingId);
}

#[test]
fn node_with_numeric_id_is_stringified() {
    let host = HostId::new("h1");
    let node = resolve_node(&host, &json!({ "data": { "id": 42 } })).unwrap();
    assert_eq!(node.id, "h1_42");
    let err = resolve_node(&host, &json!({ "data": { "id": { "x": 1 } } })).unwrap_err();
    assert_eq!(err, SkipReason::MissingId);
}

#[test]
fn wrong_typed_optional_fields_do_not_drop_the_node() {
    let host = HostId::new("h1");
    let node = resolve_node(
        &host,
        &json!({ "data": { "id": "n", "isInterface": null, "isContainer": 0, "label": 5 } }),
    )
    .unwrap();
    assert_eq!(node.id, "h1_n");
    assert_eq!(node.label.as_deref(), Some("5"));
    assert!(!node.is_interface);
    assert!(!node.is_container);
    assert_eq!(node.host_identifier, None);

    let container = resolve_node(
        &host,
        &json!({ "data": { "id": "c", "isContainer": 1, "containerID": 9001 } }),
    )
    .unwrap();
    assert!(container.is_container);
    assert_eq!(container.container_id.as_deref(), Some("9001"));
}

#[test]
fn edge_fields_are_prefixed_with_origin_host() {
    let host = HostId::new("h2");
    let edge = resolve_edge(
        &host,
        &json!({ "data": { "id": "e1", "source": "a", "target": "b", "label": "veth" } }),
    )
    .unwrap();
    assert_eq!(edge.id, "h2_e1");
    assert_eq!(edge.source, "h2_a");
    assert_eq!(edge.target, "h2_b");
    assert_eq!(edge.label.as_deref(), Some("veth"));
}

#[test]
fn edge_missing_fields_are_skipped() {
    let host = HostId::new("h1");
    assert_eq!(
        resolve_edge(&host, &json!({ "data": { "source": "a", "target": "b" } })),
        Err(SkipReason::MissingId)
    );
    assert_eq!(
        resolve_edge(&host, &json!({ "data": { "id": "e1", "target": "b" } })),
        Err(SkipReason::MissingEndpoint("source"))
    );
    assert_eq!(
        resolve_edge(&host, &json!({ "data": { "id": "e1", "source": "a" } })),
        Err(SkipReason::MissingEndpoint("target"))
    );
}

#[test]
fn identical_local_ids_on_distinct_hosts_do_not_collide() {
    let a = HostId::new("10.0.0.1");
    let b = HostId::new("10.0.0.2");
    let element = json!({ "data": { "id": "bridge" } });
    let na = resolve_node(&a, &element).unwrap();
    let nb = resolve_node(&b, &element).unwrap();
    assert_ne!(na.id, nb.id);
}
