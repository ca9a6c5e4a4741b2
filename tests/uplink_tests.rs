// Inter-host link synthesis tests

use clustermap::models::Node;
use clustermap::uplink::{INTER_HOST_LABEL, connect_uplinks, uplink_interfaces};

fn iface(id: &str) -> Node {
    Node {
        id: id.into(),
        is_interface: true,
        ..Default::default()
    }
}

#[test]
fn pairs_every_uplink_once() {
    let nodes = vec![iface("h1_ens33"), iface("h2_ens33"), iface("h3_ens33"), iface("h4_ens33")];
    let edges = connect_uplinks(&nodes, "ens33");
    assert_eq!(edges.len(), 4 * 3 / 2);

    let mut pairs: Vec<(String, String)> = edges
        .iter()
        .map(|e| {
            let mut p = [e.source.clone(), e.target.clone()];
            p.sort();
            (p[0].clone(), p[1].clone())
        })
        .collect();
    pairs.sort();
    pairs.dedup();
    assert_eq!(pairs.len(), 6);
}

#[test]
fn ids_follow_collection_order() {
    let nodes = vec![iface("h1_ens33"), iface("h2_ens33"), iface("h3_ens33")];
    let ids: Vec<String> = connect_uplinks(&nodes, "ens33")
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(
        ids,
        vec![
            "h1_ens33-h2_ens33",
            "h1_ens33-h3_ens33",
            "h2_ens33-h3_ens33"
        ]
    );
}

#[test]
fn links_carry_placeholder_label() {
    let nodes = vec![iface("h1_ens33"), iface("h2_ens33")];
    let edges = connect_uplinks(&nodes, "ens33");
    assert_eq!(edges[0].label.as_deref(), Some(INTER_HOST_LABEL));
    assert_eq!(edges[0].source, "h1_ens33");
    assert_eq!(edges[0].target, "h2_ens33");
}

#[test]
fn only_interfaces_with_uplink_name_qualify() {
    let mut not_interface = iface("h3_ens33");
    not_interface.is_interface = false;
    let nodes = vec![
        iface("h1_ens33"),
        iface("h1_docker0"),
        iface("h2_ens330"),
        not_interface,
    ];
    let found: Vec<&str> = uplink_interfaces(&nodes, "ens33")
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(found, vec!["h1_ens33"]);
    assert!(connect_uplinks(&nodes, "ens33").is_empty());
}

#[test]
fn same_host_uplinks_are_paired_too() {
    let nodes = vec![iface("h1_ens33"), iface("h1_br_ens33")];
    assert_eq!(connect_uplinks(&nodes, "ens33").len(), 1);
}

#[test]
fn configured_uplink_name_is_honoured() {
    let nodes = vec![iface("h1_eth0"), iface("h2_eth0"), iface("h3_ens33")];
    let edges = connect_uplinks(&nodes, "eth0");
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].id, "h1_eth0-h2_eth0");
}
