//! End-to-end tests for CX assembly and serialization.
//!
//! Each test parses a CX stream, assembles it, serializes it back and
//! reassembles, checking what must survive the trip.

use std::collections::BTreeSet;

use nicecx::cx::{assemble, fragment, parse_raw_cx, serialize_with, to_json, SerializeConfig};
use nicecx::{DataType, ElementId, Network, NiceCx};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// Helper: a small annotated network in CX text form.
// ============================================================================

const NETWORK: &str = r#"[
  {"numberVerification": [{"longNumber": 281474976710655}]},
  {"metaData": [{"name": "nodes", "elementCount": 3, "idCounter": 3, "consistencyGroup": 1, "version": "1.0"}]},
  {"networkAttributes": [{"n": "name", "v": "Signalling"}, {"n": "version", "v": "2.1"}]},
  {"nodes": [{"@id": 1, "n": "EGFR"}, {"@id": 2, "n": "GRB2"}]},
  {"nodes": [{"@id": 3, "r": "hgnc:SOS1"}]},
  {"edges": [{"@id": 10, "s": 1, "t": 2, "i": "binds"}, {"@id": 11, "s": 2, "t": 3}]},
  {"nodeAttributes": [
    {"po": 1, "n": "score", "v": "0.9", "d": "double"},
    {"po": 1, "n": "aliases", "v": ["ERBB1", "HER1"], "d": "list_of_string"},
    {"po": 2, "n": "score", "v": "0.4", "d": "double"},
    {"po": 3, "n": "type", "v": "protein"}
  ]},
  {"edgeAttributes": [{"po": 10, "n": "weight", "v": "3", "d": "integer"}]},
  {"citations": [{"@id": 50, "dc:title": "Paper"}]},
  {"edgeCitations": [{"po": [10, 11], "citations": [50]}]},
  {"cartesianLayout": [{"node": 1, "x": 0.0, "y": 1.0}]},
  {"metaData": [{"name": "nodes", "elementCount": 3}]},
  {"status": [{"error": "", "success": true}]}
]"#;

fn attribute_tuples(cx: &NiceCx) -> BTreeSet<(i64, String, String, String)> {
    cx.node_attributes
        .iter()
        .chain(cx.edge_attributes.iter())
        .map(|a| (a.owner.0, a.name.clone(), a.value.to_string(), a.declared_type().to_string()))
        .collect()
}

fn aspect_names(raw: &[serde_json::Map<String, Value>]) -> Vec<String> {
    raw.iter().flat_map(|f| f.keys().cloned()).collect()
}

// ============================================================================
// 1. Round trip keeps counts and attribute tuples
// ============================================================================

#[test]
fn test_roundtrip_preserves_counts_and_attributes() {
    let original = Network::parse(NETWORK).unwrap();
    let again = Network::parse(&original.to_json().unwrap()).unwrap();

    assert_eq!(again.cx().nodes.len(), 3);
    assert_eq!(again.cx().edges.len(), 2);
    assert_eq!(attribute_tuples(again.cx()), attribute_tuples(original.cx()));
    assert_eq!(again.cx().edge_citations, original.cx().edge_citations);
    assert_eq!(again.cx().opaque, original.cx().opaque);
}

// ============================================================================
// 2. Serialized stream shape
// ============================================================================

#[test]
fn test_fragment_order() {
    let network = Network::parse(NETWORK).unwrap();
    let raw = serialize_with(network.cx(), &SerializeConfig { now_millis: Some(0) });
    assert_eq!(
        aspect_names(&raw),
        vec![
            "numberVerification",
            "metaData",
            "nodes",
            "edges",
            "citations",
            "nodeAttributes",
            "edgeAttributes",
            "edgeCitations",
            "cartesianLayout",
            "networkAttributes",
            "metaData",
            "status",
        ]
    );
}

#[test]
fn test_relations_expand_per_owner() {
    let network = Network::parse(NETWORK).unwrap();
    let raw = network.to_raw();
    let citations = raw.iter().find_map(|f| f.get("edgeCitations")).unwrap();
    assert_eq!(
        citations,
        &json!([{"po": [10], "citations": [50]}, {"po": [11], "citations": [50]}])
    );
}

#[test]
fn test_defaults_for_empty_model() {
    let raw = serialize_with(&NiceCx::new(), &SerializeConfig { now_millis: Some(1) });
    assert_eq!(aspect_names(&raw), vec!["numberVerification", "metaData", "status"]);
    assert_eq!(raw[2]["status"], json!([{"error": "", "success": true}]));
}

#[test]
fn test_first_status_and_metadata_win() {
    let cx = assemble(&parse_raw_cx(NETWORK).unwrap());
    let pre = cx.pre_metadata.as_ref().unwrap();
    assert_eq!(pre[0].element_count, Some(3));
    assert_eq!(pre[0].id_counter, Some(3));
    assert!(cx.post_metadata.is_some());
}

// ============================================================================
// 3. Model builders survive the trip
// ============================================================================

#[test]
fn test_built_network_roundtrips() {
    let mut cx = NiceCx::new();
    cx.add_node(nicecx::Node::new(1).with_name("a"));
    cx.add_edge(nicecx::Edge::new(2, 1, 1));
    cx.set_node_attribute(1, "tags", json!("[\"x\",\"y\"]"), "list_of_string");
    cx.set_edge_attribute(2, "w", json!("1.5"), DataType::Double);
    cx.set_network_attribute("name", json!("built"), None);

    let back = assemble(&parse_raw_cx(&to_json(&nicecx::serialize(&cx)).unwrap()).unwrap());
    let tags = back.node_attributes.get(ElementId(1), "tags").unwrap();
    assert_eq!(tags.value, json!(["x", "y"]));
    assert_eq!(back.summary().name, "built");
}

#[test]
fn test_invalid_stream_is_an_error() {
    assert!(matches!(parse_raw_cx("[1]"), Err(nicecx::Error::InvalidFragment(_))));
    assert!(matches!(parse_raw_cx("{"), Err(nicecx::Error::Json(_))));
}

// ============================================================================
// 4. Property: counts survive for generated networks
// ============================================================================

proptest! {
    #[test]
    fn roundtrip_keeps_counts(
        node_ids in proptest::collection::btree_set(0i64..500, 0..20),
        attrs in proptest::collection::vec((0usize..20, "[a-z]{1,6}", "[a-z0-9]{0,6}"), 0..30),
    ) {
        let ids: Vec<i64> = node_ids.into_iter().collect();
        let nodes: Vec<Value> = ids.iter().map(|id| json!({"@id": id})).collect();
        let node_attrs: Vec<Value> = attrs
            .iter()
            .filter_map(|(i, n, v)| ids.get(*i % ids.len().max(1)).map(|po| json!({"po": po, "n": n, "v": v})))
            .collect();
        let cx = assemble(&[fragment("nodes", nodes), fragment("nodeAttributes", node_attrs)]);
        let back = assemble(&nicecx::serialize(&cx));

        prop_assert_eq!(back.nodes.len(), ids.len());
        prop_assert_eq!(attribute_tuples(&back), attribute_tuples(&cx));
    }
}
