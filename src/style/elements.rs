//! Element list handed to the renderer next to the stylesheet.

use std::collections::BTreeMap;

use hashbrown::HashSet;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::model::nice_cx::CARTESIAN_LAYOUT;
use crate::model::{Attribute, DataType, ElementId, Fields, NiceCx};
use super::convert::parse_number;
use super::names::AttributeNameMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeElement {
    pub data: Fields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeElement {
    pub data: Fields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Elements {
    pub nodes: Vec<NodeElement>,
    pub edges: Vec<EdgeElement>,
}

impl Elements {
    pub fn node(&self, id: ElementId) -> Option<&NodeElement> {
        let id = JsonValue::String(id.to_string());
        self.nodes.iter().find(|n| n.data.get("id") == Some(&id))
    }

    pub fn edge(&self, id: ElementId) -> Option<&EdgeElement> {
        let id = JsonValue::String(format!("e{id}"));
        self.edges.iter().find(|e| e.data.get("id") == Some(&id))
    }
}

/// Build the element list.
///
/// Every node and edge attribute name is registered in `names`, which is
/// then finalized; attribute data keys are the resolved names. Attributes
/// and layout entries whose owner is not in the model are dropped.
pub fn build_elements(cx: &NiceCx, names: &mut AttributeNameMap) -> Elements {
    names.prepare(cx);

    let mut nodes: BTreeMap<ElementId, NodeElement> = cx
        .nodes
        .values()
        .map(|node| {
            let mut data = Fields::new();
            data.insert("id".to_owned(), JsonValue::String(node.id.to_string()));
            data.insert("name".to_owned(), JsonValue::String(cx.default_node_label(node)));
            (node.id, NodeElement { data, position: None, selected: None })
        })
        .collect();

    for (owner, attributes) in cx.node_attributes.owners() {
        let Some(node) = nodes.get_mut(&owner) else { continue };
        for attribute in attributes.values() {
            let name = names.resolve(&attribute.name);
            if name == "selected" {
                node.selected = selected_flag(&attribute.value).or(node.selected);
            } else {
                node.data.insert(name, coerce(attribute));
            }
        }
    }

    for entry in cx.opaque(CARTESIAN_LAYOUT).unwrap_or_default() {
        let Some(node) = entry.get("node").and_then(ElementId::from_json).and_then(|id| nodes.get_mut(&id)) else {
            continue;
        };
        if let (Some(x), Some(y)) = (entry.get("x").and_then(coordinate), entry.get("y").and_then(coordinate)) {
            node.position = Some(Position { x, y });
        }
    }

    let mut edges: BTreeMap<ElementId, EdgeElement> = cx
        .edges
        .values()
        .map(|edge| {
            let mut data = Fields::new();
            data.insert("id".to_owned(), JsonValue::String(format!("e{}", edge.id)));
            data.insert("source".to_owned(), JsonValue::String(edge.source.to_string()));
            data.insert("target".to_owned(), JsonValue::String(edge.target.to_string()));
            if let Some(interaction) = edge.interaction.as_deref().filter(|i| !i.is_empty()) {
                data.insert("interaction".to_owned(), JsonValue::String(interaction.to_owned()));
            }
            (edge.id, EdgeElement { data })
        })
        .collect();

    for (owner, attributes) in cx.edge_attributes.owners() {
        let Some(edge) = edges.get_mut(&owner) else { continue };
        for attribute in attributes.values() {
            edge.data.insert(names.resolve(&attribute.name), coerce(attribute));
        }
    }

    let elements = Elements { nodes: nodes.into_values().collect(), edges: edges.into_values().collect() };
    debug!(nodes = elements.nodes.len(), edges = elements.edges.len(), "elements built");
    elements
}

/// True when every node has a position and no two share one.
pub fn all_nodes_have_unique_positions(elements: &Elements) -> bool {
    let mut seen = HashSet::with_capacity(elements.nodes.len());
    elements.nodes.iter().all(|node| match node.position {
        Some(p) => seen.insert((p.x.to_bits(), p.y.to_bits())),
        None => false,
    })
}

/// Element data value for an attribute, by declared type: numbers are
/// parsed (unparseable ones become `null`), lists contribute their first
/// item, everything else is kept as is.
fn coerce(attribute: &Attribute) -> JsonValue {
    match attribute.declared_type() {
        t if t.is_numeric() => number(&attribute.value),
        DataType::ListOf(item) => {
            let first = attribute.value.as_array().and_then(|items| items.first());
            match (first, item.is_numeric()) {
                (Some(first), true) => number(first),
                (Some(first), false) => first.clone(),
                (None, true) => JsonValue::Null,
                (None, false) => JsonValue::String(String::new()),
            }
        }
        _ => attribute.value.clone(),
    }
}

fn number(value: &JsonValue) -> JsonValue {
    let n = match value {
        JsonValue::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        JsonValue::String(s) => parse_number(s),
        _ => f64::NAN,
    };
    JsonValue::from(n)
}

fn coordinate(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => Some(parse_number(s)).filter(|n| !n.is_nan()),
        _ => None,
    }
}

fn selected_flag(value: &JsonValue) -> Option<bool> {
    match value {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::String(s) if s == "true" => Some(true),
        JsonValue::String(s) if s == "false" => Some(false),
        _ => None,
    }
}
