//! The assembled network model.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use super::attribute::{Attribute, AttributeTable, DataType};
use super::visual::{self, VisualPropertyElement};
use super::{Edge, ElementId, FunctionTerm, IdentifiedElement, MetaData, Node};

/// `owner → related ids` (citations or supports).
pub type RelationTable = BTreeMap<ElementId, Vec<ElementId>>;

pub const NUMBER_VERIFICATION: &str = "numberVerification";
pub const METADATA: &str = "metaData";
pub const STATUS: &str = "status";
pub const NETWORK_ATTRIBUTES: &str = "networkAttributes";
pub const CARTESIAN_LAYOUT: &str = "cartesianLayout";
pub const PROVENANCE_HISTORY: &str = "provenanceHistory";

/// How an aspect is assembled, decided by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectKind {
    NumberVerification,
    MetaData,
    Status,
    Nodes,
    Edges,
    Citations,
    Supports,
    NodeAttributes,
    EdgeAttributes,
    NodeCitations,
    EdgeCitations,
    NodeSupports,
    EdgeSupports,
    FunctionTerms,
    /// Stored verbatim.
    Opaque,
}

impl AspectKind {
    pub fn of(name: &str) -> Self {
        match name {
            NUMBER_VERIFICATION => AspectKind::NumberVerification,
            METADATA => AspectKind::MetaData,
            STATUS => AspectKind::Status,
            "nodes" => AspectKind::Nodes,
            "edges" => AspectKind::Edges,
            "citations" => AspectKind::Citations,
            "supports" => AspectKind::Supports,
            "nodeAttributes" => AspectKind::NodeAttributes,
            "edgeAttributes" => AspectKind::EdgeAttributes,
            "nodeCitations" => AspectKind::NodeCitations,
            "edgeCitations" => AspectKind::EdgeCitations,
            "nodeSupports" => AspectKind::NodeSupports,
            "edgeSupports" => AspectKind::EdgeSupports,
            "functionTerms" => AspectKind::FunctionTerms,
            _ => AspectKind::Opaque,
        }
    }

    /// Wire name; `None` for opaque aspects, which keep their own.
    pub fn name(self) -> Option<&'static str> {
        Some(match self {
            AspectKind::NumberVerification => NUMBER_VERIFICATION,
            AspectKind::MetaData => METADATA,
            AspectKind::Status => STATUS,
            AspectKind::Nodes => "nodes",
            AspectKind::Edges => "edges",
            AspectKind::Citations => "citations",
            AspectKind::Supports => "supports",
            AspectKind::NodeAttributes => "nodeAttributes",
            AspectKind::EdgeAttributes => "edgeAttributes",
            AspectKind::NodeCitations => "nodeCitations",
            AspectKind::EdgeCitations => "edgeCitations",
            AspectKind::NodeSupports => "nodeSupports",
            AspectKind::EdgeSupports => "edgeSupports",
            AspectKind::FunctionTerms => "functionTerms",
            AspectKind::Opaque => return None,
        })
    }

    /// Field holding the related ids in a relational element.
    pub fn relation_field(self) -> Option<&'static str> {
        match self {
            AspectKind::NodeCitations | AspectKind::EdgeCitations => Some("citations"),
            AspectKind::NodeSupports | AspectKind::EdgeSupports => Some("supports"),
            _ => None,
        }
    }

    /// Aspects keyed by a unique `@id`.
    pub fn is_identified(self) -> bool {
        matches!(
            self,
            AspectKind::Nodes | AspectKind::Edges | AspectKind::Citations | AspectKind::Supports
        )
    }
}

/// Indexed, query-friendly network ("niceCX").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NiceCx {
    pub number_verification: Option<Vec<JsonValue>>,
    pub pre_metadata: Option<Vec<MetaData>>,
    pub post_metadata: Option<Vec<MetaData>>,
    pub status: Option<Vec<JsonValue>>,

    pub nodes: BTreeMap<ElementId, Node>,
    pub edges: BTreeMap<ElementId, Edge>,
    pub citations: BTreeMap<ElementId, IdentifiedElement>,
    pub supports: BTreeMap<ElementId, IdentifiedElement>,

    pub node_attributes: AttributeTable,
    pub edge_attributes: AttributeTable,

    pub node_citations: RelationTable,
    pub edge_citations: RelationTable,
    pub node_supports: RelationTable,
    pub edge_supports: RelationTable,

    /// Keyed by the node the term applies to.
    pub function_terms: BTreeMap<ElementId, FunctionTerm>,

    /// Every other aspect, elements kept verbatim.
    pub opaque: BTreeMap<String, Vec<JsonValue>>,
}

impl NiceCx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.id, node);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.insert(edge.id, edge);
    }

    pub fn set_node_attribute(
        &mut self,
        owner: impl Into<ElementId>,
        name: impl Into<String>,
        value: JsonValue,
        data_type: impl Into<DataType>,
    ) {
        let attribute = typed_attribute(owner.into(), name.into(), value, data_type.into());
        self.node_attributes.insert(attribute);
    }

    pub fn set_edge_attribute(
        &mut self,
        owner: impl Into<ElementId>,
        name: impl Into<String>,
        value: JsonValue,
        data_type: impl Into<DataType>,
    ) {
        let attribute = typed_attribute(owner.into(), name.into(), value, data_type.into());
        self.edge_attributes.insert(attribute);
    }

    /// Set a network attribute, updating an existing one with the same name.
    pub fn set_network_attribute(&mut self, name: &str, value: JsonValue, data_type: Option<DataType>) {
        let data_type = data_type.unwrap_or_default();
        let value = list_value(value, &data_type);
        let elements = self.opaque.entry(NETWORK_ATTRIBUTES.to_owned()).or_default();

        let existing = elements
            .iter_mut()
            .filter_map(JsonValue::as_object_mut)
            .find(|attr| attr.get("n").and_then(JsonValue::as_str) == Some(name));
        match existing {
            Some(attr) => {
                attr.insert("d".into(), JsonValue::String(data_type.to_string()));
                attr.insert("v".into(), value);
            }
            None => elements.push(serde_json::json!({
                "v": value,
                "d": data_type.to_string(),
                "n": name,
            })),
        }
    }

    /// Elements of an opaque aspect, if present.
    pub fn opaque(&self, aspect: &str) -> Option<&[JsonValue]> {
        self.opaque.get(aspect).map(Vec::as_slice)
    }

    /// The visual-property aspect under either of its names, decoded.
    /// `None` when the network carries no visual properties at all.
    pub fn visual_properties(&self) -> Option<Vec<VisualPropertyElement>> {
        self.opaque(visual::CY_VISUAL_PROPERTIES)
            .or_else(|| self.opaque(visual::VISUAL_PROPERTIES))
            .map(visual::decode_elements)
    }

    /// Label shown for a node: its name, else what it represents, else its
    /// function term, else its id.
    pub fn default_node_label(&self, node: &Node) -> String {
        if let Some(name) = node.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_owned();
        }
        if let Some(represents) = node.represents.as_deref().filter(|r| !r.is_empty()) {
            return represents.to_owned();
        }
        if let Some(term) = self.function_terms.get(&node.id) {
            return term.stringify();
        }
        node.id.to_string()
    }

    /// Entity of the first provenance-history element.
    pub fn provenance(&self) -> Option<&JsonValue> {
        self.opaque(PROVENANCE_HISTORY)?.first()?.get("entity")
    }
}

fn typed_attribute(owner: ElementId, name: String, value: JsonValue, data_type: DataType) -> Attribute {
    let value = list_value(value, &data_type);
    Attribute::new(owner, name, value).with_type(data_type)
}

/// List-typed values handed over as JSON text are decoded into arrays.
fn list_value(value: JsonValue, data_type: &DataType) -> JsonValue {
    match (&value, data_type.is_list()) {
        (JsonValue::String(text), true) => serde_json::from_str(text).unwrap_or(value),
        _ => value,
    }
}
