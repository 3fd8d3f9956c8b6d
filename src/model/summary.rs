//! Network summary derived from the `networkAttributes` aspect.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::nice_cx::{NiceCx, NETWORK_ATTRIBUTES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSummary {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_format: Option<JsonValue>,
    pub node_count: usize,
    pub edge_count: usize,
    pub properties: Vec<SummaryProperty>,
}

/// A network attribute without a dedicated summary field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryProperty {
    pub sub_network_id: Option<JsonValue>,
    pub predicate_string: String,
    pub data_type: Option<String>,
    pub value: JsonValue,
}

impl NiceCx {
    /// Partial summary: counts plus the well-known network attributes.
    pub fn summary(&self) -> NetworkSummary {
        let mut summary = NetworkSummary {
            name: "Untitled".to_owned(),
            description: None,
            version: None,
            source_format: None,
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            properties: Vec::new(),
        };

        for attr in self.opaque(NETWORK_ATTRIBUTES).unwrap_or_default() {
            let Some(name) = attr.get("n").and_then(JsonValue::as_str) else {
                continue;
            };
            let value = attr.get("v").cloned().unwrap_or(JsonValue::Null);
            match name {
                "name" => {
                    summary.name = match value {
                        JsonValue::String(s) => s,
                        other => other.to_string(),
                    }
                }
                "description" => summary.description = Some(value),
                "version" => summary.version = Some(value),
                "ndex:sourceFormat" => summary.source_format = Some(value),
                _ => summary.properties.push(SummaryProperty {
                    sub_network_id: attr.get("s").cloned(),
                    predicate_string: name.to_owned(),
                    data_type: attr.get("d").and_then(JsonValue::as_str).map(str::to_owned),
                    value,
                }),
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Node};
    use serde_json::json;

    #[test]
    fn test_summary() {
        let mut cx = NiceCx::new();
        cx.add_node(Node::new(1));
        cx.add_node(Node::new(2));
        cx.add_edge(Edge::new(10, 1, 2));
        cx.set_network_attribute("name", json!("Signalling"), None);
        cx.set_network_attribute("organism", json!("Human"), None);

        let summary = cx.summary();
        assert_eq!(summary.name, "Signalling");
        assert_eq!(summary.node_count, 2);
        assert_eq!(summary.edge_count, 1);
        assert_eq!(summary.properties.len(), 1);
        assert_eq!(summary.properties[0].predicate_string, "organism");
        assert_eq!(summary.properties[0].data_type.as_deref(), Some("string"));
    }

    #[test]
    fn test_summary_untitled() {
        assert_eq!(NiceCx::new().summary().name, "Untitled");
    }
}
