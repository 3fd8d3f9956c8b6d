//! Visual-property aspect elements.
//!
//! Producers emit the aspect under either `cyVisualProperties` (current) or
//! `visualProperties` (legacy). Both decode into [`VisualPropertyElement`]
//! here, before any styling code looks at them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use super::{ElementId, Fields};

/// Current aspect name, preferred when both are present.
pub const CY_VISUAL_PROPERTIES: &str = "cyVisualProperties";
/// Legacy aspect name.
pub const VISUAL_PROPERTIES: &str = "visualProperties";

/// What a visual-property element styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertiesOf {
    Network,
    NodesDefault,
    EdgesDefault,
    /// Per-node bypass.
    Nodes,
    /// Per-edge bypass.
    Edges,
    Other(String),
}

impl PropertiesOf {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "network" => PropertiesOf::Network,
            "nodes:default" => PropertiesOf::NodesDefault,
            "edges:default" => PropertiesOf::EdgesDefault,
            "nodes" => PropertiesOf::Nodes,
            "edges" => PropertiesOf::Edges,
            other => PropertiesOf::Other(other.to_owned()),
        }
    }
}

/// A data-driven rule attached to one visual property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualPropertyElement {
    pub properties_of: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "scalar_properties")]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub mappings: BTreeMap<String, MappingEntry>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl VisualPropertyElement {
    pub fn new(properties_of: impl Into<String>) -> Self {
        Self {
            properties_of: properties_of.into(),
            applies_to: None,
            view: None,
            properties: BTreeMap::new(),
            mappings: BTreeMap::new(),
            dependencies: BTreeMap::new(),
            extra: Fields::new(),
        }
    }

    pub fn kind(&self) -> PropertiesOf {
        PropertiesOf::parse(&self.properties_of)
    }

    pub fn target(&self) -> Option<ElementId> {
        self.applies_to.as_ref().and_then(ElementId::from_json)
    }

    pub fn property(&self, vp: &str) -> Option<&str> {
        self.properties.get(vp).map(String::as_str)
    }

    /// A dependency flag; `"true"` (any case) or JSON `true` is set,
    /// anything else, including absence, is not.
    pub fn flag(&self, name: &str) -> bool {
        match self.dependencies.get(name) {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn with_property(mut self, vp: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(vp.into(), value.into());
        self
    }

    pub fn with_mapping(mut self, vp: impl Into<String>, kind: impl Into<String>, definition: impl Into<String>) -> Self {
        self.mappings.insert(
            vp.into(),
            MappingEntry { kind: kind.into(), definition: definition.into() },
        );
        self
    }

    pub fn with_dependency(mut self, name: impl Into<String>, value: bool) -> Self {
        self.dependencies.insert(name.into(), serde_json::Value::String(value.to_string()));
        self
    }

    pub fn applying_to(mut self, id: impl Into<ElementId>) -> Self {
        self.applies_to = Some(serde_json::Value::from(id.into().0));
        self
    }
}

/// Property values are strings in CX. Numbers and booleans are taken as
/// their text; any other value drops just that entry.
fn scalar_properties<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(vp, value)| match value {
            serde_json::Value::String(text) => Some((vp, text)),
            serde_json::Value::Number(n) => Some((vp, n.to_string())),
            serde_json::Value::Bool(b) => Some((vp, b.to_string())),
            other => {
                tracing::warn!(vp = vp.as_str(), value = %other, "skipping non-scalar visual property value");
                None
            }
        })
        .collect())
}

/// Decode raw visual-property elements, dropping the ones that do not decode.
pub fn decode_elements(raw: &[serde_json::Value]) -> Vec<VisualPropertyElement> {
    raw.iter()
        .filter_map(|value| match serde_json::from_value(value.clone()) {
            Ok(element) => Some(element),
            Err(err) => {
                tracing::warn!(%err, "skipping undecodable visual property element");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_default_element() {
        let raw = vec![json!({
            "properties_of": "nodes:default",
            "properties": {"NODE_FILL_COLOR": "#FF0000"},
            "dependencies": {"nodeSizeLocked": "TRUE"},
            "mappings": {
                "NODE_LABEL": {"type": "PASSTHROUGH", "definition": "COL=name,T=string"}
            }
        })];
        let decoded = decode_elements(&raw);
        assert_eq!(decoded.len(), 1);
        let el = &decoded[0];
        assert_eq!(el.kind(), PropertiesOf::NodesDefault);
        assert_eq!(el.property("NODE_FILL_COLOR"), Some("#FF0000"));
        assert!(el.flag("nodeSizeLocked"));
        assert!(!el.flag("arrowColorMatchesEdge"));
        assert_eq!(el.mappings["NODE_LABEL"].kind, "PASSTHROUGH");
    }

    #[test]
    fn test_bypass_target() {
        let raw = vec![
            json!({"properties_of": "nodes", "applies_to": 12, "properties": {}}),
            json!({"properties_of": "edges", "applies_to": "7"}),
            json!({"no_properties_of": true}),
        ];
        let decoded = decode_elements(&raw);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].target(), Some(ElementId(12)));
        assert_eq!(decoded[1].target(), Some(ElementId(7)));
        assert_eq!(decoded[1].kind(), PropertiesOf::Edges);
    }

    #[test]
    fn test_odd_property_values_drop_only_themselves() {
        let raw = vec![json!({
            "properties_of": "nodes:default",
            "properties": {
                "NODE_FILL_COLOR": "#00FF00",
                "NODE_WIDTH": 40,
                "NODE_VISIBLE": true,
                "NODE_CUSTOMGRAPHICS_1": {"nested": []},
                "NODE_LABEL": null
            }
        })];
        let decoded = decode_elements(&raw);
        assert_eq!(decoded.len(), 1);
        let el = &decoded[0];
        assert_eq!(el.property("NODE_FILL_COLOR"), Some("#00FF00"));
        assert_eq!(el.property("NODE_WIDTH"), Some("40"));
        assert_eq!(el.property("NODE_VISIBLE"), Some("true"));
        assert_eq!(el.property("NODE_CUSTOMGRAPHICS_1"), None);
        assert_eq!(el.properties.len(), 3);

        let empty = decode_elements(&[json!({"properties_of": "network", "properties": null})]);
        assert!(empty[0].properties.is_empty());
    }
}
