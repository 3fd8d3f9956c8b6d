//! Element identifiers and the generic identified element.

use serde::{Deserialize, Serialize};

/// Extra fields carried verbatim on an element.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Numeric CX element identifier (`@id`, `po`, `s`, `t`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl ElementId {
    /// Read an id out of a loosely typed JSON value.
    ///
    /// Accepts JSON integers and strings holding an integer, which is how
    /// `applies_to` shows up across producer versions.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(ElementId),
            serde_json::Value::String(s) => s.trim().parse().ok().map(ElementId),
            _ => None,
        }
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ElementId {
    fn from(v: i64) -> Self {
        ElementId(v)
    }
}

impl From<i32> for ElementId {
    fn from(v: i32) -> Self {
        ElementId(i64::from(v))
    }
}

/// An element indexed by `@id` whose remaining shape is not interpreted
/// (citations, supports).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedElement {
    #[serde(rename = "@id")]
    pub id: ElementId,
    #[serde(flatten)]
    pub fields: Fields,
}

impl IdentifiedElement {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self { id: id.into(), fields: Fields::new() }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_from_json() {
        assert_eq!(ElementId::from_json(&json!(7)), Some(ElementId(7)));
        assert_eq!(ElementId::from_json(&json!("12")), Some(ElementId(12)));
        assert_eq!(ElementId::from_json(&json!("n12")), None);
        assert_eq!(ElementId::from_json(&json!(null)), None);
    }

    #[test]
    fn test_identified_element_keeps_fields() {
        let el: IdentifiedElement =
            serde_json::from_value(json!({"@id": 3, "dc:title": "A paper"})).unwrap();
        assert_eq!(el.id, ElementId(3));
        assert_eq!(el.fields["dc:title"], json!("A paper"));
        assert_eq!(serde_json::to_value(&el).unwrap(), json!({"@id": 3, "dc:title": "A paper"}));
    }
}
