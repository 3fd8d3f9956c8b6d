//! Node and edge attributes.
//!
//! Attribute aspects are not flat lists once assembled: they are keyed per
//! owner, then per attribute name, so a later element for the same
//! `(owner, name)` replaces the earlier one.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use super::{ElementId, Fields};

/// Declared CX attribute data type (`d`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Integer,
    Long,
    Short,
    String,
    ListOf(Box<DataType>),
    /// Anything outside the CX vocabulary, kept verbatim.
    Other(String),
}

impl DataType {
    pub fn parse(raw: &str) -> Self {
        let lower = raw.to_ascii_lowercase();
        if let Some(inner) = lower.strip_prefix("list_of_") {
            return match DataType::scalar(inner) {
                Some(scalar) => DataType::ListOf(Box::new(scalar)),
                None => DataType::Other(raw.to_owned()),
            };
        }
        DataType::scalar(&lower).unwrap_or_else(|| DataType::Other(raw.to_owned()))
    }

    fn scalar(lower: &str) -> Option<Self> {
        Some(match lower {
            "boolean" => DataType::Boolean,
            "byte" => DataType::Byte,
            "char" => DataType::Char,
            "double" => DataType::Double,
            "float" => DataType::Float,
            "integer" => DataType::Integer,
            "long" => DataType::Long,
            "short" => DataType::Short,
            "string" => DataType::String,
            _ => return None,
        })
    }

    /// byte, double, float, integer, long, short.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Byte
                | DataType::Double
                | DataType::Float
                | DataType::Integer
                | DataType::Long
                | DataType::Short
        )
    }

    pub fn is_list(&self) -> bool {
        matches!(self, DataType::ListOf(_))
    }

    /// Whether selector literals of this type are quoted (`'value'`).
    pub fn is_quoted(&self) -> bool {
        matches!(self, DataType::String | DataType::Boolean)
    }
}

impl Default for DataType {
    fn default() -> Self {
        DataType::String
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => write!(f, "boolean"),
            DataType::Byte => write!(f, "byte"),
            DataType::Char => write!(f, "char"),
            DataType::Double => write!(f, "double"),
            DataType::Float => write!(f, "float"),
            DataType::Integer => write!(f, "integer"),
            DataType::Long => write!(f, "long"),
            DataType::Short => write!(f, "short"),
            DataType::String => write!(f, "string"),
            DataType::ListOf(inner) => write!(f, "list_of_{inner}"),
            DataType::Other(raw) => write!(f, "{raw}"),
        }
    }
}

impl From<String> for DataType {
    fn from(raw: String) -> Self {
        DataType::parse(&raw)
    }
}

impl From<&str> for DataType {
    fn from(raw: &str) -> Self {
        DataType::parse(raw)
    }
}

impl From<DataType> for String {
    fn from(dt: DataType) -> Self {
        dt.to_string()
    }
}

/// A `d` value as read: the parsed type plus the spelling it arrived with,
/// which is what gets written back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DeclaredType {
    kind: DataType,
    spelling: String,
}

impl DeclaredType {
    pub fn kind(&self) -> &DataType {
        &self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.spelling
    }
}

impl From<String> for DeclaredType {
    fn from(spelling: String) -> Self {
        Self { kind: DataType::parse(&spelling), spelling }
    }
}

impl From<&str> for DeclaredType {
    fn from(spelling: &str) -> Self {
        Self::from(spelling.to_owned())
    }
}

impl From<DataType> for DeclaredType {
    fn from(kind: DataType) -> Self {
        Self { spelling: kind.to_string(), kind }
    }
}

impl From<DeclaredType> for String {
    fn from(declared: DeclaredType) -> Self {
        declared.spelling
    }
}

/// A `nodeAttributes` / `edgeAttributes` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "po")]
    pub owner: ElementId,
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "v")]
    pub value: serde_json::Value,
    #[serde(rename = "d", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DeclaredType>,
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub subnetwork: Option<i64>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Attribute {
    pub fn new(owner: impl Into<ElementId>, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            value: value.into(),
            data_type: None,
            subnetwork: None,
            extra: Fields::new(),
        }
    }

    pub fn with_type(mut self, data_type: impl Into<DeclaredType>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    /// The declared type; an absent `d` means string.
    pub fn declared_type(&self) -> DataType {
        self.data_type.as_ref().map(|d| d.kind().clone()).unwrap_or_default()
    }
}

/// Two-level attribute index: `owner → name → attribute`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTable {
    by_owner: BTreeMap<ElementId, BTreeMap<String, Attribute>>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert, replacing any attribute with the same owner and name.
    pub fn insert(&mut self, attribute: Attribute) {
        self.by_owner
            .entry(attribute.owner)
            .or_default()
            .insert(attribute.name.clone(), attribute);
    }

    pub fn get(&self, owner: ElementId, name: &str) -> Option<&Attribute> {
        self.by_owner.get(&owner).and_then(|attrs| attrs.get(name))
    }

    pub fn for_owner(&self, owner: ElementId) -> Option<&BTreeMap<String, Attribute>> {
        self.by_owner.get(&owner)
    }

    /// Owners in ascending id order with their attributes.
    pub fn owners(&self) -> impl Iterator<Item = (ElementId, &BTreeMap<String, Attribute>)> {
        self.by_owner.iter().map(|(id, attrs)| (*id, attrs))
    }

    /// Every attribute, owner by owner.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.by_owner.values().flat_map(|attrs| attrs.values())
    }

    /// Total attribute count across all owners.
    pub fn len(&self) -> usize {
        self.by_owner.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_owner.is_empty()
    }
}
