//! `metaData` aspect elements.

use serde::{Deserialize, Serialize};
use super::Fields;

/// One per-aspect metadata entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_counter: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency_group: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<i64>,
    #[serde(default)]
    pub properties: Vec<serde_json::Value>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl MetaData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            element_count: None,
            id_counter: None,
            consistency_group: None,
            version: None,
            last_update: None,
            properties: Vec::new(),
            extra: Fields::new(),
        }
    }
}
