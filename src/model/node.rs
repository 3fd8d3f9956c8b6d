//! Node in the CX network.

use serde::{Deserialize, Serialize};
use super::{ElementId, Fields};

/// A `nodes` aspect element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "@id")]
    pub id: ElementId,
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "r", default, skip_serializing_if = "Option::is_none")]
    pub represents: Option<String>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Node {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            represents: None,
            extra: Fields::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_represents(mut self, represents: impl Into<String>) -> Self {
        self.represents = Some(represents.into());
        self
    }
}
