//! Edge in the CX network.

use serde::{Deserialize, Serialize};
use super::{ElementId, Fields};

/// An `edges` aspect element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(rename = "@id")]
    pub id: ElementId,
    #[serde(rename = "s")]
    pub source: ElementId,
    #[serde(rename = "t")]
    pub target: ElementId,
    #[serde(rename = "i", default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<String>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Edge {
    pub fn new(id: impl Into<ElementId>, source: impl Into<ElementId>, target: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            interaction: None,
            extra: Fields::new(),
        }
    }

    pub fn with_interaction(mut self, interaction: impl Into<String>) -> Self {
        self.interaction = Some(interaction.into());
        self
    }
}
