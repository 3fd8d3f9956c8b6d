//! Network-level view hints from the `network` visual-property element.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{NiceCx, PropertiesOf};
use super::convert::{parse_integer, parse_number};
use super::elements::Position;

pub const NETWORK_BACKGROUND_PAINT: &str = "NETWORK_BACKGROUND_PAINT";
pub const NETWORK_SCALE_FACTOR: &str = "NETWORK_SCALE_FACTOR";
pub const NETWORK_CENTER_X_LOCATION: &str = "NETWORK_CENTER_X_LOCATION";
pub const NETWORK_CENTER_Y_LOCATION: &str = "NETWORK_CENTER_Y_LOCATION";

/// Initial viewport settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct View {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan: Option<Position>,
}

impl View {
    /// Decodes the visual-property aspect once for all three hints.
    pub fn of(cx: &NiceCx) -> Self {
        Self::from_properties(&network_properties(cx))
    }

    fn from_properties(properties: &BTreeMap<String, String>) -> Self {
        let get = |vp: &str| properties.get(vp).map(String::as_str);
        Self {
            background_color: get(NETWORK_BACKGROUND_PAINT).map(str::to_owned),
            zoom: get(NETWORK_SCALE_FACTOR).and_then(zoom_level),
            pan: match (get(NETWORK_CENTER_X_LOCATION), get(NETWORK_CENTER_Y_LOCATION)) {
                (Some(x), Some(y)) => Some(Position { x: parse_number(x), y: parse_number(y) }),
                _ => None,
            },
        }
    }
}

/// Properties of every `network` element merged in order, so with several
/// elements the last one wins per property.
pub fn network_properties(cx: &NiceCx) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    for element in cx.visual_properties().into_iter().flatten() {
        if element.kind() == PropertiesOf::Network {
            merged.extend(element.properties);
        }
    }
    merged
}

/// Value of one network visual property.
pub fn network_property(cx: &NiceCx, vp: &str) -> Option<String> {
    network_properties(cx).remove(vp)
}

/// Background color, as given.
pub fn background_color(cx: &NiceCx) -> Option<String> {
    View::of(cx).background_color
}

/// Zoom level, truncated to an integer. Zero counts as unset.
pub fn zoom(cx: &NiceCx) -> Option<i64> {
    View::of(cx).zoom
}

/// Pan offset; both coordinates must be present.
pub fn pan(cx: &NiceCx) -> Option<Position> {
    View::of(cx).pan
}

fn zoom_level(raw: &str) -> Option<i64> {
    let factor = parse_integer(raw);
    (factor.is_finite() && factor != 0.0).then_some(factor as i64)
}
