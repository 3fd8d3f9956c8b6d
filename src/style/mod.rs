//! # Style translation
//!
//! Turns the CX visual-property aspect into an ordered list of
//! `{selector, css}` rules for a Cytoscape.js-style renderer, plus the
//! element list and view hints the renderer needs alongside.
//!
//! ```text
//! NiceCx ──► names (AttributeNameMap) ──► elements::build_elements
//!                     │
//!                     └──────────────────► engine::build_style
//!                                             ├── mapping::parse
//!                                             ├── convert / font / label
//!                                             └── continuous
//! ```
//!
//! Every lookup table is immutable data behind a `match`. The only state
//! threaded through a conversion is the attribute-name map.

pub mod continuous;
pub mod convert;
pub mod elements;
pub mod engine;
pub mod font;
pub mod label;
pub mod mapping;
pub mod names;
pub mod view;
pub mod vocab;

use serde::Serialize;

pub use convert::{Css, CssValue};
pub use elements::{all_nodes_have_unique_positions, build_elements, EdgeElement, Elements, NodeElement, Position};
pub use engine::build_style;
pub use label::{Alignment, Anchor};
pub use mapping::{MappingDefinition, MappingKind, MappingPoint};
pub use names::AttributeNameMap;
pub use vocab::{ValueKind, VisualProperty};

/// One stylesheet rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    pub selector: String,
    pub css: Css,
}

impl StyleRule {
    pub fn new(selector: impl Into<String>, css: Css) -> Self {
        Self { selector: selector.into(), css }
    }

    pub fn get(&self, property: &str) -> Option<&CssValue> {
        self.css.get(property)
    }
}

/// Style translation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Use the shared value instead of `mapData(...)` between two continuous
    /// breakpoints whose equal-values are identical.
    pub collapse_equal_stops: bool,
    /// `font-family` for faces with no known web font stack.
    pub fallback_font_family: String,
    /// `curve-style` for the default edge rule when none is set.
    pub default_curve_style: Option<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            collapse_equal_stops: true,
            fallback_font_family: "sans-serif".to_owned(),
            default_curve_style: Some("bezier".to_owned()),
        }
    }
}

/// Stylesheet for networks that carry no visual properties.
pub fn default_style() -> Vec<StyleRule> {
    fn css<const N: usize>(entries: [(&str, CssValue); N]) -> Css {
        entries.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
    }

    vec![
        StyleRule::new(
            "node",
            css([
                ("background-color", "#f6eecb".into()),
                ("background-opacity", 0.8.into()),
                ("width", "40px".into()),
                ("height", "40px".into()),
                ("label", "data(name)".into()),
                ("font-family", "Roboto, sans-serif".into()),
            ]),
        ),
        StyleRule::new(
            "edge",
            css([
                ("line-color", "#75736c".into()),
                ("width", "2px".into()),
                ("font-family", "Roboto, sans-serif".into()),
                ("text-opacity", 0.8.into()),
                ("curve-style", "bezier".into()),
            ]),
        ),
        StyleRule::new(
            "node:selected",
            css([("color", "#fb1605".into()), ("background-color", "yellow".into())]),
        ),
        StyleRule::new(
            "edge:selected",
            css([
                ("label", "data(interaction)".into()),
                ("color", "#fb1605".into()),
                ("line-color", "yellow".into()),
                ("width", 6.0.into()),
            ]),
        ),
    ]
}
