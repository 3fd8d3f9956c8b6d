//! # nicecx: CX networks and their renderer styles
//!
//! Reads CX aspect streams into an indexed network model, writes them back,
//! and translates CX visual properties into a selector/css stylesheet plus
//! element list for a Cytoscape.js-style renderer.
//!
//! ## Design Principles
//!
//! 1. **Pure transforms**: assembly, serialization and style translation are
//!    synchronous functions over in-memory values
//! 2. **Clean DTOs**: `NiceCx`, `Node`, `Edge`, `Attribute` cross all boundaries
//! 3. **One schema inside**: legacy and current aspect shapes are normalized at
//!    the edge, before any translation runs
//! 4. **Best effort**: unknown properties, bad values and dangling references
//!    degrade to defaults; only malformed input text is an error
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nicecx::{Network, StyleConfig};
//!
//! # fn example(text: &str) -> nicecx::Result<()> {
//! let network = Network::parse(text)?;
//! let rendering = network.render(&StyleConfig::default());
//!
//! for rule in &rendering.style {
//!     println!("{} {:?}", rule.selector, rule.css);
//! }
//! println!("{}", network.to_json()?);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod cx;
pub mod style;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Attribute, AttributeTable, DataType, DeclaredType, Edge, ElementId, FunctionTerm,
    MetaData, NetworkSummary, NiceCx, Node, VisualPropertyElement,
};

// ============================================================================
// Re-exports: CX streams
// ============================================================================

pub use cx::{assemble, parse_raw_cx, serialize, serialize_with, Fragment, RawCx, SerializeConfig};

// ============================================================================
// Re-exports: Style
// ============================================================================

pub use style::{
    build_elements, build_style, default_style, AttributeNameMap, Css, CssValue,
    Elements, StyleConfig, StyleRule,
};
pub use style::view::View;

use serde::Serialize;

// ============================================================================
// Top-level Network handle
// ============================================================================

/// An assembled network with conversions in both directions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    cx: NiceCx,
}

/// Everything a renderer needs for one network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendering {
    pub elements: Elements,
    pub style: Vec<StyleRule>,
    pub view: View,
}

impl Network {
    pub fn new(cx: NiceCx) -> Self {
        Self { cx }
    }

    /// Assemble from an already-split fragment stream.
    pub fn from_raw(raw: &[Fragment]) -> Self {
        Self::new(assemble(raw))
    }

    /// Parse and assemble CX JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::from_raw(&parse_raw_cx(text)?))
    }

    pub fn cx(&self) -> &NiceCx {
        &self.cx
    }

    pub fn cx_mut(&mut self) -> &mut NiceCx {
        &mut self.cx
    }

    pub fn into_inner(self) -> NiceCx {
        self.cx
    }

    pub fn to_raw(&self) -> RawCx {
        serialize(&self.cx)
    }

    pub fn to_json(&self) -> Result<String> {
        cx::to_json(&self.to_raw())
    }

    pub fn summary(&self) -> NetworkSummary {
        self.cx.summary()
    }

    /// Element list, stylesheet and view hints sharing one attribute-name
    /// map, so data keys and selectors agree.
    pub fn render(&self, config: &StyleConfig) -> Rendering {
        let mut names = AttributeNameMap::new();
        let elements = build_elements(&self.cx, &mut names);
        let style = build_style(&self.cx, &mut names, config);
        tracing::debug!(
            nodes = elements.nodes.len(),
            edges = elements.edges.len(),
            rules = style.len(),
            names = names.len(),
            "network rendered"
        );
        Rendering { elements, style, view: View::of(&self.cx) }
    }
}

impl From<NiceCx> for Network {
    fn from(cx: NiceCx) -> Self {
        Self::new(cx)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed mapping token {token:?} in definition {definition:?}")]
    MalformedDefinition { token: String, definition: String },

    #[error("Unknown mapping type: {0}")]
    UnknownMappingType(String),

    #[error("Invalid CX fragment: {0}")]
    InvalidFragment(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
