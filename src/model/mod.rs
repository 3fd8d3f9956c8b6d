//! # CX Network Model
//!
//! Typed aspect elements and the assembled network ("niceCX") they live in.
//! This module is pure data: no I/O, no global state.

pub mod element;
pub mod node;
pub mod edge;
pub mod attribute;
pub mod metadata;
pub mod function_term;
pub mod visual;
pub mod nice_cx;
pub mod summary;

pub use element::{ElementId, Fields, IdentifiedElement};
pub use node::Node;
pub use edge::Edge;
pub use attribute::{Attribute, AttributeTable, DataType, DeclaredType};
pub use metadata::MetaData;
pub use function_term::{FunctionArg, FunctionTerm};
pub use visual::{MappingEntry, PropertiesOf, VisualPropertyElement};
pub use nice_cx::{AspectKind, NiceCx, RelationTable};
pub use summary::{NetworkSummary, SummaryProperty};
