//! # CX aspect streams
//!
//! A raw CX network is an ordered array of fragments, each a single-key
//! object mapping an aspect name to an array of elements:
//!
//! ```text
//! [ {"numberVerification": [...]}, {"metaData": [...]}, {"nodes": [...]},
//!   {"edges": [...]}, ..., {"metaData": [...]}, {"status": [...]} ]
//! ```
//!
//! [`assemble`] turns such a stream into a [`NiceCx`](crate::model::NiceCx);
//! [`serialize`] goes back.

pub mod assemble;
pub mod serialize;

use serde_json::Value as JsonValue;

use crate::{Error, Result};

pub use assemble::assemble;
pub use serialize::{serialize, serialize_with, SerializeConfig};

/// One `{aspectName: [elements]}` object.
pub type Fragment = serde_json::Map<String, JsonValue>;

/// An ordered fragment stream.
pub type RawCx = Vec<Fragment>;

/// Build a single-aspect fragment.
pub fn fragment(aspect: impl Into<String>, elements: Vec<JsonValue>) -> Fragment {
    let mut f = Fragment::new();
    f.insert(aspect.into(), JsonValue::Array(elements));
    f
}

/// Parse CX JSON text into fragments. `null` entries are skipped.
pub fn parse_raw_cx(text: &str) -> Result<RawCx> {
    let entries: Vec<JsonValue> = serde_json::from_str(text)?;
    let mut raw = RawCx::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match entry {
            JsonValue::Object(map) => raw.push(map),
            JsonValue::Null => {}
            other => {
                return Err(Error::InvalidFragment(format!(
                    "entry {index} is a {}, expected an object",
                    json_kind(&other)
                )))
            }
        }
    }
    Ok(raw)
}

/// Render fragments back to CX JSON text.
pub fn to_json(raw: &[Fragment]) -> Result<String> {
    Ok(serde_json::to_string(raw)?)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
