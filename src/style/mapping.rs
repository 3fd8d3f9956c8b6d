//! Mapping-definition parser.
//!
//! A definition is a comma-separated list of `key=value` tokens where a
//! doubled comma (`,,`) is a literal comma:
//!
//! ```text
//! COL=name,T=string,K=0=Node=1,V=0=#00FF99,K=1=Node,,2,V=1=#CC0099
//! ```
//!
//! Tokens with one `=` are top-level fields (`COL`, `T`, ...). Tokens with
//! more are per-point entries `<slot>=<index>=<payload>`, where only the
//! first two `=` are structural and the payload may contain more.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::model::DataType;
use crate::{Error, Result};

/// Mapping kind named by a mapping entry's `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingKind {
    Discrete,
    Continuous,
    Passthrough,
}

impl FromStr for MappingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DISCRETE" => Ok(MappingKind::Discrete),
            "CONTINUOUS" => Ok(MappingKind::Continuous),
            "PASSTHROUGH" => Ok(MappingKind::Passthrough),
            other => Err(Error::UnknownMappingType(other.to_owned())),
        }
    }
}

/// Per-point slot prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Discrete key (data value).
    K,
    /// Discrete value (visual value).
    V,
    /// Continuous visual value below the point.
    L,
    /// Continuous visual value at the point.
    E,
    /// Continuous visual value above the point.
    G,
    /// Continuous data value of the point.
    OV,
}

impl Slot {
    fn parse(prefix: &str) -> Option<Self> {
        Some(match prefix {
            "K" => Slot::K,
            "V" => Slot::V,
            "L" => Slot::L,
            "E" => Slot::E,
            "G" => Slot::G,
            "OV" => Slot::OV,
            _ => return None,
        })
    }
}

/// One indexed entry of `m`. Discrete mappings fill `k`/`v`, continuous
/// ones `l`/`e`/`g`/`ov`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingPoint {
    pub k: Option<String>,
    pub v: Option<String>,
    pub l: Option<String>,
    pub e: Option<String>,
    pub g: Option<String>,
    pub ov: Option<String>,
}

impl MappingPoint {
    fn set(&mut self, slot: Slot, payload: String) {
        let target = match slot {
            Slot::K => &mut self.k,
            Slot::V => &mut self.v,
            Slot::L => &mut self.l,
            Slot::E => &mut self.e,
            Slot::G => &mut self.g,
            Slot::OV => &mut self.ov,
        };
        *target = Some(payload);
    }
}

/// Parsed mapping descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingDefinition {
    /// Top-level fields (`COL`, `T`, ...).
    pub fields: BTreeMap<String, String>,
    /// Points by index, in index order.
    pub m: BTreeMap<u32, MappingPoint>,
}

impl MappingDefinition {
    /// Source column (`COL`).
    pub fn column(&self) -> Option<&str> {
        self.fields.get("COL").map(String::as_str)
    }

    /// Declared column type (`T`), if given.
    pub fn data_type(&self) -> Option<DataType> {
        self.fields.get("T").map(|t| DataType::parse(t))
    }
}

/// Split a definition on unescaped commas, unescaping `,,` inside tokens.
/// Empty tokens are dropped.
pub fn tokenize(definition: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = definition.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ',' {
            current.push(c);
            continue;
        }
        if chars.peek() == Some(&',') {
            chars.next();
            current.push(',');
        } else {
            tokens.push(std::mem::take(&mut current));
        }
    }
    tokens.push(current);
    tokens.retain(|t| !t.is_empty());
    tokens
}

/// Parse a mapping definition.
///
/// Fails with [`Error::MalformedDefinition`] on a token with more than one
/// `=` that is not `<K|V|L|E|G|OV>=<digits>=<payload>`.
pub fn parse(definition: &str) -> Result<MappingDefinition> {
    let mut def = MappingDefinition::default();

    for token in tokenize(definition) {
        let item = token.trim();
        match item.matches('=').count() {
            0 => tracing::trace!(token = %item, "mapping token without '=' ignored"),
            1 => {
                if let Some((key, value)) = item.split_once('=') {
                    def.fields.insert(key.to_owned(), value.to_owned());
                }
            }
            _ => {
                let (slot, index, payload) = point_entry(item).ok_or_else(|| Error::MalformedDefinition {
                    token: item.to_owned(),
                    definition: definition.to_owned(),
                })?;
                def.m.entry(index).or_default().set(slot, payload.to_owned());
            }
        }
    }

    Ok(def)
}

fn point_entry(item: &str) -> Option<(Slot, u32, &str)> {
    let (prefix, rest) = item.split_once('=')?;
    let slot = Slot::parse(prefix)?;
    let (index, payload) = rest.split_once('=')?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((slot, index.parse().ok()?, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_tokenize_escaped_commas() {
        assert_eq!(
            tokenize("COL=name,T=string,K=0=Node=1,V=0=#00FF99,K=1=Node,,2,V=1=#CC0099"),
            vec!["COL=name", "T=string", "K=0=Node=1", "V=0=#00FF99", "K=1=Node,2", "V=1=#CC0099"]
        );
        assert_eq!(tokenize("a,,,b"), vec!["a,", "b"]);
        assert_eq!(tokenize(",a,"), vec!["a"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_parse_discrete_with_escapes() {
        let def = parse("COL=name,T=string,K=0=Node=1,V=0=#00FF99,K=1=Node,,2,V=1=#CC0099").unwrap();
        assert_eq!(def.column(), Some("name"));
        assert_eq!(def.data_type(), Some(DataType::String));
        assert_eq!(def.m.len(), 2);
        assert_eq!(def.m[&0].k.as_deref(), Some("Node=1"));
        assert_eq!(def.m[&0].v.as_deref(), Some("#00FF99"));
        assert_eq!(def.m[&1].k.as_deref(), Some("Node,2"));
        assert_eq!(def.m[&1].v.as_deref(), Some("#CC0099"));
    }

    #[test]
    fn test_parse_continuous() {
        let def = parse("COL=weight,T=double,L=0=1.0,E=0=1.0,G=0=1.0,OV=0=0.0,L=1=8.0,E=1=8.0,G=1=1.0,OV=1=70.0")
            .unwrap();
        assert_eq!(def.data_type(), Some(DataType::Double));
        assert_eq!(
            def.m[&1],
            MappingPoint {
                l: Some("8.0".into()),
                e: Some("8.0".into()),
                g: Some("1.0".into()),
                ov: Some("70.0".into()),
                ..MappingPoint::default()
            }
        );
    }

    #[test]
    fn test_points_are_index_ordered() {
        let def = parse("COL=x,T=integer,K=10=a,V=10=1,K=2=b,V=2=2").unwrap();
        assert_eq!(def.m.keys().copied().collect::<Vec<_>>(), vec![2, 10]);
    }

    #[test]
    fn test_malformed_point_is_an_error() {
        let err = parse("COL=x,T=string,Q=0=a=b").unwrap_err();
        assert!(matches!(err, Error::MalformedDefinition { ref token, .. } if token == "Q=0=a=b"));
        assert!(parse("COL=x,K=one=a").is_err());
        assert!(parse("COL=x,K==a").is_err());
    }

    #[test]
    fn test_mapping_kind() {
        assert_eq!("DISCRETE".parse::<MappingKind>().unwrap(), MappingKind::Discrete);
        assert!(matches!("LINEAR".parse::<MappingKind>(), Err(Error::UnknownMappingType(_))));
    }

    proptest! {
        #[test]
        fn escaped_payloads_survive(key in "[ -~]{0,12}", value in "[ -~]{0,12}") {
            let escape = |s: &str| s.replace(',', ",,");
            let definition = format!("COL=c,T=string,K=0={},V=0={}", escape(&key), escape(&value));
            let def = parse(&definition).unwrap();
            prop_assert_eq!(def.m[&0].k.clone().unwrap_or_default(), key.trim_end().to_owned());
            prop_assert_eq!(def.m[&0].v.clone().unwrap_or_default(), value.trim_end().to_owned());
        }
    }
}
