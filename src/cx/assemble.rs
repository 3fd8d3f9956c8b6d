//! Raw fragments → [`NiceCx`].
//!
//! Aspect order in the stream only matters for the singleton blocks:
//! the first `numberVerification` and `status` win, the first `metaData` is
//! the pre-metadata and the second the post-metadata. Everything else is
//! order-independent except that a later element with the same key replaces
//! an earlier one.

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use smallvec::SmallVec;

use crate::model::*;
use super::Fragment;

/// Assemble an ordered fragment stream into an indexed network.
///
/// Elements missing the keys their aspect needs are logged and dropped;
/// nothing here fails.
pub fn assemble(raw: &[Fragment]) -> NiceCx {
    let mut cx = NiceCx::new();

    for fragment in raw {
        for (aspect, payload) in fragment {
            let kind = AspectKind::of(aspect);
            let elements = elements_of(payload);
            match kind {
                AspectKind::NumberVerification => {
                    if cx.number_verification.is_none() {
                        cx.number_verification = Some(elements.to_vec());
                    }
                }
                AspectKind::Status => {
                    if cx.status.is_none() {
                        cx.status = Some(elements.to_vec());
                    }
                }
                AspectKind::MetaData => {
                    if cx.pre_metadata.is_none() {
                        cx.pre_metadata = Some(decode_all(aspect, elements));
                    } else if cx.post_metadata.is_none() {
                        cx.post_metadata = Some(decode_all(aspect, elements));
                    } else {
                        tracing::debug!("ignoring metaData block beyond pre and post");
                    }
                }
                _ => {
                    for element in elements {
                        add_element(&mut cx, kind, aspect, element);
                    }
                }
            }
            tracing::trace!(aspect = %aspect, elements = elements.len(), "fragment assembled");
        }
    }

    tracing::debug!(
        nodes = cx.nodes.len(),
        edges = cx.edges.len(),
        node_attributes = cx.node_attributes.len(),
        edge_attributes = cx.edge_attributes.len(),
        opaque_aspects = cx.opaque.len(),
        "network assembled"
    );
    cx
}

fn elements_of(payload: &JsonValue) -> &[JsonValue] {
    match payload {
        JsonValue::Array(items) => items,
        other => std::slice::from_ref(other),
    }
}

fn add_element(cx: &mut NiceCx, kind: AspectKind, aspect: &str, element: &JsonValue) {
    match kind {
        AspectKind::Nodes => {
            if let Some(node) = decode::<Node>(aspect, element) {
                cx.nodes.insert(node.id, node);
            }
        }
        AspectKind::Edges => {
            if let Some(edge) = decode::<Edge>(aspect, element) {
                cx.edges.insert(edge.id, edge);
            }
        }
        AspectKind::Citations => {
            if let Some(citation) = decode::<IdentifiedElement>(aspect, element) {
                cx.citations.insert(citation.id, citation);
            }
        }
        AspectKind::Supports => {
            if let Some(support) = decode::<IdentifiedElement>(aspect, element) {
                cx.supports.insert(support.id, support);
            }
        }
        AspectKind::NodeAttributes => {
            if let Some(attribute) = decode::<Attribute>(aspect, element) {
                cx.node_attributes.insert(attribute);
            }
        }
        AspectKind::EdgeAttributes => {
            if let Some(attribute) = decode::<Attribute>(aspect, element) {
                cx.edge_attributes.insert(attribute);
            }
        }
        AspectKind::NodeCitations
        | AspectKind::EdgeCitations
        | AspectKind::NodeSupports
        | AspectKind::EdgeSupports => {
            let table = match kind {
                AspectKind::NodeCitations => &mut cx.node_citations,
                AspectKind::EdgeCitations => &mut cx.edge_citations,
                AspectKind::NodeSupports => &mut cx.node_supports,
                _ => &mut cx.edge_supports,
            };
            let field = kind.relation_field().unwrap_or("citations");
            add_relation(table, element, field);
        }
        AspectKind::FunctionTerms => {
            if let Some(term) = decode::<FunctionTerm>(aspect, element) {
                match term.po {
                    Some(owner) => {
                        cx.function_terms.insert(owner, term);
                    }
                    None => tracing::warn!("function term without po dropped"),
                }
            }
        }
        AspectKind::Opaque => {
            cx.opaque.entry(aspect.to_owned()).or_default().push(element.clone());
        }
        AspectKind::NumberVerification | AspectKind::MetaData | AspectKind::Status => {}
    }
}

/// Relate every owner in `po` to the ids in `field`, appending to any
/// ids the owner already has.
fn add_relation(table: &mut RelationTable, element: &JsonValue, field: &str) {
    let owners = ids(element.get("po"));
    let related = ids(element.get(field));
    if owners.is_empty() {
        tracing::warn!(field, "relation element without po dropped");
        return;
    }
    for owner in owners {
        table.entry(owner).or_default().extend(related.iter().copied());
    }
}

/// A single id or an array of ids.
fn ids(value: Option<&JsonValue>) -> SmallVec<[ElementId; 4]> {
    match value {
        Some(JsonValue::Array(items)) => items.iter().filter_map(ElementId::from_json).collect(),
        Some(single) => ElementId::from_json(single).into_iter().collect(),
        None => SmallVec::new(),
    }
}

fn decode<T: DeserializeOwned>(aspect: &str, element: &JsonValue) -> Option<T> {
    match serde_json::from_value(element.clone()) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            tracing::warn!(aspect = %aspect, %err, "dropping undecodable element");
            None
        }
    }
}

fn decode_all<T: DeserializeOwned>(aspect: &str, elements: &[JsonValue]) -> Vec<T> {
    elements.iter().filter_map(|e| decode(aspect, e)).collect()
}
