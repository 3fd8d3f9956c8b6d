//! [`NiceCx`] → raw fragments.
//!
//! Output order is fixed: `numberVerification`, pre-`metaData`, the core
//! aspects, opaque aspects by name, post-`metaData`, `status`. Missing
//! singleton blocks are filled in; empty aspects are left out.

use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use crate::model::nice_cx::{METADATA, NUMBER_VERIFICATION, STATUS};
use crate::model::*;
use super::{fragment, RawCx};

/// The CX number-verification sentinel (2^48 - 1).
pub const LONG_NUMBER: i64 = 281_474_976_710_655;

/// Knobs for [`serialize_with`].
#[derive(Debug, Clone, Default)]
pub struct SerializeConfig {
    /// `lastUpdate` stamped on computed metadata; wall clock when `None`.
    pub now_millis: Option<i64>,
}

/// Serialize with the default configuration.
pub fn serialize(cx: &NiceCx) -> RawCx {
    serialize_with(cx, &SerializeConfig::default())
}

pub fn serialize_with(cx: &NiceCx, config: &SerializeConfig) -> RawCx {
    let aspects = flatten_aspects(cx);
    let mut raw = RawCx::with_capacity(aspects.len() + 4);

    let number_verification = cx
        .number_verification
        .clone()
        .unwrap_or_else(|| vec![json!({ "longNumber": LONG_NUMBER })]);
    raw.push(fragment(NUMBER_VERIFICATION, number_verification));

    let pre_metadata = match &cx.pre_metadata {
        Some(md) => md.clone(),
        None => {
            let now = config.now_millis.unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
            compute_pre_metadata(&aspects, now)
        }
    };
    raw.push(fragment(METADATA, to_json_all(&pre_metadata)));

    for aspect in &aspects {
        raw.push(fragment(aspect.name.clone(), aspect.elements.clone()));
    }

    if let Some(post) = &cx.post_metadata {
        raw.push(fragment(METADATA, to_json_all(post)));
    }

    let status = cx
        .status
        .clone()
        .unwrap_or_else(|| vec![json!({ "error": "", "success": true })]);
    raw.push(fragment(STATUS, status));

    tracing::debug!(fragments = raw.len(), "network serialized");
    raw
}

/// One non-empty aspect, flattened back to elements.
struct FlatAspect {
    name: String,
    elements: Vec<JsonValue>,
    /// Highest `@id`, for identified aspects.
    id_counter: Option<i64>,
}

fn flatten_aspects(cx: &NiceCx) -> Vec<FlatAspect> {
    let mut out = Vec::new();

    push_identified(&mut out, AspectKind::Nodes, cx.nodes.iter());
    push_identified(&mut out, AspectKind::Edges, cx.edges.iter());
    push_identified(&mut out, AspectKind::Citations, cx.citations.iter());
    push_identified(&mut out, AspectKind::Supports, cx.supports.iter());

    push(&mut out, AspectKind::NodeAttributes, to_json_all(cx.node_attributes.iter()), None);
    push(&mut out, AspectKind::EdgeAttributes, to_json_all(cx.edge_attributes.iter()), None);

    push_relations(&mut out, AspectKind::NodeCitations, &cx.node_citations);
    push_relations(&mut out, AspectKind::EdgeCitations, &cx.edge_citations);
    push_relations(&mut out, AspectKind::NodeSupports, &cx.node_supports);
    push_relations(&mut out, AspectKind::EdgeSupports, &cx.edge_supports);

    push(&mut out, AspectKind::FunctionTerms, to_json_all(cx.function_terms.values()), None);

    for (name, elements) in &cx.opaque {
        if !elements.is_empty() {
            out.push(FlatAspect { name: name.clone(), elements: elements.clone(), id_counter: None });
        }
    }
    out
}

fn push_identified<'a, T: Serialize + 'a>(
    out: &mut Vec<FlatAspect>,
    kind: AspectKind,
    items: impl Iterator<Item = (&'a ElementId, &'a T)> + Clone,
) {
    let id_counter = items.clone().map(|(id, _)| id.0).max();
    push(out, kind, to_json_all(items.map(|(_, item)| item)), id_counter);
}

fn push_relations(out: &mut Vec<FlatAspect>, kind: AspectKind, table: &RelationTable) {
    let field = kind.relation_field().unwrap_or("citations");
    let elements = table
        .iter()
        .map(|(owner, related)| {
            let mut element = serde_json::Map::new();
            element.insert("po".into(), json!([owner.0]));
            element.insert(field.into(), json!(related.iter().map(|id| id.0).collect::<Vec<_>>()));
            JsonValue::Object(element)
        })
        .collect();
    push(out, kind, elements, None);
}

fn push(out: &mut Vec<FlatAspect>, kind: AspectKind, elements: Vec<JsonValue>, id_counter: Option<i64>) {
    if elements.is_empty() {
        return;
    }
    if let Some(name) = kind.name() {
        out.push(FlatAspect { name: name.to_owned(), elements, id_counter });
    }
}

/// Metadata for every emitted aspect: element count, plus the id counter
/// for `@id`-keyed aspects.
fn compute_pre_metadata(aspects: &[FlatAspect], now_millis: i64) -> Vec<MetaData> {
    aspects
        .iter()
        .map(|aspect| MetaData {
            element_count: Some(aspect.elements.len() as u64),
            id_counter: aspect.id_counter,
            consistency_group: Some(1),
            version: Some("1.0".to_owned()),
            last_update: Some(now_millis),
            ..MetaData::new(aspect.name.clone())
        })
        .collect()
}

fn to_json_all<'a, T: Serialize + 'a>(items: impl IntoIterator<Item = &'a T>) -> Vec<JsonValue> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::to_value(item) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(%err, "element failed to serialize");
                None
            }
        })
        .collect()
}
