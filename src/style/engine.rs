//! Stylesheet construction from the visual-property aspect.
//!
//! Rules come out in cascade order: node defaults, node mappings, node
//! bypasses, edge defaults, edge mappings, edge bypasses, then the
//! `node:selected` and `edge:selected` overrides.

use tracing::{debug, trace, warn};

use crate::model::{MappingEntry, NiceCx, PropertiesOf, VisualPropertyElement};
use super::continuous::continuous_rules;
use super::convert::{self, Css, CssValue};
use super::label;
use super::mapping::{self, MappingDefinition, MappingKind};
use super::names::AttributeNameMap;
use super::vocab::{StyleTarget, ValueKind, VisualProperty};
use super::{default_style, StyleConfig, StyleRule};

/// Dependency flag locking node width and height together.
pub const NODE_SIZE_LOCKED: &str = "nodeSizeLocked";
/// Dependency flag making arrow colors follow the edge color.
pub const ARROW_COLOR_MATCHES_EDGE: &str = "arrowColorMatchesEdge";

#[derive(Debug, Default)]
struct Groups {
    node_defaults: Vec<StyleRule>,
    node_mappings: Vec<StyleRule>,
    node_bypasses: Vec<StyleRule>,
    edge_defaults: Vec<StyleRule>,
    edge_mappings: Vec<StyleRule>,
    edge_bypasses: Vec<StyleRule>,
    node_selected: Vec<StyleRule>,
    edge_selected: Vec<StyleRule>,
}

impl Groups {
    fn into_rules(self) -> Vec<StyleRule> {
        [
            self.node_defaults,
            self.node_mappings,
            self.node_bypasses,
            self.edge_defaults,
            self.edge_mappings,
            self.edge_bypasses,
            self.node_selected,
            self.edge_selected,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Build the stylesheet for `cx`.
///
/// Mapping columns are resolved through `names`. A map that is not yet
/// finalized is prepared from the model's attributes first, so selectors
/// match the data keys of [`build_elements`](super::build_elements). A
/// model without a visual-property aspect gets [`default_style`].
pub fn build_style(cx: &NiceCx, names: &mut AttributeNameMap, config: &StyleConfig) -> Vec<StyleRule> {
    names.prepare(cx);
    let Some(elements) = cx.visual_properties() else {
        debug!("no visual properties, using the default style");
        return default_style();
    };

    let mut builder = StyleBuilder { cx, names, config, groups: Groups::default() };
    for element in &elements {
        match element.kind() {
            PropertiesOf::NodesDefault => builder.node_defaults(element),
            PropertiesOf::EdgesDefault => builder.edge_defaults(element),
            PropertiesOf::Nodes => builder.node_bypass(element),
            PropertiesOf::Edges => builder.edge_bypass(element),
            PropertiesOf::Network => {}
            PropertiesOf::Other(kind) => debug!(%kind, "ignoring visual property element"),
        }
    }

    let rules = builder.groups.into_rules();
    debug!(rules = rules.len(), "style built");
    rules
}

struct StyleBuilder<'a> {
    cx: &'a NiceCx,
    names: &'a mut AttributeNameMap,
    config: &'a StyleConfig,
    groups: Groups,
}

impl StyleBuilder<'_> {
    fn node_defaults(&mut self, element: &VisualPropertyElement) {
        let size_locked = element.flag(NODE_SIZE_LOCKED);
        let mut css = Css::new();
        let mut position = None;
        let mut size = None;

        for (name, value) in &element.properties {
            let Some(vp) = known(name) else { continue };
            match vp {
                VisualProperty::NodeLabelPosition => position = Some(value.as_str()),
                VisualProperty::NodeSize => size = Some(value.as_str()),
                VisualProperty::NodeSelectedPaint => {
                    let mut selected = Css::new();
                    selected.insert("background-color".to_owned(), CssValue::text(convert::color(value)));
                    self.groups.node_selected.push(StyleRule::new("node:selected", selected));
                }
                VisualProperty::NodeLabelWidth => {
                    css.insert("text-wrap".to_owned(), CssValue::text("wrap"));
                    css.insert("text-max-width".to_owned(), CssValue::Number(convert::parse_number(value)));
                }
                vp => self.apply(vp, value, &mut css),
            }
        }

        if size_locked {
            if let Some(size) = size {
                self.apply(VisualProperty::NodeSize, size, &mut css);
            }
        }
        convert::apply_alignment(label::label_position(position), &mut css);
        self.groups.node_defaults.push(StyleRule::new("node", css));

        for (name, entry) in &element.mappings {
            let Some(vp) = known(name) else { continue };
            let suppressed = match vp {
                VisualProperty::NodeWidth | VisualProperty::NodeHeight => size_locked,
                VisualProperty::NodeSize => !size_locked,
                _ => false,
            };
            if suppressed {
                trace!(vp = name.as_str(), size_locked, "node size mapping suppressed");
                continue;
            }
            let rules = self.mapping_rules("node", vp, entry);
            self.groups.node_mappings.extend(rules);
        }
    }

    fn edge_defaults(&mut self, element: &VisualPropertyElement) {
        let arrows_locked = element.flag(ARROW_COLOR_MATCHES_EDGE);
        let mut css = Css::new();
        let mut selected = Css::new();

        for (name, value) in &element.properties {
            let Some(vp) = known(name) else { continue };
            let selected_attribute = match vp {
                VisualProperty::EdgeStrokeSelectedPaint => Some("line-color"),
                VisualProperty::EdgeSourceArrowSelectedPaint => Some("source-arrow-color"),
                VisualProperty::EdgeTargetArrowSelectedPaint => Some("target-arrow-color"),
                _ => None,
            };
            if let Some(attribute) = selected_attribute {
                selected.insert(attribute.to_owned(), CssValue::text(convert::color(value)));
                continue;
            }
            if !edge_color_applies(vp, arrows_locked) {
                continue;
            }
            if arrows_locked && vp == VisualProperty::EdgeUnselectedPaint {
                self.apply(VisualProperty::EdgeSourceArrowUnselectedPaint, value, &mut css);
                self.apply(VisualProperty::EdgeTargetArrowUnselectedPaint, value, &mut css);
            }
            self.apply(vp, value, &mut css);
        }

        if let Some(curve) = &self.config.default_curve_style {
            css.entry("curve-style".to_owned()).or_insert_with(|| CssValue::text(curve.as_str()));
        }
        if !selected.is_empty() {
            self.groups.edge_selected.push(StyleRule::new("edge:selected", selected));
        }
        self.groups.edge_defaults.push(StyleRule::new("edge", css));

        for (name, entry) in &element.mappings {
            let Some(vp) = known(name) else { continue };
            if arrows_locked {
                if !edge_color_applies(vp, true) {
                    continue;
                }
                if vp == VisualProperty::EdgeUnselectedPaint {
                    let target = self.mapping_rules("edge", VisualProperty::EdgeTargetArrowUnselectedPaint, entry);
                    let source = self.mapping_rules("edge", VisualProperty::EdgeSourceArrowUnselectedPaint, entry);
                    self.groups.edge_mappings.extend(target);
                    self.groups.edge_mappings.extend(source);
                }
            }
            let rules = self.mapping_rules("edge", vp, entry);
            self.groups.edge_mappings.extend(rules);
        }
    }

    fn node_bypass(&mut self, element: &VisualPropertyElement) {
        let Some(id) = element.target().filter(|id| self.cx.nodes.contains_key(id)) else {
            debug!(applies_to = ?element.applies_to, "node bypass for a missing node skipped");
            return;
        };
        let css = self.bypass_css(element);
        self.groups.node_bypasses.push(StyleRule::new(format!("node[ id = '{id}' ]"), css));
    }

    fn edge_bypass(&mut self, element: &VisualPropertyElement) {
        let Some(id) = element.target().filter(|id| self.cx.edges.contains_key(id)) else {
            debug!(applies_to = ?element.applies_to, "edge bypass for a missing edge skipped");
            return;
        };
        let css = self.bypass_css(element);
        self.groups.edge_bypasses.push(StyleRule::new(format!("edge[ id = 'e{id}' ]"), css));
    }

    fn bypass_css(&self, element: &VisualPropertyElement) -> Css {
        let mut css = Css::new();
        for (name, value) in &element.properties {
            let Some(vp) = known(name) else { continue };
            let is_font = matches!(vp, VisualProperty::NodeLabelFontFace | VisualProperty::EdgeLabelFontFace);
            if is_font && value.is_empty() {
                continue;
            }
            self.apply(vp, value, &mut css);
        }
        css
    }

    fn apply(&self, vp: VisualProperty, value: &str, css: &mut Css) {
        for &target in vp.targets() {
            convert::apply(target, value, css, &self.config.fallback_font_family);
        }
    }

    /// Rules for one mapping. A definition that does not parse, or names no
    /// column, yields no rules.
    fn mapping_rules(&mut self, element_type: &str, vp: VisualProperty, entry: &MappingEntry) -> Vec<StyleRule> {
        let parsed = entry
            .kind
            .parse::<MappingKind>()
            .and_then(|kind| mapping::parse(&entry.definition).map(|def| (kind, def)));
        let (kind, def) = match parsed {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(?vp, %err, "skipping mapping");
                return Vec::new();
            }
        };
        let Some(column) = def.column() else {
            warn!(?vp, definition = %entry.definition, "mapping without a column skipped");
            return Vec::new();
        };
        let attribute = self.names.resolve(column);

        let mut rules = Vec::new();
        for &target in vp.targets() {
            match kind {
                MappingKind::Discrete => rules.extend(self.discrete_rules(element_type, &attribute, target, &def)),
                MappingKind::Continuous if target.kind.is_scalar() => rules.extend(continuous_rules(
                    element_type,
                    &attribute,
                    target,
                    &def,
                    self.config.collapse_equal_stops,
                )),
                MappingKind::Continuous => {
                    debug!(?vp, "continuous mapping over a non-scalar property skipped");
                }
                MappingKind::Passthrough => match passthrough_rule(element_type, &attribute, target) {
                    Some(rule) => rules.push(rule),
                    None => debug!(?vp, "passthrough mapping over a label position skipped"),
                },
            }
        }
        rules
    }

    fn discrete_rules(
        &self,
        element_type: &str,
        attribute: &str,
        target: StyleTarget,
        def: &MappingDefinition,
    ) -> Vec<StyleRule> {
        let quoted = def.data_type().is_some_and(|t| t.is_quoted());
        def.m
            .values()
            .map(|point| {
                let key = point.k.as_deref().unwrap_or_default();
                let value = point.v.as_deref().unwrap_or_default();
                let selector = if quoted {
                    format!("{element_type}[{attribute} = '{key}']")
                } else {
                    format!("{element_type}[{attribute} = {key}]")
                };
                let mut css = Css::new();
                convert::apply(target, value, &mut css, &self.config.fallback_font_family);
                StyleRule::new(selector, css)
            })
            .collect()
    }
}

/// Whether an edge color property takes part given the arrow-color lock.
/// Locked, the stroke and explicit arrow colors yield to the edge paint;
/// unlocked, the edge paint yields to them.
fn edge_color_applies(vp: VisualProperty, arrows_locked: bool) -> bool {
    match vp {
        VisualProperty::EdgeStrokeUnselectedPaint
        | VisualProperty::EdgeSourceArrowUnselectedPaint
        | VisualProperty::EdgeTargetArrowUnselectedPaint => !arrows_locked,
        VisualProperty::EdgeUnselectedPaint => arrows_locked,
        _ => true,
    }
}

fn passthrough_rule(element_type: &str, attribute: &str, target: StyleTarget) -> Option<StyleRule> {
    let property = match target.kind {
        ValueKind::LabelPosition => return None,
        ValueKind::FontFamily => "font-family",
        _ => target.attribute,
    };
    let mut css = Css::new();
    css.insert(property.to_owned(), CssValue::Text(format!("data({attribute})")));
    Some(StyleRule::new(format!("{element_type}[{attribute}]"), css))
}

fn known(name: &str) -> Option<VisualProperty> {
    let vp = VisualProperty::parse(name);
    if vp.is_none() {
        trace!(vp = name, "unknown visual property skipped");
    }
    vp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Node};
    use crate::model::visual::CY_VISUAL_PROPERTIES;
    use pretty_assertions::assert_eq;

    fn network(elements: Vec<VisualPropertyElement>) -> NiceCx {
        let mut cx = NiceCx::new();
        cx.add_node(Node::new(1));
        cx.add_node(Node::new(2));
        cx.add_edge(Edge::new(5, 1, 2));
        cx.opaque.insert(
            CY_VISUAL_PROPERTIES.to_owned(),
            elements.iter().map(|e| serde_json::to_value(e).unwrap()).collect(),
        );
        cx
    }

    fn style(elements: Vec<VisualPropertyElement>) -> Vec<StyleRule> {
        build_style(&network(elements), &mut AttributeNameMap::new(), &StyleConfig::default())
    }

    fn rule<'a>(rules: &'a [StyleRule], selector: &str) -> &'a StyleRule {
        rules.iter().find(|r| r.selector == selector).unwrap()
    }

    #[test]
    fn test_no_visual_properties_gives_default_style() {
        let rules = build_style(&NiceCx::new(), &mut AttributeNameMap::new(), &StyleConfig::default());
        assert_eq!(rules, default_style());
    }

    #[test]
    fn test_node_defaults() {
        let rules = style(vec![
            VisualPropertyElement::new("nodes:default")
                .with_property("NODE_FILL_COLOR", "#FF0000")
                .with_property("NODE_TRANSPARENCY", "128")
                .with_property("NODE_SHAPE", "ROUND_RECTANGLE")
                .with_property("NODE_LABEL_POSITION", "N,E,c,0.00,0.00")
                .with_property("NODE_LABEL_WIDTH", "200")
                .with_property("NODE_SELECTED_PAINT", "#FFFF00")
                .with_property("NODE_CUSTOMGRAPHICS_1", "org.cytoscape.ignored"),
        ]);
        let node = rule(&rules, "node");
        assert_eq!(node.css["background-color"], CssValue::text("rgb(255,0,0)"));
        assert!((node.css["background-opacity"].as_f64().unwrap() - 0.502).abs() < 1e-3);
        assert_eq!(node.css["shape"], CssValue::text("roundrectangle"));
        assert_eq!(node.css["text-halign"], CssValue::text("left"));
        assert_eq!(node.css["text-valign"], CssValue::text("top"));
        assert_eq!(node.css["text-wrap"], CssValue::text("wrap"));
        assert_eq!(node.css["text-max-width"], CssValue::Number(200.0));

        let selected = rule(&rules, "node:selected");
        assert_eq!(selected.css["background-color"], CssValue::text("rgb(255,255,0)"));
        assert_eq!(rules.last().unwrap().selector, "node:selected");
    }

    #[test]
    fn test_node_size_lock() {
        let base = || {
            VisualPropertyElement::new("nodes:default")
                .with_property("NODE_WIDTH", "30")
                .with_property("NODE_HEIGHT", "20")
                .with_property("NODE_SIZE", "50")
                .with_mapping("NODE_SIZE", "PASSTHROUGH", "COL=size,T=double")
                .with_mapping("NODE_WIDTH", "PASSTHROUGH", "COL=w,T=double")
        };

        let locked = style(vec![base().with_dependency(NODE_SIZE_LOCKED, true)]);
        let node = rule(&locked, "node");
        assert_eq!(node.css["width"], CssValue::Number(50.0));
        assert_eq!(node.css["height"], CssValue::Number(50.0));
        let mapped = rule(&locked, "node[size]");
        assert_eq!(mapped.css["width"], CssValue::text("data(size)"));
        assert!(locked.iter().all(|r| r.selector != "node[w]"));

        let unlocked = style(vec![base()]);
        let node = rule(&unlocked, "node");
        assert_eq!(node.css["width"], CssValue::Number(30.0));
        assert_eq!(node.css["height"], CssValue::Number(20.0));
        assert!(unlocked.iter().all(|r| r.selector != "node[size]"));
        assert_eq!(rule(&unlocked, "node[w]").css["width"], CssValue::text("data(w)"));
    }

    #[test]
    fn test_size_lock_without_node_size_keeps_dimensions() {
        let rules = style(vec![
            VisualPropertyElement::new("nodes:default")
                .with_property("NODE_WIDTH", "30")
                .with_property("NODE_HEIGHT", "20")
                .with_dependency(NODE_SIZE_LOCKED, true),
        ]);
        let node = rule(&rules, "node");
        assert_eq!(node.css["width"], CssValue::Number(30.0));
        assert_eq!(node.css["height"], CssValue::Number(20.0));
    }

    #[test]
    fn test_unlocked_node_size_alone_sets_nothing() {
        let rules = style(vec![
            VisualPropertyElement::new("nodes:default")
                .with_property("NODE_SIZE", "50")
                .with_mapping("NODE_SIZE", "PASSTHROUGH", "COL=size,T=double"),
        ]);
        let node = rule(&rules, "node");
        assert!(!node.css.contains_key("width"));
        assert!(!node.css.contains_key("height"));
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_arrow_color_lock() {
        let base = || {
            VisualPropertyElement::new("edges:default")
                .with_property("EDGE_UNSELECTED_PAINT", "#0000FF")
                .with_property("EDGE_STROKE_UNSELECTED_PAINT", "#00FF00")
                .with_property("EDGE_TARGET_ARROW_UNSELECTED_PAINT", "#FF0000")
                .with_property("EDGE_STROKE_SELECTED_PAINT", "#FF00FF")
        };

        let locked = style(vec![base().with_dependency(ARROW_COLOR_MATCHES_EDGE, true)]);
        let edge = rule(&locked, "edge");
        assert_eq!(edge.css["line-color"], CssValue::text("rgb(0,0,255)"));
        assert_eq!(edge.css["source-arrow-color"], CssValue::text("rgb(0,0,255)"));
        assert_eq!(edge.css["target-arrow-color"], CssValue::text("rgb(0,0,255)"));
        assert_eq!(edge.css["curve-style"], CssValue::text("bezier"));
        assert_eq!(rule(&locked, "edge:selected").css["line-color"], CssValue::text("rgb(255,0,255)"));

        let unlocked = style(vec![base()]);
        let edge = rule(&unlocked, "edge");
        assert_eq!(edge.css["line-color"], CssValue::text("rgb(0,255,0)"));
        assert_eq!(edge.css["target-arrow-color"], CssValue::text("rgb(255,0,0)"));
        assert!(!edge.css.contains_key("source-arrow-color"));
    }

    #[test]
    fn test_locked_edge_paint_mapping_drives_arrows() {
        let rules = style(vec![
            VisualPropertyElement::new("edges:default")
                .with_dependency(ARROW_COLOR_MATCHES_EDGE, true)
                .with_mapping("EDGE_UNSELECTED_PAINT", "PASSTHROUGH", "COL=color,T=string")
                .with_mapping("EDGE_STROKE_UNSELECTED_PAINT", "PASSTHROUGH", "COL=stroke,T=string"),
        ]);
        let bound: Vec<&str> = rules
            .iter()
            .filter(|r| r.selector == "edge[color]")
            .flat_map(|r| r.css.keys().map(String::as_str))
            .collect();
        assert_eq!(bound, vec!["target-arrow-color", "source-arrow-color", "line-color"]);
        assert!(rules.iter().all(|r| r.selector != "edge[stroke]"));
    }

    #[test]
    fn test_bypasses_and_precedence() {
        let rules = style(vec![
            VisualPropertyElement::new("edges:default").with_property("EDGE_WIDTH", "2"),
            VisualPropertyElement::new("nodes").applying_to(2).with_property("NODE_FILL_COLOR", "#000000"),
            VisualPropertyElement::new("nodes").applying_to(42).with_property("NODE_FILL_COLOR", "#000000"),
            VisualPropertyElement::new("edges").applying_to(5).with_property("EDGE_LINE_TYPE", "LONG_DASH"),
            VisualPropertyElement::new("nodes:default")
                .with_property("NODE_BORDER_WIDTH", "1.5")
                .with_mapping("NODE_FILL_COLOR", "DISCRETE", "COL=type,T=string,K=0=gene,V=0=#00FF00"),
        ]);
        let selectors: Vec<&str> = rules.iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(
            selectors,
            vec!["node", "node[type = 'gene']", "node[ id = '2' ]", "edge", "edge[ id = 'e5' ]"]
        );
        assert_eq!(rules[4].css["line-style"], CssValue::text("dashed"));
    }

    #[test]
    fn test_bad_mappings_are_skipped() {
        let rules = style(vec![
            VisualPropertyElement::new("nodes:default")
                .with_mapping("NODE_FILL_COLOR", "DISCRETE", "COL=type,T=string,X=0=gene")
                .with_mapping("NODE_SHAPE", "RANDOM", "COL=type")
                .with_mapping("NODE_LABEL", "PASSTHROUGH", "T=string")
                .with_mapping("NODE_MADE_UP", "PASSTHROUGH", "COL=type")
                .with_mapping("NODE_BORDER_WIDTH", "DISCRETE", "COL=rank,T=integer,K=0=1,V=0=4"),
        ]);
        let selectors: Vec<&str> = rules.iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors, vec!["node", "node[rank = 1]"]);
    }

    #[test]
    fn test_mapping_columns_are_resolved() {
        let mut names = AttributeNameMap::new();
        names.register("shared name");
        names.register("GO term");
        names.finalize();
        let cx = network(vec![
            VisualPropertyElement::new("nodes:default")
                .with_mapping("NODE_LABEL", "PASSTHROUGH", "COL=shared name,T=string")
                .with_mapping("NODE_BORDER_PAINT", "DISCRETE", "COL=GO term,T=string,K=0=a,V=0=#010203"),
        ]);
        let rules = build_style(&cx, &mut names, &StyleConfig::default());
        assert_eq!(rules[1].selector, "node[GO_term_u1 = 'a']");
        assert_eq!(rules[2].selector, "node[name]");
        assert_eq!(rules[2].css["content"], CssValue::text("data(name)"));
    }

    #[test]
    fn test_unfinalized_names_are_prepared() {
        let mut cx = network(vec![
            VisualPropertyElement::new("nodes:default")
                .with_mapping("NODE_FILL_COLOR", "DISCRETE", "COL=p value,T=string,K=0=x,V=0=#000000"),
        ]);
        cx.set_node_attribute(1, "p value", serde_json::json!("x"), "string");

        let mut names = AttributeNameMap::new();
        let rules = build_style(&cx, &mut names, &StyleConfig::default());
        assert!(names.is_finalized());
        assert_eq!(rules[1].selector, "node[p_value_u1 = 'x']");

        let elements = crate::style::build_elements(&cx, &mut names);
        assert!(elements.node(crate::model::ElementId(1)).unwrap().data.contains_key("p_value_u1"));
    }
}
