//! Continuous mappings: piecewise rules around ordered breakpoints.
//!
//! For breakpoints `p0 .. pn` over data attribute `a` the rules are
//!
//! ```text
//! [a < p0]            L(p0)
//! [a = p0]            E(p0)
//! [a > p0][a < p1]    mapData(a, p0, p1, E(p0), E(p1))
//! [a = p1]            E(p1)
//! ...
//! [a > pn]            E(pn)
//! ```
//!
//! When two neighbouring equal-values are identical the between-rule takes
//! that value directly instead of `mapData(...)`, since the renderer's
//! interpolation mishandles a zero-width range. `StyleConfig::collapse_equal_stops`
//! switches this off.

use tracing::trace;

use super::convert::{convert, format_number, parse_number, Css, CssValue};
use super::mapping::{MappingDefinition, MappingPoint};
use super::vocab::StyleTarget;
use super::StyleRule;

/// A breakpoint with its values converted for the target.
#[derive(Debug, Clone, PartialEq)]
struct Breakpoint {
    lesser: CssValue,
    equal: CssValue,
    data: f64,
}

impl Breakpoint {
    fn of(point: &MappingPoint, target: StyleTarget) -> Self {
        let slot = |v: &Option<String>| convert(target.kind, v.as_deref().unwrap_or_default());
        Self {
            lesser: slot(&point.l),
            equal: slot(&point.e),
            data: parse_number(point.ov.as_deref().unwrap_or_default()),
        }
    }
}

/// Rules for one target attribute of a continuous mapping.
pub fn continuous_rules(
    element_type: &str,
    attribute: &str,
    target: StyleTarget,
    def: &MappingDefinition,
    collapse_equal_stops: bool,
) -> Vec<StyleRule> {
    let points: Vec<Breakpoint> = def.m.values().map(|p| Breakpoint::of(p, target)).collect();
    let mut rules = Vec::with_capacity(points.len() * 2 + 1);
    let rule = |selector: String, value: CssValue| {
        let mut css = Css::new();
        css.insert(target.attribute.to_owned(), value);
        StyleRule::new(selector, css)
    };
    let at = |op: &str, point: &Breakpoint| {
        format!("{element_type}[{attribute} {op} {}]", format_number(point.data))
    };

    let mut previous: Option<&Breakpoint> = None;
    for point in &points {
        match previous {
            None => rules.push(rule(at("<", point), point.lesser.clone())),
            Some(prev) => {
                let selector = format!("{}[{attribute} < {}]", at(">", prev), format_number(point.data));
                let value = if collapse_equal_stops && prev.equal == point.equal {
                    prev.equal.clone()
                } else {
                    CssValue::Text(format!(
                        "mapData({attribute},{},{},{},{})",
                        format_number(prev.data),
                        format_number(point.data),
                        prev.equal,
                        point.equal
                    ))
                };
                rules.push(rule(selector, value));
            }
        }
        rules.push(rule(at("=", point), point.equal.clone()));
        previous = Some(point);
    }

    // A single breakpoint has no upper range.
    if points.len() > 1 {
        if let Some(last) = points.last() {
            rules.push(rule(at(">", last), last.equal.clone()));
        }
    }

    trace!(attribute, target = target.attribute, rules = rules.len(), "continuous mapping");
    rules
}
