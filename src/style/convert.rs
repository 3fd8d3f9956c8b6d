//! Value conversion from CX visual-property strings to renderer values.
//!
//! Conversions never fail. A string that does not parse as a number yields
//! `NaN` (serialized as JSON `null`); an unknown enumeration value passes
//! through unchanged.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::label::{self, Alignment};
use super::vocab::{self, ValueKind};

/// A single style property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CssValue {
    Number(f64),
    Text(String),
}

impl CssValue {
    pub fn text(value: impl Into<String>) -> Self {
        CssValue::Text(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CssValue::Text(s) => Some(s),
            CssValue::Number(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CssValue::Number(n) => Some(*n),
            CssValue::Text(_) => None,
        }
    }
}

impl From<f64> for CssValue {
    fn from(n: f64) -> Self {
        CssValue::Number(n)
    }
}

impl From<&str> for CssValue {
    fn from(s: &str) -> Self {
        CssValue::Text(s.to_owned())
    }
}

impl From<String> for CssValue {
    fn from(s: String) -> Self {
        CssValue::Text(s)
    }
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssValue::Number(n) => f.write_str(&format_number(*n)),
            CssValue::Text(s) => f.write_str(s),
        }
    }
}

/// Flat property map of one style rule.
pub type Css = BTreeMap<String, CssValue>;

/// Render a number the way it appears in selectors and `mapData(...)`:
/// integral values without a fraction, `NaN` spelled out.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Longest-prefix decimal parse: leading whitespace is skipped, trailing
/// garbage ignored. `"12px"` is `12.0`, `"abc"` is `NaN`.
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Longest-prefix integer parse, `NaN` when there are no digits.
pub fn parse_integer(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == start {
        return f64::NAN;
    }
    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// `#RRGGBB` → `rgb(r,g,b)`. Anything that is not six hex digits is kept
/// as given.
pub fn color(raw: &str) -> String {
    let hex = raw.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return raw.to_owned();
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
    format!("rgb({},{},{})", channel(0), channel(2), channel(4))
}

/// 0–255 → 0–1.
pub fn opacity(raw: &str) -> f64 {
    parse_integer(raw) / 255.0
}

/// Convert one raw value for a scalar target kind.
///
/// `LabelPosition` and `FontFamily` expand into several properties and go
/// through [`apply`] instead; here they pass through as text.
pub fn convert(kind: ValueKind, raw: &str) -> CssValue {
    match kind {
        ValueKind::Number => CssValue::Number(parse_number(raw)),
        ValueKind::Color => CssValue::Text(color(raw)),
        ValueKind::Opacity => CssValue::Number(opacity(raw)),
        ValueKind::NodeShape => remap(vocab::node_shape(raw), raw),
        ValueKind::Arrow => remap(vocab::arrow_shape(raw), raw),
        ValueKind::Line => remap(vocab::line_style(raw), raw),
        ValueKind::LabelPosition | ValueKind::FontFamily | ValueKind::Text => CssValue::text(raw),
    }
}

fn remap(mapped: Option<&'static str>, raw: &str) -> CssValue {
    CssValue::text(mapped.unwrap_or(raw))
}

/// Write the converted `raw` value for `target` into `css`, expanding label
/// positions and font faces into their component properties.
pub fn apply(target: vocab::StyleTarget, raw: &str, css: &mut Css, fallback_font: &str) {
    match target.kind {
        ValueKind::LabelPosition => apply_alignment(label::label_position(Some(raw)), css),
        ValueKind::FontFamily => super::font::expand(raw, css, fallback_font),
        kind => {
            css.insert(target.attribute.to_owned(), convert(kind, raw));
        }
    }
}

pub fn apply_alignment(alignment: Alignment, css: &mut Css) {
    css.insert("text-halign".to_owned(), CssValue::text(alignment.halign.as_str()));
    css.insert("text-valign".to_owned(), CssValue::text(alignment.valign.as_str()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_prefixes() {
        assert_eq!(parse_number("12.5"), 12.5);
        assert_eq!(parse_number("  40px"), 40.0);
        assert_eq!(parse_number("-3e2x"), -300.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("7."), 7.0);
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("").is_nan());
        assert!(parse_number("-").is_nan());
    }

    #[test]
    fn test_parse_integer_truncates() {
        assert_eq!(parse_integer("128"), 128.0);
        assert_eq!(parse_integer("200.9"), 200.0);
        assert!(parse_integer("x1").is_nan());
    }

    #[test]
    fn test_color() {
        assert_eq!(color("#3300FF"), "rgb(51,0,255)");
        assert_eq!(color("ff0000"), "rgb(255,0,0)");
        assert_eq!(color("red"), "red");
    }

    #[test]
    fn test_opacity() {
        assert!((opacity("128") - 0.50196).abs() < 1e-4);
        assert_eq!(opacity("255"), 1.0);
        assert!(opacity("opaque").is_nan());
    }

    #[test]
    fn test_enum_remaps_fall_back_to_raw() {
        assert_eq!(convert(ValueKind::NodeShape, "ROUND_RECTANGLE"), CssValue::text("roundrectangle"));
        assert_eq!(convert(ValueKind::NodeShape, "STAR"), CssValue::text("STAR"));
        assert_eq!(convert(ValueKind::Arrow, "DELTA"), CssValue::text("triangle"));
        assert_eq!(convert(ValueKind::Line, "DOT"), CssValue::text("dotted"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-70.0), "-70");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let value = serde_json::to_value(CssValue::Number(f64::NAN)).unwrap();
        assert!(value.is_null());
    }
}
