//! Visual-property vocabulary and the fixed value tables.
//!
//! Everything here is immutable data behind `match`: no registry, no
//! process-wide state.

/// How a source value is converted for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    /// `#RRGGBB` → `rgb(r,g,b)`.
    Color,
    /// 0–255 → 0–1.
    Opacity,
    NodeShape,
    Arrow,
    Line,
    LabelPosition,
    FontFamily,
    /// Passed through untouched.
    Text,
}

impl ValueKind {
    /// Kinds that convert to one property value. Label positions and font
    /// faces expand into several.
    pub fn is_scalar(self) -> bool {
        !matches!(self, ValueKind::LabelPosition | ValueKind::FontFamily)
    }
}

/// One renderer style attribute a visual property drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTarget {
    pub attribute: &'static str,
    pub kind: ValueKind,
}

impl StyleTarget {
    pub const fn new(attribute: &'static str, kind: ValueKind) -> Self {
        Self { attribute, kind }
    }
}

/// Pseudo-attribute expanded into `text-halign` / `text-valign`.
pub const LABEL_POSITION_ATTRIBUTE: &str = "labelPosition";

/// Visual properties the translator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualProperty {
    NodeFillColor,
    NodeTransparency,
    NodeShape,
    NodeWidth,
    NodeHeight,
    NodeSize,
    NodeBorderPaint,
    NodeBorderTransparency,
    NodeBorderWidth,
    NodeLabel,
    NodeLabelColor,
    NodeLabelFontFace,
    NodeLabelFontSize,
    NodeLabelTransparency,
    NodeLabelPosition,
    NodeLabelWidth,
    NodeSelectedPaint,

    EdgeWidth,
    EdgeLabel,
    EdgeLabelColor,
    EdgeLabelFontFace,
    EdgeLabelFontSize,
    EdgeLabelTransparency,
    EdgeLineType,
    EdgeStrokeUnselectedPaint,
    EdgeUnselectedPaint,
    EdgeTransparency,
    EdgeSourceArrowShape,
    EdgeTargetArrowShape,
    EdgeSourceArrowUnselectedPaint,
    EdgeTargetArrowUnselectedPaint,
    EdgeStrokeSelectedPaint,
    EdgeSourceArrowSelectedPaint,
    EdgeTargetArrowSelectedPaint,

    NetworkBackgroundPaint,
    NetworkScaleFactor,
    NetworkCenterX,
    NetworkCenterY,
}

impl VisualProperty {
    pub fn parse(name: &str) -> Option<Self> {
        use VisualProperty::*;
        Some(match name {
            "NODE_FILL_COLOR" => NodeFillColor,
            "NODE_TRANSPARENCY" => NodeTransparency,
            "NODE_SHAPE" => NodeShape,
            "NODE_WIDTH" => NodeWidth,
            "NODE_HEIGHT" => NodeHeight,
            "NODE_SIZE" => NodeSize,
            "NODE_BORDER_PAINT" => NodeBorderPaint,
            "NODE_BORDER_TRANSPARENCY" => NodeBorderTransparency,
            "NODE_BORDER_WIDTH" => NodeBorderWidth,
            "NODE_LABEL" => NodeLabel,
            "NODE_LABEL_COLOR" => NodeLabelColor,
            "NODE_LABEL_FONT_FACE" => NodeLabelFontFace,
            "NODE_LABEL_FONT_SIZE" => NodeLabelFontSize,
            "NODE_LABEL_TRANSPARENCY" => NodeLabelTransparency,
            "NODE_LABEL_POSITION" => NodeLabelPosition,
            "NODE_LABEL_WIDTH" => NodeLabelWidth,
            "NODE_SELECTED_PAINT" => NodeSelectedPaint,

            "EDGE_WIDTH" => EdgeWidth,
            "EDGE_LABEL" => EdgeLabel,
            "EDGE_LABEL_COLOR" => EdgeLabelColor,
            "EDGE_LABEL_FONT_FACE" => EdgeLabelFontFace,
            "EDGE_LABEL_FONT_SIZE" => EdgeLabelFontSize,
            "EDGE_LABEL_TRANSPARENCY" => EdgeLabelTransparency,
            "EDGE_LINE_TYPE" => EdgeLineType,
            "EDGE_STROKE_UNSELECTED_PAINT" => EdgeStrokeUnselectedPaint,
            "EDGE_UNSELECTED_PAINT" => EdgeUnselectedPaint,
            "EDGE_TRANSPARENCY" => EdgeTransparency,
            "EDGE_SOURCE_ARROW_SHAPE" => EdgeSourceArrowShape,
            "EDGE_TARGET_ARROW_SHAPE" => EdgeTargetArrowShape,
            "EDGE_SOURCE_ARROW_UNSELECTED_PAINT" => EdgeSourceArrowUnselectedPaint,
            "EDGE_TARGET_ARROW_UNSELECTED_PAINT" => EdgeTargetArrowUnselectedPaint,
            "EDGE_STROKE_SELECTED_PAINT" => EdgeStrokeSelectedPaint,
            "EDGE_SOURCE_ARROW_SELECTED_PAINT" => EdgeSourceArrowSelectedPaint,
            "EDGE_TARGET_ARROW_SELECTED_PAINT" => EdgeTargetArrowSelectedPaint,

            "NETWORK_BACKGROUND_PAINT" => NetworkBackgroundPaint,
            "NETWORK_SCALE_FACTOR" => NetworkScaleFactor,
            "NETWORK_CENTER_X_LOCATION" => NetworkCenterX,
            "NETWORK_CENTER_Y_LOCATION" => NetworkCenterY,
            _ => return None,
        })
    }

    /// Style attributes driven directly by this property. Empty for
    /// properties that only act through special handling (selection
    /// colors, label width, network view settings).
    pub fn targets(self) -> &'static [StyleTarget] {
        use ValueKind::*;
        use VisualProperty as Vp;
        match self {
            Vp::NodeFillColor => &[StyleTarget { attribute: "background-color", kind: Color }],
            Vp::NodeTransparency => &[StyleTarget { attribute: "background-opacity", kind: Opacity }],
            Vp::NodeShape => &[StyleTarget { attribute: "shape", kind: NodeShape }],
            Vp::NodeWidth => &[StyleTarget { attribute: "width", kind: Number }],
            Vp::NodeHeight => &[StyleTarget { attribute: "height", kind: Number }],
            Vp::NodeSize => &[
                StyleTarget { attribute: "width", kind: Number },
                StyleTarget { attribute: "height", kind: Number },
            ],
            Vp::NodeBorderPaint => &[StyleTarget { attribute: "border-color", kind: Color }],
            Vp::NodeBorderTransparency => &[StyleTarget { attribute: "border-opacity", kind: Opacity }],
            Vp::NodeBorderWidth => &[StyleTarget { attribute: "border-width", kind: Number }],
            Vp::NodeLabel => &[StyleTarget { attribute: "content", kind: Text }],
            Vp::NodeLabelColor => &[StyleTarget { attribute: "color", kind: Color }],
            Vp::NodeLabelFontFace => &[StyleTarget { attribute: "font-family", kind: FontFamily }],
            Vp::NodeLabelFontSize => &[StyleTarget { attribute: "font-size", kind: Number }],
            Vp::NodeLabelTransparency => &[StyleTarget { attribute: "text-opacity", kind: Opacity }],
            Vp::NodeLabelPosition => &[StyleTarget { attribute: LABEL_POSITION_ATTRIBUTE, kind: LabelPosition }],

            Vp::EdgeWidth => &[StyleTarget { attribute: "width", kind: Number }],
            Vp::EdgeLabel => &[StyleTarget { attribute: "label", kind: Text }],
            Vp::EdgeLabelColor => &[StyleTarget { attribute: "color", kind: Color }],
            Vp::EdgeLabelFontFace => &[StyleTarget { attribute: "font-family", kind: FontFamily }],
            Vp::EdgeLabelFontSize => &[StyleTarget { attribute: "font-size", kind: Number }],
            Vp::EdgeLabelTransparency => &[StyleTarget { attribute: "text-opacity", kind: Opacity }],
            Vp::EdgeLineType => &[StyleTarget { attribute: "line-style", kind: Line }],
            Vp::EdgeStrokeUnselectedPaint | Vp::EdgeUnselectedPaint => &[StyleTarget { attribute: "line-color", kind: Color }],
            Vp::EdgeTransparency => &[StyleTarget { attribute: "opacity", kind: Opacity }],
            Vp::EdgeSourceArrowShape => &[StyleTarget { attribute: "source-arrow-shape", kind: Arrow }],
            Vp::EdgeTargetArrowShape => &[StyleTarget { attribute: "target-arrow-shape", kind: Arrow }],
            Vp::EdgeSourceArrowUnselectedPaint => &[StyleTarget { attribute: "source-arrow-color", kind: Color }],
            Vp::EdgeTargetArrowUnselectedPaint => &[StyleTarget { attribute: "target-arrow-color", kind: Color }],

            Vp::NodeLabelWidth
            | Vp::NodeSelectedPaint
            | Vp::EdgeStrokeSelectedPaint
            | Vp::EdgeSourceArrowSelectedPaint
            | Vp::EdgeTargetArrowSelectedPaint
            | Vp::NetworkBackgroundPaint
            | Vp::NetworkScaleFactor
            | Vp::NetworkCenterX
            | Vp::NetworkCenterY => &[],
        }
    }
}

/// Node shape → renderer shape.
pub fn node_shape(raw: &str) -> Option<&'static str> {
    Some(match raw {
        "DIAMOND" => "diamond",
        "ELLIPSE" => "ellipse",
        "HEXAGON" => "hexagon",
        "OCTAGON" => "octagon",
        "PARALLELOGRAM" => "rhomboid",
        "RECTANGLE" => "rectangle",
        "ROUND_RECTANGLE" => "roundrectangle",
        "TRIANGLE" => "triangle",
        "VEE" => "vee",
        _ => return None,
    })
}

/// Arrow shape → renderer arrow; many source shapes collapse onto a few.
pub fn arrow_shape(raw: &str) -> Option<&'static str> {
    Some(match raw {
        "ARROW" | "ARROW_SHORT" | "DELTA" | "DELTA_SHORT_1" | "DELTA_SHORT_2" | "HALF_BOTTOM"
        | "HALF_CIRCLE" | "HALF_TOP" | "OPEN_CIRCLE" | "OPEN_DELTA" | "OPEN_HALF_CIRCLE" => "triangle",
        "CIRCLE" => "circle",
        "CROSS_DELTA" | "CROSS_OPEN_DELTA" => "triangle-tee",
        "DIAMOND" | "DIAMOND_SHORT_1" | "DIAMOND_SHORT_2" | "OPEN_DIAMOND" => "diamond",
        "NONE" => "none",
        "OPEN_SQUARE" | "SQUARE" => "square",
        "T" => "tee",
        _ => return None,
    })
}

/// Line type → one of `solid`, `dashed`, `dotted`.
pub fn line_style(raw: &str) -> Option<&'static str> {
    Some(match raw {
        "SOLID" | "CONTIGUOUS_ARROW" | "PARALLEL_LINES" | "SINEWAVE" | "ZIGZAG" => "solid",
        "BACKWARD_SLASH" | "LONG_DASH" | "EQUAL_DASH" | "FORWARD_SLASH" | "MARQUEE_DASH"
        | "MARQUEE_EQUAL" | "SEPARATE_ARROW" | "VERTICAL_SLASH" => "dashed",
        "DASH_DOT" | "DOT" | "MARQUEE_DASH_DOT" => "dotted",
        _ => return None,
    })
}
