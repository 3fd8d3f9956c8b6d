//! Node label position.
//!
//! The source vocabulary describes a label by five comma-separated fields,
//! `<node anchor>,<label anchor>,<justification>,<x offset>,<y offset>`
//! (e.g. `N,SW,c,0.00,0.00`). Only the two anchors are used; they resolve
//! through a fixed table to a horizontal/vertical text alignment pair.

use serde::Serialize;

/// A compass anchor, or `NONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Nw,
    N,
    Ne,
    W,
    C,
    E,
    Sw,
    S,
    Se,
    None,
}

impl Anchor {
    /// Anything unrecognized is the center anchor.
    ///
    /// Matching is looser than the CX vocabulary requires: surrounding
    /// whitespace is ignored and case does not matter, so `" n "` reads as
    /// `N` rather than falling back to center.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "NW" => Anchor::Nw,
            "N" => Anchor::N,
            "NE" => Anchor::Ne,
            "W" => Anchor::W,
            "C" => Anchor::C,
            "E" => Anchor::E,
            "SW" => Anchor::Sw,
            "S" => Anchor::S,
            "SE" => Anchor::Se,
            "NONE" => Anchor::None,
            _ => Anchor::C,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

impl HAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            HAlign::Left => "left",
            HAlign::Center => "center",
            HAlign::Right => "right",
        }
    }
}

impl VAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            VAlign::Top => "top",
            VAlign::Center => "center",
            VAlign::Bottom => "bottom",
        }
    }
}

/// `text-halign` / `text-valign` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    pub halign: HAlign,
    pub valign: VAlign,
}

impl Alignment {
    pub const CENTER: Alignment = Alignment { halign: HAlign::Center, valign: VAlign::Center };

    const fn of(halign: HAlign, valign: VAlign) -> Self {
        Alignment { halign, valign }
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::CENTER
    }
}

const LT: Alignment = Alignment::of(HAlign::Left, VAlign::Top);
const CT: Alignment = Alignment::of(HAlign::Center, VAlign::Top);
const RT: Alignment = Alignment::of(HAlign::Right, VAlign::Top);
const LC: Alignment = Alignment::of(HAlign::Left, VAlign::Center);
const CC: Alignment = Alignment::of(HAlign::Center, VAlign::Center);
const RC: Alignment = Alignment::of(HAlign::Right, VAlign::Center);
const LB: Alignment = Alignment::of(HAlign::Left, VAlign::Bottom);
const CB: Alignment = Alignment::of(HAlign::Center, VAlign::Bottom);
const RB: Alignment = Alignment::of(HAlign::Right, VAlign::Bottom);

// Rows: node anchor. Columns: label anchor.
const LABEL_ALIGNMENT: [[Alignment; 10]; 10] = [
    //    NW  N   NE  W   C   E   SW  S   SE  NONE
    [CC, LC, LC, CT, LT, LT, CT, LT, LT, LT], // NW
    [RT, CC, LT, RT, CT, LT, RT, CT, LT, CT], // N
    [RC, RC, CC, RT, RT, CT, RT, RT, CT, RT], // NE
    [CC, LC, LC, CC, LC, LC, CC, LC, LC, LC], // W
    [RC, CC, LC, RC, CC, LC, RC, CC, LC, CC], // C
    [RC, RC, CC, RC, RC, CC, RC, RC, CC, RC], // E
    [CB, LB, LB, CB, LB, LB, CC, LC, LC, LB], // SW
    [RB, CB, LB, RB, CB, LB, RB, CC, LB, CB], // S
    [RB, RB, CB, RB, RB, CB, RC, RC, CC, RB], // SE
    [RC, CC, LC, RC, CC, LC, RC, CC, LC, CC], // NONE
];

/// Alignment for a node-anchor / label-anchor pair.
pub fn alignment(node: Anchor, label: Anchor) -> Alignment {
    LABEL_ALIGNMENT[node.index()][label.index()]
}

/// Alignment for a full label-position string. Fewer than two fields, or
/// no string at all, gives the centered default.
pub fn label_position(position: Option<&str>) -> Alignment {
    let Some(position) = position else {
        return Alignment::CENTER;
    };
    let mut fields = position.split(',');
    match (fields.next(), fields.next()) {
        (Some(node), Some(label)) => alignment(Anchor::parse(node), Anchor::parse(label)),
        _ => Alignment::CENTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_east() {
        let a = label_position(Some("N,E,c,0.00,0.00"));
        assert_eq!(a, Alignment::of(HAlign::Left, VAlign::Top));
    }

    #[test]
    fn test_defaults_to_center() {
        assert_eq!(label_position(None), Alignment::CENTER);
        assert_eq!(label_position(Some("N")), Alignment::CENTER);
        assert_eq!(label_position(Some("X,Y,c,0,0")), Alignment::CENTER);
        assert_eq!(label_position(Some("C,C,c,0.00,0.00")), Alignment::CENTER);
    }

    #[test]
    fn test_unknown_anchor_is_center() {
        // Unknown label anchor behaves like C.
        assert_eq!(label_position(Some("S,bogus")), alignment(Anchor::S, Anchor::C));
        assert_eq!(label_position(Some("s,nw")), Alignment::of(HAlign::Right, VAlign::Bottom));
    }

    #[test]
    fn test_diagonal_is_centered() {
        for anchor in [Anchor::Nw, Anchor::N, Anchor::Ne, Anchor::W, Anchor::E, Anchor::Sw, Anchor::S, Anchor::Se] {
            assert_eq!(alignment(anchor, anchor), Alignment::CENTER);
        }
    }

    #[test]
    fn test_anchor_whitespace_and_case_are_ignored() {
        assert_eq!(Anchor::parse(" n "), Anchor::N);
        assert_eq!(Anchor::parse("Se"), Anchor::Se);
        assert_eq!(label_position(Some("N, E ,c,0.00,0.00")), label_position(Some("N,E,c,0.00,0.00")));
    }
}
