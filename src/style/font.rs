//! Font-face expansion.
//!
//! A CX font face reads `<family>,<style>,<size>`, e.g.
//! `SansSerif.bold,bold,12` or `Arial,plain,10`. Java logical families
//! carry their weight and style in the name; other families take it from
//! the second field.

use super::convert::{parse_number, Css, CssValue};

/// Weight and style implied by a face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceStyle {
    pub weight: Option<&'static str>,
    pub style: Option<&'static str>,
}

const PLAIN: FaceStyle = FaceStyle { weight: None, style: None };
const BOLD: FaceStyle = FaceStyle { weight: Some("bold"), style: None };
const ITALIC: FaceStyle = FaceStyle { weight: None, style: Some("italic") };
const BOLD_ITALIC: FaceStyle = FaceStyle { weight: Some("bold"), style: Some("italic") };

const LOGICAL_FAMILIES: [&str; 5] = ["Dialog", "DialogInput", "Monospaced", "Serif", "SansSerif"];

/// Style of a Java logical font name such as `Serif.bolditalic`.
pub fn logical_font(name: &str) -> Option<FaceStyle> {
    let (family, variant) = name.split_once('.')?;
    if !LOGICAL_FAMILIES.contains(&family) {
        return None;
    }
    match variant {
        "plain" => Some(PLAIN),
        "bold" => Some(BOLD),
        "italic" => Some(ITALIC),
        "bolditalic" => Some(BOLD_ITALIC),
        _ => None,
    }
}

/// Style keyword from the second field, case-insensitive.
pub fn style_keyword(raw: &str) -> Option<FaceStyle> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "PLAIN" => Some(PLAIN),
        "BOLD" => Some(BOLD),
        "ITALIC" => Some(ITALIC),
        "BOLDITALIC" => Some(BOLD_ITALIC),
        _ => None,
    }
}

const SEGOE: &str = "Segoe UI,Frutiger,Frutiger Linotype,Dejavu Sans,Helvetica Neue,Arial,sans-serif";
const COURIER: &str = "Courier New,Courier,Lucida Sans Typewriter,Lucida Typewriter,monospace";
const CONSOLAS: &str = "Consolas,monaco,monospace";
const TIMES: &str = "TimesNewRoman,Times New Roman,Times,Baskerville,Georgia,serif";
const ARIAL: &str = "Arial,Helvetica Neue,Helvetica,sans-serif";

/// Web font stack for a family name.
pub fn font_stack(family: &str) -> Option<&'static str> {
    if let Some((logical, _)) = family.split_once('.') {
        if logical_font(family).is_some() {
            return Some(match logical {
                "Dialog" => SEGOE,
                "DialogInput" => COURIER,
                "Monospaced" => CONSOLAS,
                "Serif" => TIMES,
                _ => ARIAL,
            });
        }
    }

    Some(match family {
        // sans-serif
        "Arial" | "ArialMT" => ARIAL,
        "Arial-Black" => "Arial Black,Arial Bold,Gadget,sans-serif",
        "ArialNarrow" => "Arial Narrow,Arial,sans-serif",
        "ArialRoundedMTBold" => "Arial Rounded MT Bold,Helvetica Rounded,Arial,sans-serif",
        "AvantGarde" => "Avant Garde,Avantgarde,Century Gothic,CenturyGothic,AppleGothic,sans-serif",
        "Calibri" => "Calibri,Candara,Segoe,Segoe UI,Optima,Arial,sans-serif",
        "Candara" => "Candara,Calibri,Segoe,Segoe UI,Optima,Arial,sans-serif",
        "CenturyGothic" => "Century Gothic,CenturyGothic,AppleGothic,sans-serif",
        "FranklinGothic-Medium" => "Franklin Gothic Medium,Franklin Gothic,ITC Franklin Gothic,Arial,sans-serif",
        "Futura" => "Futura,Trebuchet MS,Arial,sans-serif",
        "Geneva" => "Geneva,Tahoma,Verdana,sans-serif",
        "GillSans" => "Gill Sans,Gill Sans MT,Calibri,sans-serif",
        "HelveticaNeue" => "Helvetica Neue,Helvetica,Arial,sans-serif",
        "Impact" => {
            "Impact,Haettenschweiler,Franklin Gothic Bold,Charcoal,Helvetica Inserat,Bitstream Vera Sans Bold,Arial Black,sans-serif"
        }
        "LucidaGrande" => "Lucida Grande,Lucida Sans Unicode,Lucida Sans,Geneva,Verdana,sans-serif",
        "Optima" => "Optima,Segoe,Segoe UI,Candara,Calibri,Arial,sans-serif",
        "Segoe UI" | "SegoeUI" => SEGOE,
        "Tahoma" => "Tahoma,Verdana,Segoe,sans-serif",
        "TrebuchetMS" => "Trebuchet MS,Lucida Grande,Lucida Sans Unicode,Lucida Sans,Tahoma,sans-serif",
        "Verdana" => "Verdana,Geneva,sans-serif",

        // serif
        "BigCaslon" => "Big Caslon,Book Antiqua,Palatino Linotype,Georgia,serif",
        "BodoniMT" => "Bodoni MT,Didot,Didot LT STD,Hoefler Text,Garamond,Times New Roman,serif",
        "BookAntiqua" => "Book Antiqua,Palatino,Palatino Linotype,Palatino LT STD,Georgia,serif",
        "CalistoMT" => {
            "Calisto MT,Bookman Old Style,Bookman,Goudy Old Style,Garamond,Hoefler Text,Bitstream Charter,Georgia,serif"
        }
        "Cambria" => "Cambria,Georgia,serif",
        "Didot" => "Didot,Didot LT STD,Hoefler Text,Garamond,Times New Roman,serif",
        "Garamond" => "Garamond,Baskerville,Baskerville Old Face,Hoefler Text,Times New Roman,serif",
        "Georgia" => "Georgia,Times,Times New Roman,serif",
        "GoudyOldStyle" => "Goudy Old Style,Garamond,Big Caslon,Times New Roman,serif",
        "HoeflerText" => "Hoefler Text,Baskerville Old Face,Garamond,Times New Roman,serif",
        "LucidaBright" => "Lucida Bright,Georgia,serif",
        "Palatino" => "Palatino,Palatino Linotype,Palatino LT STD,Book Antiqua,Georgia,serif",
        "Perpetua" => {
            "Perpetua,Baskerville,Big Caslon,Palatino Linotype,Palatino,URW Palladio L,Nimbus Roman No9 L,serif"
        }
        "Rockwell" => "Rockwell,Courier Bold,Courier,Georgia,Times,Times New Roman,serif",
        "Rockwell-ExtraBold" => "Rockwell Extra Bold,Rockwell Bold,monospace,serif",
        "Baskerville" => "Baskerville,Baskerville Old Face,Hoefler Text,Garamond,Times New Roman,serif",
        "TimesNewRoman" => TIMES,

        // monospace
        "Consolas" => CONSOLAS,
        "CourierNew" => COURIER,
        "LucidaConsole" => "Lucida Console,Lucida Sans Typewriter,monaco,Bitstream Vera Sans Mono,monospace",
        "LucidaSans-Typewriter" => "Lucida Sans Typewriter,Lucida Console,monaco,Bitstream Vera Sans Mono,monospace",
        "Monaco" => "monaco,Consolas,Lucida Console,monospace",
        "AndaleMono" => "Andale Mono,AndaleMono,monospace",

        // fantasy and script
        "Copperplate" => "Copperplate,Copperplate Gothic Light,fantasy",
        "Papyrus" => "Papyrus,fantasy",
        "BrushScriptMT" => "Brush Script MT,cursive",

        _ => return None,
    })
}

/// Expand a face string into `font-family`, `font-weight`, `font-style` and
/// `font-size`.
pub fn expand(face: &str, css: &mut Css, fallback_family: &str) {
    let fields: Vec<&str> = face.split(',').map(str::trim).collect();
    let family = fields.first().copied().unwrap_or_default();

    let style = logical_font(family).or_else(|| fields.get(1).and_then(|f| style_keyword(f)));
    if let Some(style) = style {
        if let Some(weight) = style.weight {
            css.insert("font-weight".to_owned(), CssValue::text(weight));
        }
        if let Some(font_style) = style.style {
            css.insert("font-style".to_owned(), CssValue::text(font_style));
        }
    }

    match font_stack(family) {
        Some(stack) => {
            css.insert("font-family".to_owned(), CssValue::text(stack));
        }
        None => {
            css.insert("font-family".to_owned(), CssValue::text(fallback_family));
            css.entry("font-weight".to_owned()).or_insert_with(|| CssValue::text("normal"));
        }
    }

    if fields.len() > 1 {
        if let Some(size) = fields.last() {
            let n = parse_number(size);
            let value = if n.is_nan() { CssValue::text(*size) } else { CssValue::Number(n) };
            css.insert("font-size".to_owned(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expanded(face: &str) -> Css {
        let mut css = Css::new();
        expand(face, &mut css, "sans-serif");
        css
    }

    #[test]
    fn test_logical_font() {
        let css = expanded("SansSerif.bolditalic,plain,12");
        assert_eq!(css["font-family"], CssValue::text(ARIAL));
        assert_eq!(css["font-weight"], CssValue::text("bold"));
        assert_eq!(css["font-style"], CssValue::text("italic"));
        assert_eq!(css["font-size"], CssValue::Number(12.0));
    }

    #[test]
    fn test_style_from_second_field() {
        let css = expanded("Georgia,Bold,14");
        assert_eq!(css["font-family"], CssValue::text("Georgia,Times,Times New Roman,serif"));
        assert_eq!(css["font-weight"], CssValue::text("bold"));
        assert!(!css.contains_key("font-style"));
    }

    #[test]
    fn test_unknown_family_falls_back() {
        let css = expanded("Comic Neue,plain,9");
        assert_eq!(css["font-family"], CssValue::text("sans-serif"));
        assert_eq!(css["font-weight"], CssValue::text("normal"));
        assert_eq!(css["font-size"], CssValue::Number(9.0));

        let css = expanded("");
        assert_eq!(css["font-family"], CssValue::text("sans-serif"));
        assert!(!css.contains_key("font-size"));
    }

    #[test]
    fn test_unknown_logical_variant() {
        assert_eq!(logical_font("Serif.heavy"), None);
        assert_eq!(logical_font("Courier.bold"), None);
        assert_eq!(font_stack("Monospaced.italic"), Some(CONSOLAS));
    }
}
