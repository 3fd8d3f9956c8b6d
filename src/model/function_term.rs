//! BEL-style function terms (`functionTerms` aspect).

use serde::{Deserialize, Serialize};
use super::ElementId;

/// A function term. Top-level terms carry the node they apply to in `po`;
/// nested argument terms do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionTerm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub po: Option<ElementId>,
    #[serde(rename = "f")]
    pub function: String,
    #[serde(default)]
    pub args: Vec<FunctionArg>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionArg {
    Term(FunctionTerm),
    Literal(serde_json::Value),
}

impl FunctionTerm {
    /// Render as `abbrev(arg, arg, ...)`, recursing into nested terms.
    pub fn stringify(&self) -> String {
        let params: Vec<String> = self
            .args
            .iter()
            .map(|arg| match arg {
                FunctionArg::Term(term) => term.stringify(),
                FunctionArg::Literal(serde_json::Value::String(s)) => s.clone(),
                FunctionArg::Literal(other) => other.to_string(),
            })
            .collect();
        format!("{}({})", abbreviate(&self.function), params.join(", "))
    }
}

/// Short form of a BEL function name; a namespace prefix (`bel:`) is dropped.
pub fn abbreviate(function: &str) -> &str {
    let pure = match function.split_once(':') {
        Some((_, local)) if !local.contains(':') => local,
        _ => function,
    };
    match pure {
        "abundance" => "a",
        "biologicalProcess" => "bp",
        "catalyticActivity" => "cat",
        "cellSecretion" => "sec",
        "cellSurfaceExpression" => "surf",
        "chaperoneActivity" => "chap",
        "complexAbundance" => "complex",
        "compositeAbundance" => "composite",
        "degradation" => "deg",
        "fusion" => "fus",
        "geneAbundance" => "g",
        "gtpBoundActivity" => "gtp",
        "kinaseActivity" => "kin",
        "microRNAAbundance" => "m",
        "molecularActivity" => "act",
        "pathology" => "path",
        "peptidaseActivity" => "pep",
        "phosphateActivity" => "phos",
        "proteinAbundance" => "p",
        "proteinModification" => "pmod",
        "reaction" => "rxn",
        "ribosylationActivity" => "ribo",
        "rnaAbundance" => "r",
        "substitution" => "sub",
        "translocation" => "tloc",
        "transcriptionalActivity" => "tscript",
        "transportActivity" => "tport",
        "truncation" => "trunc",
        "increases" => "->",
        "decreases" => "-|",
        "directlyIncreases" => "=>",
        "directlyDecreases" => "=|",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("bel:proteinAbundance"), "p");
        assert_eq!(abbreviate("kinaseActivity"), "kin");
        assert_eq!(abbreviate("custom"), "custom");
        assert_eq!(abbreviate("a:b:c"), "a:b:c");
    }

    #[test]
    fn test_stringify_nested() {
        let term: FunctionTerm = serde_json::from_value(json!({
            "po": 5,
            "f": "bel:kinaseActivity",
            "args": [{"f": "bel:proteinAbundance", "args": ["HGNC:AKT1"]}]
        }))
        .unwrap();
        assert_eq!(term.po, Some(ElementId(5)));
        assert_eq!(term.stringify(), "kin(p(HGNC:AKT1))");
    }
}
