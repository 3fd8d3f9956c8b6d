//! Attribute-name resolution.
//!
//! The renderer addresses element data by bare identifiers and reserves a
//! few of them (`id`, `source`, `target`). Source attribute names are
//! arbitrary strings, so each one is mapped to a safe, collision-free
//! identifier:
//!
//! 1. reserved and display-column names map to fixed targets,
//! 2. names matching `^[A-Za-z][A-Za-z0-9]*$` are kept as they are,
//! 3. anything else has its disallowed runs replaced by `_` and gets a
//!    `_u<n>` suffix unique within the map.
//!
//! Names are registered lazily (identity placeholders) and rewritten in one
//! [`AttributeNameMap::finalize`] pass. Names first seen after that pass are
//! resolved on the spot with the same rules.

use hashbrown::{HashMap, HashSet};
use crate::model::NiceCx;

/// Fixed targets for reserved and display-column names.
pub fn special_case(name: &str) -> Option<&'static str> {
    match name {
        "id" => Some("cx_id"),
        "target" => Some("cx_target"),
        "source" => Some("cx_source"),
        "shared name" => Some("name"),
        "shared interaction" => Some("interaction"),
        _ => None,
    }
}

/// `^[A-Za-z][A-Za-z0-9]*$`
pub fn is_safe(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic()) && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Replace a leading run of non-letter, non-underscore characters and every
/// later run of characters outside `[A-Za-z0-9_]` with a single `_`.
pub fn strip_unsafe(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut chars = name.chars().peekable();

    let mut leading = false;
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphabetic() || c == '_' {
            break;
        }
        leading = true;
        chars.next();
    }
    if leading {
        out.push('_');
    }

    let mut in_run = false;
    for c in chars {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// Source attribute name → renderer identifier, for one conversion pass.
#[derive(Debug, Clone, Default)]
pub struct AttributeNameMap {
    entries: HashMap<String, String>,
    /// Registration order; suffix numbering follows it.
    order: Vec<String>,
    /// Targets already handed out.
    claimed: HashSet<String>,
    next_suffix: u32,
    finalized: bool,
}

impl AttributeNameMap {
    pub fn new() -> Self {
        Self { next_suffix: 1, ..Self::default() }
    }

    /// Reserve a name. Before finalization the entry is an identity
    /// placeholder.
    pub fn register(&mut self, name: &str) {
        if self.entries.contains_key(name) {
            return;
        }
        if self.finalized {
            let target = self.target_for(name);
            self.insert(name, target);
        } else {
            self.insert(name, name.to_owned());
        }
    }

    /// Resolve a name, registering it first if it is new. An identifier
    /// this map already handed out resolves to itself.
    pub fn resolve(&mut self, name: &str) -> String {
        if let Some(target) = self.entries.get(name) {
            return target.clone();
        }
        if self.claimed.contains(name) {
            return name.to_owned();
        }
        if !self.finalized {
            if let Some(special) = special_case(name) {
                return special.to_owned();
            }
        }
        self.register(name);
        self.entries.get(name).cloned().unwrap_or_else(|| name.to_owned())
    }

    /// Look a name up without registering it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Rewrite every placeholder with its safe target.
    pub fn finalize(&mut self) {
        self.claimed.clear();
        if self.next_suffix == 0 {
            self.next_suffix = 1;
        }
        let order = std::mem::take(&mut self.order);

        // Reserved names claim their targets before any plain name can.
        for name in &order {
            if let Some(special) = special_case(name) {
                self.entries.insert(name.clone(), special.to_owned());
                self.claimed.insert(special.to_owned());
            }
        }
        for name in &order {
            if special_case(name).is_some() {
                continue;
            }
            let target = self.target_for(name);
            self.entries.insert(name.clone(), target);
        }

        self.order = order;
        self.finalized = true;
        tracing::debug!(names = self.order.len(), "attribute name map finalized");
    }

    /// Register every node and edge attribute name of `cx` and finalize,
    /// unless an earlier pass already finalized the map.
    pub fn prepare(&mut self, cx: &NiceCx) {
        for table in [&cx.node_attributes, &cx.edge_attributes] {
            for attribute in table.iter() {
                self.register(&attribute.name);
            }
        }
        if !self.finalized {
            self.finalize();
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(source, target)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name).map(|t| (name.as_str(), t.as_str())))
    }

    fn insert(&mut self, name: &str, target: String) {
        self.order.push(name.to_owned());
        self.entries.insert(name.to_owned(), target);
    }

    /// Compute and claim the target for a non-placeholder entry.
    fn target_for(&mut self, name: &str) -> String {
        let target = match special_case(name) {
            Some(special) if !self.claimed.contains(special) => special.to_owned(),
            _ if is_safe(name) && !self.claimed.contains(name) => name.to_owned(),
            _ => {
                let suffixed = format!("{}_u{}", strip_unsafe(name), self.next_suffix);
                self.next_suffix += 1;
                suffixed
            }
        };
        self.claimed.insert(target.clone());
        target
    }
}
