//! Declarative field extraction
//!
//! Each page type describes its fields as a table of [`FieldRule`]s: a CSS
//! selector, where to read the value on the matched element, and a setter for
//! the target record. [`apply_rules`] evaluates the whole table against one
//! document. Every rule is independent: a selector that matches nothing
//! leaves its field untouched and the remaining rules still run.

use crate::document::{trim, Document, Element};

/// Where a rule reads its value on a matched element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Element text with surrounding whitespace trimmed
    Text,
    /// Raw attribute value; a missing attribute reads as an empty string
    Attr(&'static str),
    /// Attribute value with surrounding whitespace trimmed
    TrimmedAttr(&'static str),
}

impl Source {
    fn read(self, element: &Element<'_>) -> String {
        match self {
            Source::Text => trim(&element.text()).to_string(),
            Source::Attr(name) => element.attr(name).unwrap_or_default().to_string(),
            Source::TrimmedAttr(name) => trim(element.attr(name).unwrap_or_default()).to_string(),
        }
    }
}

/// One row of an extraction table
pub struct FieldRule<T> {
    /// CSS selector evaluated against the whole document
    pub selector: &'static str,
    /// Value source on the selected element
    pub source: Source,
    /// Stores the extracted value in the record
    pub apply: fn(&mut T, String),
}

/// Evaluate `rules` against `doc`, writing matched values into `target`
///
/// When a selector matches several elements the last one in document order
/// wins. Returns the number of rules that found an element.
pub fn apply_rules<T>(doc: &Document, rules: &[FieldRule<T>], target: &mut T) -> usize {
    let mut matched = 0;
    for rule in rules {
        if let Some(element) = doc.query(rule.selector).last() {
            (rule.apply)(target, rule.source.read(element));
            matched += 1;
        }
    }
    matched
}
