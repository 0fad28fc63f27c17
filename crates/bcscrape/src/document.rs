//! Parsed HTML documents and CSS selector queries

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// A parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full HTML document
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Return every element matching `selector`, in document order
    ///
    /// An unparseable selector matches nothing.
    pub fn query(&self, selector: &str) -> Vec<Element<'_>> {
        match Selector::parse(selector) {
            Ok(selector) => self.html.select(&selector).map(Element).collect(),
            Err(e) => {
                warn!(selector, error = ?e, "Invalid CSS selector");
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

/// A single element of a [`Document`]
#[derive(Debug, Clone, Copy)]
pub struct Element<'a>(ElementRef<'a>);

impl<'a> Element<'a> {
    /// Concatenated text of the element and all its descendants
    pub fn text(&self) -> String {
        self.0.text().collect()
    }

    /// Value of the attribute `name`, if present
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }
}

/// Strip spaces, tabs, newlines and carriage returns from both ends
///
/// Other whitespace (non-breaking spaces, form feeds) is kept.
pub fn trim(s: &str) -> &str {
    s.trim_matches([' ', '\t', '\n', '\r'])
}
