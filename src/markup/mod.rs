//! Declarative markup loading.
//!
//! Markup must be well-formed XML. Whitespace-only text is dropped and
//! comments, declarations and processing instructions are skipped. A single
//! top-level `<body>` wrapper is unwrapped so its children land directly in
//! the document body.

mod parse;

pub use parse::{parse_markup, parse_markup_file};

/// A parsed markup node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<MarkupNode>,
    },
    Text(String),
}

impl MarkupNode {
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Text(_) => None,
        }
    }
}
