//! Text dump of the document tree, including shadow roots.

use crate::document::Document;
use crate::widget::{Node, NodeKind, WidgetRegistry};
use std::fmt::Write;

/// What to include in a dump.
#[derive(Debug, Clone, Copy)]
pub struct DumpOptions {
    pub shadow: bool,
    pub listeners: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            shadow: true,
            listeners: true,
        }
    }
}

/// One-line rendering of a node.
pub fn describe_node(node: &Node, listeners: bool) -> String {
    let mut out = match node.kind {
        NodeKind::Text => format!("{:?}", node.text.as_deref().unwrap_or("")),
        NodeKind::Document | NodeKind::ShadowRoot => node.kind.as_str().to_string(),
        NodeKind::Element => {
            let mut s = format!("<{}", node.tag);
            for (name, value) in &node.attributes {
                let _ = write!(s, " {name}={value:?}");
            }
            s.push('>');
            s
        }
    };
    if listeners && !node.listeners.is_empty() {
        let names: Vec<&str> = node.listeners.iter().map(|l| l.event.as_str()).collect();
        let _ = write!(out, " {{{}}}", names.join(", "));
    }
    out
}

fn write_subtree(
    doc: &Document,
    nodes: &WidgetRegistry,
    id: u64,
    depth: usize,
    opts: DumpOptions,
    out: &mut String,
) {
    let Some(node) = nodes.get(id) else { return };
    let indent = "  ".repeat(depth);
    let _ = writeln!(out, "{indent}{}", describe_node(node, opts.listeners));

    // Stylesheet text is long and never changes.
    if node.is_element() && node.tag == "style" {
        return;
    }

    if opts.shadow {
        if let Some(shadow) = doc.shadow_root(id) {
            write_subtree(doc, shadow.nodes(), shadow.root_id(), depth + 1, opts, out);
        }
    }
    for child in &node.children {
        write_subtree(doc, nodes, *child, depth + 1, opts, out);
    }
}

/// Dump the whole document.
pub fn build_tree(doc: &Document, opts: DumpOptions) -> String {
    let mut out = String::new();
    write_subtree(doc, doc.nodes(), doc.root_id(), 0, opts, &mut out);
    out
}

/// Dump the subtree rooted at `id`.
pub fn build_subtree(doc: &Document, id: u64, opts: DumpOptions) -> String {
    let mut out = String::new();
    write_subtree(doc, doc.nodes(), id, 0, opts, &mut out);
    out
}
