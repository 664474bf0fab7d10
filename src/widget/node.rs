//! Node - a single element, text run, or root in the tree.

use super::{next_widget_id, NodeKind};
use crate::event::{EventKind, Handler, Listener};
use std::collections::BTreeMap;

/// A node in a document or shadow tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique node ID.
    pub id: u64,
    pub kind: NodeKind,
    /// Lowercase tag name for elements, `#text` etc. otherwise.
    pub tag: String,
    pub parent_id: Option<u64>,
    /// Child node IDs in document order.
    pub children: Vec<u64>,
    /// Element attributes, sorted by name.
    pub attributes: BTreeMap<String, String>,
    /// Character data (text nodes only).
    pub text: Option<String>,
    /// Event listeners attached to this node.
    pub listeners: Vec<Listener>,
}

impl Node {
    fn with_kind(kind: NodeKind, tag: String) -> Self {
        Self {
            id: next_widget_id(),
            kind,
            tag,
            parent_id: None,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            text: None,
            listeners: Vec::new(),
        }
    }

    pub fn element(tag: &str) -> Self {
        Self::with_kind(NodeKind::Element, tag.to_ascii_lowercase())
    }

    pub fn text(text: &str) -> Self {
        let mut node = Self::with_kind(NodeKind::Text, NodeKind::Text.as_str().to_string());
        node.text = Some(text.to_string());
        node
    }

    pub fn document() -> Self {
        Self::with_kind(NodeKind::Document, NodeKind::Document.as_str().to_string())
    }

    pub fn shadow_root() -> Self {
        Self::with_kind(NodeKind::ShadowRoot, NodeKind::ShadowRoot.as_str().to_string())
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Set an attribute, returning the previous value.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Option<String> {
        self.attributes.insert(name.to_string(), value.to_string())
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attribute("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Add a listener unless an identical one is already attached.
    ///
    /// Returns whether a listener was added.
    pub fn add_listener(&mut self, listener: Listener) -> bool {
        if self.listeners.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Remove a listener, returning whether it was attached.
    pub fn remove_listener(&mut self, listener: &Listener) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l != listener);
        self.listeners.len() != before
    }

    pub fn has_listener(&self, event: EventKind, handler: Handler) -> bool {
        self.listeners
            .iter()
            .any(|l| l.event == event && l.handler == handler)
    }

    /// Listeners for one event type, in attachment order.
    pub fn listeners_for(&self, event: EventKind) -> Vec<Listener> {
        self.listeners
            .iter()
            .filter(|l| l.event == event)
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_tag_is_lowercased() {
        let node = Node::element("CFL-Tooltip");
        assert_eq!(node.tag, "cfl-tooltip");
        assert!(node.is_element());
    }

    #[test]
    fn test_classes_split_on_whitespace() {
        let mut node = Node::element("span");
        node.set_attribute("class", "  icon   important ");
        assert_eq!(node.classes().collect::<Vec<_>>(), vec!["icon", "important"]);
        assert!(node.has_class("important"));
        assert!(!node.has_class("highlight"));
    }

    #[test]
    fn test_add_listener_ignores_duplicates() {
        let mut node = Node::element("span");
        let listener = Listener::new(EventKind::MouseEnter, 7, Handler::ShowTooltip);
        assert!(node.add_listener(listener));
        assert!(!node.add_listener(listener));
        assert_eq!(node.listeners.len(), 1);
        assert!(node.remove_listener(&listener));
        assert!(!node.remove_listener(&listener));
    }
}
