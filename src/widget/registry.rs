//! Node registry backing one tree (a document or a shadow root).

use super::Node;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Registry of all nodes in one tree.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    /// Nodes by ID.
    widgets: HashMap<u64, Node>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new node.
    pub fn register(&mut self, node: Node) -> u64 {
        let id = node.id;
        self.widgets.insert(id, node);
        id
    }

    pub fn get(&self, id: u64) -> Option<&Node> {
        self.widgets.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Node> {
        self.widgets.get_mut(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.widgets.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Append `child_id` as the last child of `parent_id`.
    ///
    /// A child that already has a parent is moved.
    pub fn append_child(&mut self, parent_id: u64, child_id: u64) -> Result<()> {
        if !self.widgets.contains_key(&parent_id) {
            return Err(Error::NodeNotFound(parent_id));
        }
        if !self.widgets.contains_key(&child_id) {
            return Err(Error::NodeNotFound(child_id));
        }
        if child_id == parent_id || self.ancestors(parent_id).contains(&child_id) {
            return Err(Error::HierarchyRequest(format!(
                "node {child_id} cannot be appended to its own descendant {parent_id}"
            )));
        }
        self.detach(child_id);
        if let Some(parent) = self.widgets.get_mut(&parent_id) {
            parent.children.push(child_id);
        }
        if let Some(child) = self.widgets.get_mut(&child_id) {
            child.parent_id = Some(parent_id);
        }
        Ok(())
    }

    /// Unlink a node from its parent. The node and its subtree stay registered.
    pub fn detach(&mut self, id: u64) {
        let Some(parent_id) = self.widgets.get_mut(&id).and_then(|n| n.parent_id.take()) else {
            return;
        };
        if let Some(parent) = self.widgets.get_mut(&parent_id) {
            parent.children.retain(|c| *c != id);
        }
    }

    /// Unlink a node and drop it with its whole subtree.
    pub fn remove_subtree(&mut self, id: u64) -> Vec<Node> {
        self.detach(id);
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.widgets.remove(&d))
            .collect()
    }

    /// Ancestor IDs, nearest first.
    pub fn ancestors(&self, id: u64) -> Vec<u64> {
        let mut out = Vec::new();
        let mut cur = self.widgets.get(&id).and_then(|n| n.parent_id);
        while let Some(pid) = cur {
            out.push(pid);
            cur = self.widgets.get(&pid).and_then(|n| n.parent_id);
        }
        out
    }

    /// The node and all its descendants in document (pre-)order.
    pub fn descendants(&self, id: u64) -> Vec<u64> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let Some(node) = self.widgets.get(&cur) else { continue };
            out.push(cur);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// First node under `root` (inclusive) matching `pred`, in document order.
    pub fn find_first(&self, root: u64, pred: impl Fn(&Node) -> bool) -> Option<u64> {
        self.descendants(root)
            .into_iter()
            .find(|id| self.widgets.get(id).is_some_and(&pred))
    }

    /// All nodes under `root` (inclusive) matching `pred`, in document order.
    pub fn find_all(&self, root: u64, pred: impl Fn(&Node) -> bool) -> Vec<u64> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.widgets.get(id).is_some_and(&pred))
            .collect()
    }

    /// Concatenated text of all text nodes under `id`.
    pub fn text_content(&self, id: u64) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.widgets.get(&d).and_then(|n| n.text.as_deref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (WidgetRegistry, u64, u64, u64) {
        let mut reg = WidgetRegistry::new();
        let root = reg.register(Node::element("div"));
        let child = reg.register(Node::element("p"));
        let text = reg.register(Node::text("hello"));
        reg.append_child(root, child).unwrap();
        reg.append_child(child, text).unwrap();
        (reg, root, child, text)
    }

    #[test]
    fn test_descendants_in_document_order() {
        let (reg, root, child, text) = tree();
        assert_eq!(reg.descendants(root), vec![root, child, text]);
        assert_eq!(reg.ancestors(text), vec![child, root]);
        assert_eq!(reg.text_content(root), "hello");
    }

    #[test]
    fn test_append_moves_existing_child() {
        let (mut reg, root, child, text) = tree();
        reg.append_child(root, text).unwrap();
        assert!(reg.get(child).unwrap().children.is_empty());
        assert_eq!(reg.get(root).unwrap().children, vec![child, text]);
        assert_eq!(reg.get(text).unwrap().parent_id, Some(root));
    }

    #[test]
    fn test_append_into_own_descendant_is_rejected() {
        let (mut reg, root, child, _) = tree();
        assert!(matches!(
            reg.append_child(child, root),
            Err(Error::HierarchyRequest(_))
        ));
    }

    #[test]
    fn test_remove_subtree_drops_nodes() {
        let (mut reg, root, child, text) = tree();
        let removed = reg.remove_subtree(child);
        assert_eq!(removed.len(), 2);
        assert!(!reg.contains(text));
        assert!(reg.get(root).unwrap().children.is_empty());
    }
}
