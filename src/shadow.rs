//! Shadow roots: isolated presentation subtrees owned by a component.
//!
//! A shadow root keeps its own node registry, so nothing in the light
//! document can select into it and its stylesheet only ever applies to its
//! own nodes.

use crate::error::{Error, Result};
use crate::widget::{Node, WidgetRegistry};

#[derive(Debug)]
pub struct ShadowRoot {
    root_id: u64,
    host_id: u64,
    nodes: WidgetRegistry,
    stylesheet: Option<&'static str>,
}

impl ShadowRoot {
    pub fn new(host_id: u64) -> Self {
        let mut nodes = WidgetRegistry::new();
        let root_id = nodes.register(Node::shadow_root());
        Self {
            root_id,
            host_id,
            nodes,
            stylesheet: None,
        }
    }

    pub fn root_id(&self) -> u64 {
        self.root_id
    }

    pub fn host_id(&self) -> u64 {
        self.host_id
    }

    pub fn nodes(&self) -> &WidgetRegistry {
        &self.nodes
    }

    pub fn stylesheet(&self) -> Option<&'static str> {
        self.stylesheet
    }

    pub fn contains(&self, id: u64) -> bool {
        self.nodes.contains(id)
    }

    pub fn get(&self, id: u64) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Append a `<style>` node and adopt its text as this root's stylesheet.
    pub fn adopt_stylesheet(&mut self, css: &'static str) -> Result<u64> {
        let style = self.append(self.root_id, Node::element("style"))?;
        self.append(style, Node::text(css))?;
        self.stylesheet = Some(css);
        Ok(style)
    }

    /// Register `node` and append it under `parent`.
    pub fn append(&mut self, parent: u64, node: Node) -> Result<u64> {
        if !self.nodes.contains(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        let id = self.nodes.register(node);
        self.nodes.append_child(parent, id)?;
        Ok(id)
    }

    /// Remove a node and its subtree. Absent nodes are ignored.
    pub fn remove(&mut self, id: u64) -> bool {
        if id == self.root_id || !self.nodes.contains(id) {
            return false;
        }
        !self.nodes.remove_subtree(id).is_empty()
    }

    /// First element with the given tag, in tree order.
    pub fn query_tag(&self, tag: &str) -> Option<u64> {
        self.nodes
            .find_first(self.root_id, |n| n.is_element() && n.tag == tag)
    }

    pub fn query_all_tag(&self, tag: &str) -> Vec<u64> {
        self.nodes
            .find_all(self.root_id, |n| n.is_element() && n.tag == tag)
    }

    /// First element carrying the given class, in tree order.
    pub fn query_class(&self, class: &str) -> Option<u64> {
        self.nodes
            .find_first(self.root_id, |n| n.is_element() && n.has_class(class))
    }

    pub fn text_content(&self, id: u64) -> String {
        self.nodes.text_content(id)
    }
}
