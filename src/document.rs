//! The document: light tree, component instances and event dispatch.
//!
//! `Document` owns the custom element registry, every upgraded component and
//! the injected confirmation prompt. All operations run synchronously to
//! completion; a component callback finishes before the call that triggered
//! it returns.

use crate::components::{CustomElement, ElementDefinition, ElementRegistry, HostContext};
use crate::error::{Error, Result};
use crate::event::{DispatchOutcome, DomEvent, EventKind, Lifecycle, Listener};
use crate::markup::{self, MarkupNode};
use crate::prompt::ConfirmPrompt;
use crate::shadow::ShadowRoot;
use crate::style::{compute_host_style, HostStyle};
use crate::widget::{Node, WidgetRegistry};
use std::collections::HashMap;
use tracing::{debug, info, trace};

pub struct Document {
    nodes: WidgetRegistry,
    root_id: u64,
    body_id: u64,
    definitions: ElementRegistry,
    instances: HashMap<u64, Box<dyn CustomElement>>,
    prompt: Box<dyn ConfirmPrompt>,
    navigations: Vec<String>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("instances", &self.instances.len())
            .field("navigations", &self.navigations)
            .finish()
    }
}

/// Run one lifecycle callback on `component`, hosted by node `host_id`.
fn run_lifecycle(
    component: &mut dyn CustomElement,
    nodes: &mut WidgetRegistry,
    prompt: &mut dyn ConfirmPrompt,
    host_id: u64,
    event: &Lifecycle,
) -> Result<()> {
    let host = nodes.get_mut(host_id).ok_or(Error::NodeNotFound(host_id))?;
    trace!(host = host_id, tag = %host.tag, callback = event.name(), "lifecycle");
    let mut ctx = HostContext { host, prompt };
    component.lifecycle(event, &mut ctx)
}

impl Document {
    /// An empty document with no custom elements defined.
    pub fn new(prompt: impl ConfirmPrompt + 'static) -> Self {
        Self::with_registry(ElementRegistry::new(), Box::new(prompt))
    }

    /// A document with `cfl-confirm-link` and `cfl-tooltip` defined.
    pub fn with_components(prompt: impl ConfirmPrompt + 'static) -> Self {
        Self::with_registry(ElementRegistry::with_builtin(), Box::new(prompt))
    }

    pub fn with_registry(definitions: ElementRegistry, prompt: Box<dyn ConfirmPrompt>) -> Self {
        let mut root = Node::document();
        let mut body = Node::element("body");
        body.parent_id = Some(root.id);
        root.children.push(body.id);

        let mut nodes = WidgetRegistry::new();
        let root_id = nodes.register(root);
        let body_id = nodes.register(body);
        Self {
            nodes,
            root_id,
            body_id,
            definitions,
            instances: HashMap::new(),
            prompt,
            navigations: Vec::new(),
        }
    }

    pub fn root_id(&self) -> u64 {
        self.root_id
    }

    pub fn body_id(&self) -> u64 {
        self.body_id
    }

    pub fn nodes(&self) -> &WidgetRegistry {
        &self.nodes
    }

    pub fn get(&self, id: u64) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn definitions(&self) -> &ElementRegistry {
        &self.definitions
    }

    /// URLs navigated to by link activations, oldest first.
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Replace the confirmation prompt.
    pub fn set_prompt(&mut self, prompt: Box<dyn ConfirmPrompt>) {
        self.prompt = prompt;
    }

    /// Register a custom element and upgrade matching connected elements.
    pub fn define(&mut self, def: ElementDefinition) -> Result<()> {
        let name = def.name.clone();
        self.definitions.define(def)?;
        debug!(%name, "defined custom element");
        for id in self.nodes.descendants(self.root_id) {
            self.upgrade(id)?;
        }
        Ok(())
    }

    /// Create an unconnected element. Defined elements are upgraded at once.
    pub fn create_element(&mut self, tag: &str) -> Result<u64> {
        self.create_element_with(tag, &[])
    }

    /// Create an unconnected element carrying initial attributes.
    ///
    /// Observed attributes present here reach the component as
    /// `AttributeChanged` with no old value, right after `Created`.
    pub fn create_element_with(&mut self, tag: &str, attributes: &[(&str, &str)]) -> Result<u64> {
        let mut node = Node::element(tag);
        for (name, value) in attributes {
            node.set_attribute(name, value);
        }
        let id = self.nodes.register(node);
        self.upgrade(id)?;
        Ok(id)
    }

    pub fn create_text(&mut self, text: &str) -> u64 {
        self.nodes.register(Node::text(text))
    }

    /// Whether the node is reachable from the document root.
    pub fn is_connected(&self, id: u64) -> bool {
        id == self.root_id || self.nodes.ancestors(id).contains(&self.root_id)
    }

    fn upgrade(&mut self, id: u64) -> Result<()> {
        if self.instances.contains_key(&id) {
            return Ok(());
        }
        let Some(node) = self.nodes.get(id).filter(|n| n.is_element()) else {
            return Ok(());
        };
        let Some(def) = self.definitions.lookup(&node.tag, node.get_attribute("is")) else {
            return Ok(());
        };
        let mut component = (def.constructor)(id);
        let initial: Vec<(String, String)> = component
            .observed_attributes()
            .iter()
            .filter_map(|name| {
                node.get_attribute(name)
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        debug!(id, tag = %node.tag, name = %def.name, "upgrading element");

        let prompt = self.prompt.as_mut();
        run_lifecycle(component.as_mut(), &mut self.nodes, prompt, id, &Lifecycle::Created)?;
        for (name, value) in initial {
            let event = Lifecycle::AttributeChanged {
                name,
                old: None,
                new: Some(value),
            };
            run_lifecycle(component.as_mut(), &mut self.nodes, self.prompt.as_mut(), id, &event)?;
        }
        self.instances.insert(id, component);

        if self.is_connected(id) {
            self.callback(id, &Lifecycle::Attached)?;
        }
        Ok(())
    }

    /// Deliver a lifecycle callback to the component on `id`, if any.
    fn callback(&mut self, id: u64, event: &Lifecycle) -> Result<()> {
        let Some(component) = self.instances.get_mut(&id) else {
            return Ok(());
        };
        run_lifecycle(component.as_mut(), &mut self.nodes, self.prompt.as_mut(), id, event)
    }

    fn connect_subtree(&mut self, id: u64) -> Result<()> {
        for node in self.nodes.descendants(id) {
            if self.instances.contains_key(&node) {
                self.callback(node, &Lifecycle::Attached)?;
            } else {
                // Upgrading a connected element delivers `Attached` itself.
                self.upgrade(node)?;
            }
        }
        Ok(())
    }

    fn disconnect_subtree(&mut self, id: u64) -> Result<()> {
        for node in self.nodes.descendants(id) {
            self.callback(node, &Lifecycle::Detached)?;
        }
        Ok(())
    }

    /// Append `child` under `parent`, moving it if it already has a parent.
    pub fn append_child(&mut self, parent: u64, child: u64) -> Result<()> {
        if child == self.root_id || child == self.body_id {
            return Err(Error::HierarchyRequest(format!("node {child} cannot be moved")));
        }
        if !self.nodes.contains(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        if !self.nodes.contains(child) {
            return Err(Error::NodeNotFound(child));
        }
        // Reject cycles before any component hears `Detached`.
        if child == parent || self.nodes.ancestors(parent).contains(&child) {
            return Err(Error::HierarchyRequest(format!(
                "node {child} cannot be appended to its own descendant {parent}"
            )));
        }
        if self.is_connected(child) {
            self.disconnect_subtree(child)?;
        }
        self.nodes.append_child(parent, child)?;
        if self.is_connected(parent) {
            self.connect_subtree(child)?;
        }
        Ok(())
    }

    /// Remove a node from its parent. The node stays alive and can be re-inserted.
    pub fn remove(&mut self, id: u64) -> Result<()> {
        if id == self.root_id || id == self.body_id {
            return Err(Error::HierarchyRequest(format!("node {id} cannot be removed")));
        }
        if !self.nodes.contains(id) {
            return Err(Error::NodeNotFound(id));
        }
        if self.is_connected(id) {
            self.disconnect_subtree(id)?;
        }
        self.nodes.detach(id);
        Ok(())
    }

    fn is_observed(&self, id: u64, name: &str) -> bool {
        self.instances
            .get(&id)
            .is_some_and(|c| c.observed_attributes().contains(&name))
    }

    pub fn get_attribute(&self, id: u64, name: &str) -> Option<&str> {
        self.nodes.get(id)?.get_attribute(name)
    }

    pub fn set_attribute(&mut self, id: u64, name: &str, value: &str) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        let old = node.set_attribute(name, value);
        if self.is_observed(id, name) {
            let event = Lifecycle::AttributeChanged {
                name: name.to_string(),
                old,
                new: Some(value.to_string()),
            };
            self.callback(id, &event)?;
        }
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: u64, name: &str) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        let Some(old) = node.remove_attribute(name) else {
            return Ok(());
        };
        if self.is_observed(id, name) {
            let event = Lifecycle::AttributeChanged {
                name: name.to_string(),
                old: Some(old),
                new: None,
            };
            self.callback(id, &event)?;
        }
        Ok(())
    }

    /// First connected element whose `id` attribute equals `element_id`.
    pub fn get_element_by_id(&self, element_id: &str) -> Option<u64> {
        self.nodes
            .find_first(self.root_id, |n| n.get_attribute("id") == Some(element_id))
    }

    /// Like [`Document::get_element_by_id`], as an error when missing.
    pub fn require_element(&self, element_id: &str) -> Result<u64> {
        self.get_element_by_id(element_id)
            .ok_or_else(|| Error::TargetNotFound(element_id.to_string()))
    }

    pub fn text_content(&self, id: u64) -> String {
        self.nodes.text_content(id)
    }

    /// The component upgraded onto `id`, if it has type `T`.
    pub fn element<T: 'static>(&self, id: u64) -> Option<&T> {
        self.instances.get(&id)?.as_any().downcast_ref::<T>()
    }

    pub fn element_mut<T: 'static>(&mut self, id: u64) -> Option<&mut T> {
        self.instances.get_mut(&id)?.as_any_mut().downcast_mut::<T>()
    }

    pub fn is_upgraded(&self, id: u64) -> bool {
        self.instances.contains_key(&id)
    }

    pub fn shadow_root(&self, host: u64) -> Option<&ShadowRoot> {
        self.instances.get(&host)?.shadow_root()
    }

    /// Host whose shadow root contains `id`.
    fn shadow_host_of(&self, id: u64) -> Option<u64> {
        self.instances
            .iter()
            .find(|(_, c)| c.shadow_root().is_some_and(|s| s.contains(id)))
            .map(|(host, _)| *host)
    }

    /// Node that pointer events for `id` should be delivered to: the
    /// `.icon` in its shadow root when it has one, otherwise `id` itself.
    pub fn hover_target(&self, id: u64) -> u64 {
        self.shadow_root(id)
            .and_then(|s| s.query_class("icon"))
            .unwrap_or(id)
    }

    /// Computed host style for a tooltip-like element.
    pub fn host_style(&self, id: u64) -> Option<HostStyle> {
        let node = self.nodes.get(id)?;
        let ancestors = self.nodes.ancestors(id);
        let tags = ancestors
            .iter()
            .filter_map(|a| self.nodes.get(*a))
            .map(|n| n.tag.as_str());
        Some(compute_host_style(node.classes(), node.get_attribute("style"), tags))
    }

    fn listeners_at(&self, id: u64, kind: EventKind) -> Vec<Listener> {
        if let Some(node) = self.nodes.get(id) {
            return node.listeners_for(kind);
        }
        self.shadow_host_of(id)
            .and_then(|host| self.shadow_root(host)?.get(id).map(|n| n.listeners_for(kind)))
            .unwrap_or_default()
    }

    fn invoke(&mut self, listener: Listener, event: &mut DomEvent) -> Result<()> {
        let owner = listener.owner;
        let Some(component) = self.instances.get_mut(&owner) else {
            return Ok(());
        };
        let host = self.nodes.get_mut(owner).ok_or(Error::NodeNotFound(owner))?;
        let mut ctx = HostContext {
            host,
            prompt: self.prompt.as_mut(),
        };
        component.handle_event(listener.handler, event, &mut ctx)
    }

    /// Propagation path: the target, then (for bubbling events) its light-tree
    /// ancestors. Events from inside a shadow root continue at the host.
    fn event_path(&self, target: u64, kind: EventKind) -> Result<Vec<u64>> {
        let light_target = if self.nodes.contains(target) {
            target
        } else {
            self.shadow_host_of(target).ok_or(Error::NodeNotFound(target))?
        };
        let mut path = vec![target];
        if !kind.bubbles() {
            return Ok(path);
        }
        if light_target != target {
            path.push(light_target);
        }
        path.extend(self.nodes.ancestors(light_target));
        Ok(path)
    }

    /// Nearest `a[href]` on the path, for the click default action.
    fn link_on_path(&self, path: &[u64]) -> Option<String> {
        path.iter()
            .filter_map(|id| self.nodes.get(*id))
            .find(|n| n.is_element() && n.tag == "a" && n.has_attribute("href"))
            .and_then(|n| n.get_attribute("href"))
            .map(str::to_string)
    }

    /// Dispatch an event at `target` and run its default action.
    pub fn dispatch(&mut self, target: u64, kind: EventKind) -> Result<DispatchOutcome> {
        let path = self.event_path(target, kind)?;
        let mut event = DomEvent::new(kind, target);
        let mut outcome = DispatchOutcome::default();

        for &current in &path {
            event.current_target = current;
            for listener in self.listeners_at(current, kind) {
                self.invoke(listener, &mut event)?;
                outcome.handled += 1;
            }
        }
        trace!(target, event = kind.as_str(), handled = outcome.handled, "dispatched");

        outcome.default_prevented = event.default_prevented();
        if kind == EventKind::Click && !event.default_prevented() {
            if let Some(href) = self.link_on_path(&path) {
                info!(%href, "navigating");
                self.navigations.push(href.clone());
                outcome.navigation = Some(href);
            }
        }
        Ok(outcome)
    }

    /// Dispatch a click at `id`.
    pub fn click(&mut self, id: u64) -> Result<DispatchOutcome> {
        self.dispatch(id, EventKind::Click)
    }

    /// Move the pointer onto `id`'s hover target.
    pub fn pointer_enter(&mut self, id: u64) -> Result<DispatchOutcome> {
        let target = self.hover_target(id);
        self.dispatch(target, EventKind::MouseEnter)
    }

    /// Move the pointer off `id`'s hover target.
    pub fn pointer_leave(&mut self, id: u64) -> Result<DispatchOutcome> {
        let target = self.hover_target(id);
        self.dispatch(target, EventKind::MouseLeave)
    }

    /// Parse markup and append it to the body, returning the top-level node IDs.
    pub fn load_markup(&mut self, source: &str) -> Result<Vec<u64>> {
        let parsed = markup::parse_markup(source)?;
        let mut ids = Vec::with_capacity(parsed.len());
        for node in &parsed {
            let id = self.instantiate(node)?;
            self.append_child(self.body_id, id)?;
            ids.push(id);
        }
        debug!(count = ids.len(), "loaded markup");
        Ok(ids)
    }

    /// Build an unconnected subtree for a parsed node.
    fn instantiate(&mut self, node: &MarkupNode) -> Result<u64> {
        match node {
            MarkupNode::Text(text) => Ok(self.create_text(text)),
            MarkupNode::Element {
                tag,
                attributes,
                children,
            } => {
                let attrs: Vec<(&str, &str)> = attributes
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                let id = self.create_element_with(tag, &attrs)?;
                for child in children {
                    let child_id = self.instantiate(child)?;
                    self.nodes.append_child(id, child_id)?;
                }
                Ok(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Tooltip, TOOLTIP_TAG};
    use crate::prompt::ScriptedPrompt;

    #[test]
    fn test_body_cannot_be_removed() {
        let mut doc = Document::with_components(ScriptedPrompt::always(true));
        let body = doc.body_id();
        assert!(matches!(doc.remove(body), Err(Error::HierarchyRequest(_))));
    }

    #[test]
    fn test_body_hangs_off_root() {
        let doc = Document::with_components(ScriptedPrompt::always(true));
        assert_eq!(doc.get(doc.root_id()).unwrap().children, vec![doc.body_id()]);
        assert_eq!(doc.get(doc.body_id()).unwrap().parent_id, Some(doc.root_id()));
        assert!(doc.is_connected(doc.body_id()));
    }

    #[test]
    fn test_unconnected_element_is_upgraded_but_not_attached() {
        let mut doc = Document::with_components(ScriptedPrompt::always(true));
        let tip = doc.create_element(TOOLTIP_TAG).unwrap();
        assert!(doc.is_upgraded(tip));
        let tooltip = doc.element::<Tooltip>(tip).unwrap();
        assert!(tooltip.icon_id().is_some());
        let icon = tooltip.icon_id().unwrap();
        assert!(doc.shadow_root(tip).unwrap().get(icon).unwrap().listeners.is_empty());
    }

    #[test]
    fn test_define_upgrades_existing_elements() {
        let mut doc = Document::new(ScriptedPrompt::always(true));
        let ids = doc.load_markup(r#"<cfl-tooltip text="late"/>"#).unwrap();
        assert!(!doc.is_upgraded(ids[0]));

        for def in crate::components::builtin_definitions() {
            doc.define(def).unwrap();
        }
        assert_eq!(doc.element::<Tooltip>(ids[0]).unwrap().text(), "late");
        doc.pointer_enter(ids[0]).unwrap();
        assert!(doc.element::<Tooltip>(ids[0]).unwrap().is_visible());
    }

    #[test]
    fn test_dispatch_to_unknown_node_fails() {
        let mut doc = Document::with_components(ScriptedPrompt::always(true));
        assert!(matches!(doc.click(u64::MAX), Err(Error::NodeNotFound(_))));
    }

    #[test]
    fn test_host_style_sees_paragraph_ancestor() {
        let mut doc = Document::with_components(ScriptedPrompt::always(true));
        let ids = doc
            .load_markup(r#"<p><cfl-tooltip id="t" class="important">x</cfl-tooltip></p>"#)
            .unwrap();
        let tip = doc.get_element_by_id("t").unwrap();
        assert_ne!(tip, ids[0]);
        let style = doc.host_style(tip).unwrap();
        assert_eq!(style.font_weight, "bold");
        assert_eq!(style.background.as_deref(), Some("#ccc"));
    }
}
