//! `<cfl-tooltip>`: shows a floating label while the pointer is over its icon.
//!
//! The component is a two-state machine on `visible`. Mouseenter on the icon
//! shows the label and mouseleave hides it. Every transition ends with
//! [`Tooltip::render`], which projects `visible` onto the shadow root:
//! a visible tooltip has exactly one `div` label, a hidden one has none.
//!
//! The `text` attribute only updates the stored text. A label that is already
//! shown keeps its old text until the next transition renders it again.

use super::{CustomElement, HostContext};
use crate::error::{Error, Result};
use crate::event::{DomEvent, EventKind, Handler, Lifecycle, Listener};
use crate::shadow::ShadowRoot;
use crate::style::TOOLTIP_STYLESHEET;
use crate::widget::Node;
use std::any::Any;
use tracing::{debug, trace};

pub const TOOLTIP_TAG: &str = "cfl-tooltip";
pub const DEFAULT_TOOLTIP_TEXT: &str = "Some dummy tooltip text.";
pub const SLOT_FALLBACK_TEXT: &str = "Some default";

const TEXT_ATTR: &str = "text";
const ICON_GLYPH: &str = "?";
const LABEL_TAG: &str = "div";

#[derive(Debug)]
pub struct Tooltip {
    visible: bool,
    text: String,
    icon_id: Option<u64>,
    shadow: ShadowRoot,
}

impl Tooltip {
    pub fn new(host_id: u64) -> Self {
        Self {
            visible: false,
            text: DEFAULT_TOOLTIP_TEXT.to_string(),
            icon_id: None,
            shadow: ShadowRoot::new(host_id),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The hover target inside the shadow root, once built.
    pub fn icon_id(&self) -> Option<u64> {
        self.icon_id
    }

    pub fn label_id(&self) -> Option<u64> {
        self.shadow.query_tag(LABEL_TAG)
    }

    /// Text of the label currently shown, if any.
    pub fn label_text(&self) -> Option<String> {
        self.label_id().map(|id| self.shadow.text_content(id))
    }

    pub fn label_count(&self) -> usize {
        self.shadow.query_all_tag(LABEL_TAG).len()
    }

    fn build_shadow(&mut self) -> Result<()> {
        if self.icon_id.is_some() {
            return Ok(());
        }
        let root = self.shadow.root_id();
        self.shadow.adopt_stylesheet(TOOLTIP_STYLESHEET)?;

        let slot = self.shadow.append(root, Node::element("slot"))?;
        self.shadow.append(slot, Node::text(SLOT_FALLBACK_TEXT))?;

        let mut icon = Node::element("span");
        icon.set_attribute("class", "icon");
        let icon = self.shadow.append(root, icon)?;
        self.shadow.append(icon, Node::text(ICON_GLYPH))?;
        self.icon_id = Some(icon);
        Ok(())
    }

    fn listeners(&self) -> [Listener; 2] {
        let host = self.shadow.host_id();
        [
            Listener::new(EventKind::MouseEnter, host, Handler::ShowTooltip),
            Listener::new(EventKind::MouseLeave, host, Handler::HideTooltip),
        ]
    }

    fn attach(&mut self, host: &Node) -> Result<()> {
        if let Some(text) = host.get_attribute(TEXT_ATTR) {
            self.text = text.to_string();
        }
        self.build_shadow()?;
        let icon_id = self.icon_id.ok_or(Error::NodeNotFound(self.shadow.root_id()))?;
        let listeners = self.listeners();
        let icon = self.shadow.get_mut(icon_id).ok_or(Error::NodeNotFound(icon_id))?;
        for listener in listeners {
            icon.add_listener(listener);
        }
        debug!(host = host.id, text = %self.text, "tooltip attached");
        self.render()
    }

    fn detach(&mut self) {
        let listeners = self.listeners();
        let Some(icon) = self.icon_id.and_then(|id| self.shadow.get_mut(id)) else {
            return;
        };
        for listener in &listeners {
            icon.remove_listener(listener);
        }
        debug!(host = self.shadow.host_id(), "tooltip detached");
    }

    pub fn show(&mut self) -> Result<()> {
        self.visible = true;
        self.render()
    }

    pub fn hide(&mut self) -> Result<()> {
        self.visible = false;
        self.render()
    }

    /// Make the shadow root match `visible`. Safe to call repeatedly.
    pub fn render(&mut self) -> Result<()> {
        let existing = self.shadow.query_tag(LABEL_TAG);
        match (self.visible, existing) {
            (true, None) => {
                let root = self.shadow.root_id();
                let label = self.shadow.append(root, Node::element(LABEL_TAG))?;
                self.shadow.append(label, Node::text(&self.text))?;
                trace!(host = self.shadow.host_id(), text = %self.text, "label created");
            }
            (true, Some(label)) => {
                if self.shadow.text_content(label) != self.text {
                    self.shadow.remove(label);
                    let root = self.shadow.root_id();
                    let label = self.shadow.append(root, Node::element(LABEL_TAG))?;
                    self.shadow.append(label, Node::text(&self.text))?;
                }
            }
            (false, Some(label)) => {
                self.shadow.remove(label);
                trace!(host = self.shadow.host_id(), "label removed");
            }
            (false, None) => {}
        }
        Ok(())
    }
}

impl CustomElement for Tooltip {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &[TEXT_ATTR]
    }

    fn lifecycle(&mut self, event: &Lifecycle, ctx: &mut HostContext<'_>) -> Result<()> {
        match event {
            Lifecycle::Created => self.build_shadow(),
            Lifecycle::Attached => self.attach(ctx.host),
            Lifecycle::AttributeChanged { name, old, new } => {
                if old == new {
                    return Ok(());
                }
                if name == TEXT_ATTR {
                    self.text = new.clone().unwrap_or_else(|| DEFAULT_TOOLTIP_TEXT.to_string());
                    trace!(host = ctx.host.id, text = %self.text, "tooltip text updated");
                }
                Ok(())
            }
            Lifecycle::Detached => {
                self.detach();
                Ok(())
            }
        }
    }

    fn handle_event(
        &mut self,
        handler: Handler,
        _event: &mut DomEvent,
        _ctx: &mut HostContext<'_>,
    ) -> Result<()> {
        match handler {
            Handler::ShowTooltip => self.show(),
            Handler::HideTooltip => self.hide(),
            Handler::ConfirmNavigation => Ok(()),
        }
    }

    fn shadow_root(&self) -> Option<&ShadowRoot> {
        Some(&self.shadow)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;

    fn lifecycle(tooltip: &mut Tooltip, host: &mut Node, event: Lifecycle) {
        let mut prompt = ScriptedPrompt::always(false);
        let mut ctx = HostContext { host, prompt: &mut prompt };
        tooltip.lifecycle(&event, &mut ctx).unwrap();
    }

    fn attached(host: &mut Node) -> Tooltip {
        let mut tooltip = Tooltip::new(host.id);
        lifecycle(&mut tooltip, host, Lifecycle::Created);
        lifecycle(&mut tooltip, host, Lifecycle::Attached);
        tooltip
    }

    #[test]
    fn test_created_builds_slot_and_icon() {
        let mut host = Node::element(TOOLTIP_TAG);
        let tooltip = attached(&mut host);
        let shadow = tooltip.shadow_root().unwrap();
        let slot = shadow.query_tag("slot").unwrap();
        assert_eq!(shadow.text_content(slot), SLOT_FALLBACK_TEXT);
        assert_eq!(shadow.query_class("icon"), tooltip.icon_id());
        assert_eq!(tooltip.label_count(), 0);
    }

    #[test]
    fn test_render_twice_keeps_one_label() {
        let mut host = Node::element(TOOLTIP_TAG);
        let mut tooltip = attached(&mut host);
        tooltip.show().unwrap();
        tooltip.render().unwrap();
        tooltip.render().unwrap();
        assert_eq!(tooltip.label_count(), 1);

        tooltip.hide().unwrap();
        tooltip.render().unwrap();
        assert_eq!(tooltip.label_count(), 0);
    }

    #[test]
    fn test_same_value_attribute_change_is_ignored() {
        let mut host = Node::element(TOOLTIP_TAG);
        let mut tooltip = attached(&mut host);
        lifecycle(
            &mut tooltip,
            &mut host,
            Lifecycle::AttributeChanged {
                name: TEXT_ATTR.to_string(),
                old: Some("x".to_string()),
                new: Some("x".to_string()),
            },
        );
        assert_eq!(tooltip.text(), DEFAULT_TOOLTIP_TEXT);
    }

    #[test]
    fn test_removed_attribute_restores_placeholder() {
        let mut host = Node::element(TOOLTIP_TAG);
        host.set_attribute(TEXT_ATTR, "Hi");
        let mut tooltip = attached(&mut host);
        assert_eq!(tooltip.text(), "Hi");
        lifecycle(
            &mut tooltip,
            &mut host,
            Lifecycle::AttributeChanged {
                name: TEXT_ATTR.to_string(),
                old: Some("Hi".to_string()),
                new: None,
            },
        );
        assert_eq!(tooltip.text(), DEFAULT_TOOLTIP_TEXT);
    }

    #[test]
    fn test_detach_removes_icon_listeners() {
        let mut host = Node::element(TOOLTIP_TAG);
        let mut tooltip = attached(&mut host);
        let icon = tooltip.icon_id().unwrap();
        assert_eq!(tooltip.shadow_root().unwrap().get(icon).unwrap().listeners.len(), 2);
        lifecycle(&mut tooltip, &mut host, Lifecycle::Detached);
        assert!(tooltip.shadow_root().unwrap().get(icon).unwrap().listeners.is_empty());
    }
}
