//! `<a is="cfl-confirm-link">`: a link that asks before navigating.

use super::{CustomElement, HostContext};
use crate::error::Result;
use crate::event::{DomEvent, EventKind, Handler, Lifecycle, Listener};
use std::any::Any;
use tracing::{debug, trace};

pub const CONFIRM_LINK_TAG: &str = "cfl-confirm-link";
pub const CONFIRM_MESSAGE: &str = "Do you want to visit Google?";

/// Holds no state between activations; the listener lives as long as the
/// element does.
#[derive(Debug, Default)]
pub struct ConfirmLink;

impl ConfirmLink {
    pub fn new() -> Self {
        Self
    }
}

impl CustomElement for ConfirmLink {
    fn lifecycle(&mut self, event: &Lifecycle, ctx: &mut HostContext<'_>) -> Result<()> {
        if let Lifecycle::Attached = event {
            let listener = Listener::new(EventKind::Click, ctx.host.id, Handler::ConfirmNavigation);
            if ctx.host.add_listener(listener) {
                debug!(host = ctx.host.id, "confirm-link listening for clicks");
            }
        }
        Ok(())
    }

    fn handle_event(
        &mut self,
        handler: Handler,
        event: &mut DomEvent,
        ctx: &mut HostContext<'_>,
    ) -> Result<()> {
        if handler != Handler::ConfirmNavigation {
            trace!(?handler, "confirm-link ignoring handler");
            return Ok(());
        }
        if !ctx.prompt.confirm(CONFIRM_MESSAGE) {
            debug!(host = ctx.host.id, "navigation declined");
            event.prevent_default();
        }
        Ok(())
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
    use crate::widget::Node;

    fn attached() -> (ConfirmLink, Node) {
        let mut link = ConfirmLink::new();
        let mut host = Node::element("a");
        let mut prompt = ScriptedPrompt::always(true);
        let mut ctx = HostContext { host: &mut host, prompt: &mut prompt };
        link.lifecycle(&Lifecycle::Attached, &mut ctx).unwrap();
        (link, host)
    }

    #[test]
    fn test_attach_adds_single_click_listener() {
        let (mut link, mut host) = attached();
        let mut prompt = ScriptedPrompt::always(true);
        let mut ctx = HostContext { host: &mut host, prompt: &mut prompt };
        link.lifecycle(&Lifecycle::Attached, &mut ctx).unwrap();
        assert_eq!(host.listeners_for(EventKind::Click).len(), 1);
    }

    #[test]
    fn test_decline_prevents_default() {
        let (mut link, mut host) = attached();
        let mut prompt = ScriptedPrompt::always(false);
        let mut event = DomEvent::new(EventKind::Click, host.id);
        let mut ctx = HostContext { host: &mut host, prompt: &mut prompt };
        link.handle_event(Handler::ConfirmNavigation, &mut event, &mut ctx).unwrap();
        assert!(event.default_prevented());
        assert_eq!(prompt.asked(), [CONFIRM_MESSAGE]);
    }

    #[test]
    fn test_accept_leaves_default() {
        let (mut link, mut host) = attached();
        let mut prompt = ScriptedPrompt::always(true);
        let mut event = DomEvent::new(EventKind::Click, host.id);
        let mut ctx = HostContext { host: &mut host, prompt: &mut prompt };
        link.handle_event(Handler::ConfirmNavigation, &mut event, &mut ctx).unwrap();
        assert!(!event.default_prevented());
    }
}
