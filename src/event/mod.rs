//! DOM events, listeners and component lifecycle notifications.

/// DOM event types the simulator dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    MouseEnter,
    MouseLeave,
}

impl EventKind {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "click" => Some(Self::Click),
            "mouseenter" => Some(Self::MouseEnter),
            "mouseleave" => Some(Self::MouseLeave),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
        }
    }

    /// Whether the event propagates to light-tree ancestors.
    pub fn bubbles(&self) -> bool {
        matches!(self, Self::Click)
    }
}

/// Component callbacks a listener can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    ConfirmNavigation,
    ShowTooltip,
    HideTooltip,
}

/// A listener attached to a node.
///
/// `owner` is the host element whose component receives the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub event: EventKind,
    pub owner: u64,
    pub handler: Handler,
}

impl Listener {
    pub fn new(event: EventKind, owner: u64, handler: Handler) -> Self {
        Self { event, owner, handler }
    }
}

/// An event in flight.
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub kind: EventKind,
    /// Node the event was dispatched at.
    pub target: u64,
    /// Node whose listeners are currently running.
    pub current_target: u64,
    default_prevented: bool,
}

impl DomEvent {
    pub fn new(kind: EventKind, target: u64) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            default_prevented: false,
        }
    }

    /// Cancel the event's default action. Propagation is unaffected.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Number of listeners that ran.
    pub handled: usize,
    pub default_prevented: bool,
    /// URL navigated to by the default action, if any.
    pub navigation: Option<String>,
}

/// Lifecycle notifications delivered to custom elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    /// The element was upgraded and its component constructed.
    Created,
    /// The element was connected to the document.
    Attached,
    /// An observed attribute was set or removed.
    AttributeChanged {
        name: String,
        old: Option<String>,
        new: Option<String>,
    },
    /// The element was disconnected from the document.
    Detached,
}

impl Lifecycle {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Attached => "attached",
            Self::AttributeChanged { .. } => "attribute-changed",
            Self::Detached => "detached",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_names_roundtrip() {
        for kind in [EventKind::Click, EventKind::MouseEnter, EventKind::MouseLeave] {
            assert_eq!(EventKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(EventKind::from_str("mouseover"), None);
    }

    #[test]
    fn test_only_click_bubbles() {
        assert!(EventKind::Click.bubbles());
        assert!(!EventKind::MouseEnter.bubbles());
        assert!(!EventKind::MouseLeave.bubbles());
    }

    #[test]
    fn test_prevent_default_sticks() {
        let mut event = DomEvent::new(EventKind::Click, 3);
        assert!(!event.default_prevented());
        event.prevent_default();
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
