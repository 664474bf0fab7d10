//! Node tree shared by the light document and component shadow roots.

mod node;
mod registry;

pub use node::Node;
pub use registry::WidgetRegistry;

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a unique node ID.
///
/// IDs are process-wide, so a node in a shadow root never collides with a
/// node in the light tree.
pub fn next_widget_id() -> u64 {
    NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed)
}

/// Node types in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    ShadowRoot,
    Element,
    Text,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "#document",
            Self::ShadowRoot => "#shadow-root",
            Self::Element => "element",
            Self::Text => "#text",
        }
    }
}
