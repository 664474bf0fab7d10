//! Custom element definitions and the two shipped components.

mod confirm_link;
mod tooltip;

pub use confirm_link::{ConfirmLink, CONFIRM_LINK_TAG, CONFIRM_MESSAGE};
pub use tooltip::{Tooltip, DEFAULT_TOOLTIP_TEXT, SLOT_FALLBACK_TEXT, TOOLTIP_TAG};

use crate::error::{Error, Result};
use crate::event::{DomEvent, Handler, Lifecycle};
use crate::prompt::ConfirmPrompt;
use crate::shadow::ShadowRoot;
use crate::widget::Node;
use std::any::Any;

/// What a component can touch while handling a callback.
pub struct HostContext<'a> {
    /// The light-tree element the component is attached to.
    pub host: &'a mut Node,
    pub prompt: &'a mut dyn ConfirmPrompt,
}

/// Behavior bound to an upgraded element.
pub trait CustomElement: std::fmt::Debug {
    /// Attributes whose changes are delivered as [`Lifecycle::AttributeChanged`].
    fn observed_attributes(&self) -> &'static [&'static str] {
        &[]
    }

    fn lifecycle(&mut self, event: &Lifecycle, ctx: &mut HostContext<'_>) -> Result<()>;

    fn handle_event(
        &mut self,
        handler: Handler,
        event: &mut DomEvent,
        ctx: &mut HostContext<'_>,
    ) -> Result<()>;

    fn shadow_root(&self) -> Option<&ShadowRoot> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Builds a component for the host element with the given ID.
pub type Constructor = fn(u64) -> Box<dyn CustomElement>;

/// A registered custom element.
#[derive(Debug, Clone)]
pub struct ElementDefinition {
    pub name: String,
    /// Built-in tag this element customizes (`<a is="...">`).
    pub extends: Option<String>,
    pub constructor: Constructor,
}

impl ElementDefinition {
    /// An autonomous element, selected by its own tag.
    pub fn autonomous(name: &str, constructor: Constructor) -> Self {
        Self {
            name: name.to_string(),
            extends: None,
            constructor,
        }
    }

    /// A customized built-in, selected by `<extends is="name">`.
    pub fn customized(name: &str, extends: &str, constructor: Constructor) -> Self {
        Self {
            name: name.to_string(),
            extends: Some(extends.to_ascii_lowercase()),
            constructor,
        }
    }

    /// Whether an element with this tag and `is` value should be upgraded.
    pub fn matches(&self, tag: &str, is: Option<&str>) -> bool {
        match &self.extends {
            None => tag == self.name,
            Some(base) => tag == base && is == Some(self.name.as_str()),
        }
    }
}

const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Whether `name` is usable as a custom element name.
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_lower = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    starts_lower
        && name.contains('-')
        && !name.chars().any(|c| c.is_ascii_uppercase() || c.is_whitespace())
        && !RESERVED_NAMES.contains(&name)
}

/// Custom element definitions known to a document.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    definitions: Vec<ElementDefinition>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `cfl-confirm-link` and `cfl-tooltip`.
    pub fn with_builtin() -> Self {
        Self {
            definitions: builtin_definitions(),
        }
    }

    pub fn define(&mut self, def: ElementDefinition) -> Result<()> {
        if !is_valid_element_name(&def.name) {
            return Err(Error::InvalidElementName(def.name));
        }
        if self.get(&def.name).is_some() {
            return Err(Error::AlreadyDefined(def.name));
        }
        self.definitions.push(def);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ElementDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    /// Definition for an element with this tag and `is` attribute.
    pub fn lookup(&self, tag: &str, is: Option<&str>) -> Option<&ElementDefinition> {
        self.definitions.iter().find(|d| d.matches(tag, is))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.name.as_str())
    }
}

/// Definitions for the two components this crate ships.
pub fn builtin_definitions() -> Vec<ElementDefinition> {
    vec![
        ElementDefinition::customized(CONFIRM_LINK_TAG, "a", |_| Box::new(ConfirmLink::new())),
        ElementDefinition::autonomous(TOOLTIP_TAG, |host| Box::new(Tooltip::new(host))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_name_validation() {
        assert!(is_valid_element_name("cfl-tooltip"));
        assert!(is_valid_element_name("x-1"));
        assert!(!is_valid_element_name("tooltip"));
        assert!(!is_valid_element_name("Cfl-tooltip"));
        assert!(!is_valid_element_name("cfl-Tooltip"));
        assert!(!is_valid_element_name("-tooltip"));
        assert!(!is_valid_element_name("font-face"));
        assert!(!is_valid_element_name(""));
    }

    #[test]
    fn test_builtin_names_are_valid_and_distinct() {
        let defs = builtin_definitions();
        assert!(defs.iter().all(|d| is_valid_element_name(&d.name)));
        let mut fresh = ElementRegistry::new();
        for def in defs {
            fresh.define(def).unwrap();
        }
        assert_eq!(fresh.names().count(), 2);
    }

    #[test]
    fn test_define_rejects_duplicates_and_bad_names() {
        let mut registry = ElementRegistry::with_builtin();
        let dup = ElementDefinition::autonomous(TOOLTIP_TAG, |host| Box::new(Tooltip::new(host)));
        assert!(matches!(registry.define(dup), Err(Error::AlreadyDefined(_))));

        let bad = ElementDefinition::autonomous("tooltip", |host| Box::new(Tooltip::new(host)));
        assert!(matches!(registry.define(bad), Err(Error::InvalidElementName(_))));
        assert_eq!(registry.names().count(), 2);
    }

    #[test]
    fn test_lookup_customized_builtin_needs_is() {
        let registry = ElementRegistry::with_builtin();
        assert!(registry.lookup("a", Some(CONFIRM_LINK_TAG)).is_some());
        assert!(registry.lookup("a", None).is_none());
        assert!(registry.lookup("button", Some(CONFIRM_LINK_TAG)).is_none());
        assert!(registry.lookup(CONFIRM_LINK_TAG, None).is_none());
        assert!(registry.lookup(TOOLTIP_TAG, None).is_some());
    }
}
