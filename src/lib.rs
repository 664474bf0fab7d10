//! cfl components
//!
//! A headless document model for two custom elements: `cfl-confirm-link`,
//! a link that asks before navigating, and `cfl-tooltip`, which shows a
//! label while the pointer is over its icon.

pub mod components;
pub mod config;
pub mod document;
pub mod dump;
pub mod error;
pub mod event;
pub mod markup;
pub mod prompt;
pub mod script;
pub mod shadow;
pub mod style;
pub mod widget;

pub use document::Document;
pub use error::{Error, Result};
