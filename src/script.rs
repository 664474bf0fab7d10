//! JSON event scripts for replaying interactions against a document.
//!
//! ```json
//! {
//!   "answers": [false, true],
//!   "steps": [
//!     { "action": "enter", "target": "tip" },
//!     { "action": "set_attribute", "target": "tip", "name": "text", "value": "Hi" },
//!     { "action": "click", "target": "go" }
//!   ]
//! }
//! ```

use crate::document::Document;
use crate::dump::{build_tree, DumpOptions};
use crate::error::Result;
use crate::event::DispatchOutcome;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One scripted interaction. Targets are element `id` attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Click { target: String },
    Enter { target: String },
    Leave { target: String },
    SetAttribute { target: String, name: String, value: String },
    RemoveAttribute { target: String, name: String },
    Remove { target: String },
    Dump,
}

/// A script: prompt answers consumed in order, then steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventScript {
    #[serde(default)]
    pub answers: Vec<bool>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl EventScript {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

fn describe_outcome(outcome: &DispatchOutcome) -> String {
    match (&outcome.navigation, outcome.default_prevented) {
        (Some(href), _) => format!("navigated to {href}"),
        (None, true) => "navigation cancelled".to_string(),
        (None, false) => format!("{} listener(s) ran", outcome.handled),
    }
}

/// Run `steps` in order, returning one report per step.
///
/// The first failing step stops the run.
pub fn run_steps(doc: &mut Document, steps: &[Step]) -> Result<Vec<String>> {
    let mut reports = Vec::with_capacity(steps.len());
    for step in steps {
        debug!(?step, "running step");
        let report = match step {
            Step::Click { target } => {
                let id = doc.require_element(target)?;
                format!("click #{target}: {}", describe_outcome(&doc.click(id)?))
            }
            Step::Enter { target } => {
                let id = doc.require_element(target)?;
                format!("enter #{target}: {}", describe_outcome(&doc.pointer_enter(id)?))
            }
            Step::Leave { target } => {
                let id = doc.require_element(target)?;
                format!("leave #{target}: {}", describe_outcome(&doc.pointer_leave(id)?))
            }
            Step::SetAttribute {
                target,
                name,
                value,
            } => {
                let id = doc.require_element(target)?;
                doc.set_attribute(id, name, value)?;
                format!("set #{target} {name}={value:?}")
            }
            Step::RemoveAttribute { target, name } => {
                let id = doc.require_element(target)?;
                doc.remove_attribute(id, name)?;
                format!("removed #{target} {name}")
            }
            Step::Remove { target } => {
                let id = doc.require_element(target)?;
                doc.remove(id)?;
                format!("removed #{target}")
            }
            Step::Dump => build_tree(doc, DumpOptions::default()),
        };
        reports.push(report);
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_steps() {
        let script = EventScript::from_json(
            r#"{
                "answers": [true],
                "steps": [
                    { "action": "click", "target": "go" },
                    { "action": "set_attribute", "target": "tip", "name": "text", "value": "Hi" },
                    { "action": "dump" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(script.answers, vec![true]);
        assert_eq!(
            script.steps,
            vec![
                Step::Click { target: "go".into() },
                Step::SetAttribute {
                    target: "tip".into(),
                    name: "text".into(),
                    value: "Hi".into()
                },
                Step::Dump,
            ]
        );
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let err = EventScript::from_json(r#"{ "steps": [{ "action": "hover", "target": "x" }] }"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_empty_script_defaults() {
        let script = EventScript::from_json("{}").unwrap();
        assert!(script.answers.is_empty());
        assert!(script.steps.is_empty());
    }
}
