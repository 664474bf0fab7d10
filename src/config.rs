//! Simulator configuration persistence.
//!
//! Stores CLI preferences (default prompt answer, log filter, dump options)
//! as JSON at `~/.local/share/cfl-sim/config.json`. Loaded once on startup.

use crate::error::Result;
use crate::prompt::{ConfirmPrompt, LinePrompt, ScriptedPrompt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file path.
pub fn default_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cfl-sim")
        .join("config.json")
}

/// How confirmation prompts are answered when a script runs out of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PromptMode {
    /// Ask on stdin.
    #[default]
    Ask,
    Accept,
    Decline,
}

impl PromptMode {
    pub fn into_prompt(self) -> Box<dyn ConfirmPrompt> {
        match self {
            Self::Ask => Box::new(LinePrompt::stdin()),
            Self::Accept => Box::new(ScriptedPrompt::always(true)),
            Self::Decline => Box::new(ScriptedPrompt::always(false)),
        }
    }
}

/// Persisted simulator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub prompt_mode: PromptMode,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default = "default_true")]
    pub dump_shadow: bool,
    /// Path the config was loaded from (not serialized).
    #[serde(skip)]
    path: PathBuf,
}

fn default_log_filter() -> String { "info".into() }
fn default_true() -> bool { true }

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            prompt_mode: PromptMode::default(),
            log_filter: default_log_filter(),
            dump_shadow: true,
            path: default_path(),
        }
    }
}

impl SimConfig {
    /// Load from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        Self::load_from(&default_path())
    }

    /// Load from `path`, falling back to defaults on any error.
    pub fn load_from(path: &Path) -> Self {
        let mut config = match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        };
        config.path = path.to_path_buf();
        config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist current config to where it was loaded from.
    pub fn save(&self) -> Result<()> {
        self.save_to(&self.path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
