//! cfl-sim CLI
//!
//! Usage:
//!   cfl-sim dump page.xml                      # Print the document tree
//!   cfl-sim run page.xml script.json           # Replay an event script
//!   cfl-sim run page.xml script.json --answer decline
//!   cfl-sim styles                             # Print the tooltip stylesheet
//!   cfl-sim config --answer accept             # Persist a default answer

use cfl_components::components::ElementRegistry;
use cfl_components::config::{PromptMode, SimConfig};
use cfl_components::dump::{build_tree, DumpOptions};
use cfl_components::prompt::ChainedPrompt;
use cfl_components::script::{run_steps, EventScript};
use cfl_components::style::TOOLTIP_STYLESHEET;
use cfl_components::Document;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cfl-sim")]
#[command(about = "Headless simulator for cfl-confirm-link and cfl-tooltip")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load markup and print the document tree
    Dump {
        /// Markup file
        markup: PathBuf,

        /// Leave shadow roots out of the dump
        #[arg(long)]
        no_shadow: bool,
    },

    /// Load markup and replay an event script against it
    Run {
        /// Markup file
        markup: PathBuf,

        /// JSON event script
        script: PathBuf,

        /// How to answer prompts once the script's answers run out
        #[arg(long, value_enum)]
        answer: Option<PromptMode>,
    },

    /// Print the tooltip's scoped stylesheet
    Styles,

    /// Show or update persisted settings
    Config {
        /// Default prompt answer mode
        #[arg(long, value_enum)]
        answer: Option<PromptMode>,

        /// Default log filter (overridden by RUST_LOG)
        #[arg(long)]
        log_filter: Option<String>,

        /// Include shadow roots in dumps by default
        #[arg(long)]
        dump_shadow: Option<bool>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = SimConfig::load();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Dump { markup, no_shadow } => {
            let mut doc =
                Document::with_registry(ElementRegistry::with_builtin(), PromptMode::Decline.into_prompt());
            doc.load_markup(&std::fs::read_to_string(&markup)?)?;
            let opts = DumpOptions {
                shadow: config.dump_shadow && !no_shadow,
                ..DumpOptions::default()
            };
            print!("{}", build_tree(&doc, opts));
        }
        Commands::Run {
            markup,
            script,
            answer,
        } => {
            let script = EventScript::load(&script)?;
            let mode = answer.unwrap_or(config.prompt_mode);
            let prompt = ChainedPrompt::new(script.answers.iter().copied(), mode.into_prompt());
            let mut doc = Document::with_components(prompt);
            doc.load_markup(&std::fs::read_to_string(&markup)?)?;
            for report in run_steps(&mut doc, &script.steps)? {
                println!("{report}");
            }
            if !doc.navigations().is_empty() {
                println!("navigations: {}", doc.navigations().join(", "));
            }
        }
        Commands::Styles => {
            println!("{}", TOOLTIP_STYLESHEET.trim());
        }
        Commands::Config {
            answer,
            log_filter,
            dump_shadow,
        } => {
            let mut config = config;
            let changed = answer.is_some() || log_filter.is_some() || dump_shadow.is_some();
            if let Some(mode) = answer {
                config.prompt_mode = mode;
            }
            if let Some(filter) = log_filter {
                config.log_filter = filter;
            }
            if let Some(shadow) = dump_shadow {
                config.dump_shadow = shadow;
            }
            if changed {
                config.save()?;
                tracing::info!(path = %config.path().display(), "saved config");
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
