use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use super::commands;

/// Entry point for the `paper-relay` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "paper-relay",
    about = "Translate paper abstracts with an LLM and push them to a chat webhook",
    version,
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config.yaml (defaults to $PAPER_RELAY_CONFIG, then ./config.yaml)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load papers, optionally translate their abstracts, and post them to the webhook.
    Push(PushArgs),
    /// Send one prompt to the configured LLM endpoint and report the result.
    Smoke,
}

#[derive(Debug, Args)]
pub struct PushArgs {
    /// JSON file holding an array of papers.
    #[arg(short = 'p', long = "papers", default_value = "papers.json")]
    pub papers: PathBuf,

    /// Translate abstracts even if `use_llm_for_translation` is off.
    #[arg(long, conflicts_with = "no_translate")]
    pub translate: bool,

    /// Skip translation even if `use_llm_for_translation` is on.
    #[arg(long)]
    pub no_translate: bool,

    /// Override the destination tag from the config.
    #[arg(long)]
    pub tag: Option<String>,
}

impl PushArgs {
    /// `None` when neither flag was given and the config decides.
    pub fn translation_override(&self) -> Option<bool> {
        match (self.translate, self.no_translate) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

impl Cli {
    pub async fn run(self) -> ExitCode {
        commands::run(self).await
    }
}
