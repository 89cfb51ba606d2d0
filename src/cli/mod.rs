//! Command-line interface wiring for clinical-negex.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod analyze;
pub mod rules;
pub mod sentence;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "NegEx-style negation context detection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Analyze(args) => analyze::run(args, settings).await,
            Commands::Sentence(args) => sentence::run(args, settings).await,
            Commands::Rules(args) => rules::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect negated mentions across a JSONL corpus.
    Analyze(analyze::Args),
    /// Analyze a single sentence and print its markup and verdicts.
    Sentence(sentence::Args),
    /// Print the compiled trigger rules in priority order.
    Rules(rules::Args),
}
