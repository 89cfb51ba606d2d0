//! CLI entry-point listing compiled trigger rules.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{config::Settings, negex::NegationContextAnalyzer, sources::SourceKind};

/// Args for the `rules` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Trigger rule file, overriding NEGATION_RULES_PATH.
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let config = settings.negation_config(args.rules.as_deref(), SourceKind::Mentions);
    let analyzer =
        NegationContextAnalyzer::from_config(&config).context("initialising negation analyzer")?;

    for (priority, rule) in analyzer.rules().iter().enumerate() {
        println!(
            "{priority:>4}  {}  {:<40}  line {}",
            rule.tag, rule.phrase, rule.line
        );
    }
    Ok(())
}
