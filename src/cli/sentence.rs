//! CLI entry-point for ad-hoc single sentence analysis.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use serde_json::json;
use tracing::instrument;

use crate::{config::Settings, negex::NegationContextAnalyzer, sources::SourceKind};

/// Args for the `sentence` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Sentence text.
    #[arg(long)]
    pub text: String,
    /// Entity phrase found in the sentence; repeatable.
    #[arg(long = "entity")]
    pub entities: Vec<String>,
    /// Trigger rule file, overriding NEGATION_RULES_PATH.
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let config = settings.negation_config(args.rules.as_deref(), SourceKind::Mentions);
    let analyzer =
        NegationContextAnalyzer::from_config(&config).context("initialising negation analyzer")?;

    let markup = analyzer
        .resolve(&args.text, &args.entities)
        .map(|tagged| tagged.markup());
    let results: Vec<_> = analyzer
        .analyze(&args.text, &args.entities)
        .into_iter()
        .map(|result| {
            json!({
                "text": result.text(&args.text),
                "span_start": result.span_start,
                "span_end": result.span_end,
                "polarity": result.polarity,
            })
        })
        .collect();

    let report = json!({ "markup": markup, "results": results });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
