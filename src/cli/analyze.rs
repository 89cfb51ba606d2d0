//! CLI entry-point for corpus-wide negation analysis.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument, warn};

use crate::{
    config::Settings,
    corpus,
    negex::NegationContextAnalyzer,
    output::{OutputFormat, RecordWriter},
    sources::SourceKind,
};

/// Args for the `analyze` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// JSONL file, or a directory searched recursively for `*.jsonl`.
    #[arg(long)]
    pub input: PathBuf,
    /// Destination file; stdout when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,
    #[arg(long, default_value = "jsonl", value_enum)]
    pub format: OutputFormat,
    /// Entity-source strategy.
    #[arg(long, default_value = "mentions", value_enum)]
    pub source: SourceKind,
    /// Trigger rule file, overriding NEGATION_RULES_PATH.
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let config = settings.negation_config(args.rules.as_deref(), args.source);
    let analyzer =
        NegationContextAnalyzer::from_config(&config).context("initialising negation analyzer")?;
    let source = config.source.build();

    let inputs = corpus::collect_inputs(&args.input)
        .with_context(|| format!("collecting inputs under {}", args.input.display()))?;
    if inputs.is_empty() {
        warn!(input = %args.input.display(), "no JSONL inputs found; nothing to analyze");
        return Ok(());
    }

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).context("creating output dir")?;
            }
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = RecordWriter::new(sink, args.format);

    let mut documents = 0usize;
    let mut negated = 0usize;
    for path in &inputs {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        for document in corpus::parse_jsonl(&contents, path)? {
            for record in analyzer.analyze_document(&document, source.as_ref())? {
                negated += usize::from(record.polarity);
                writer.write(&record)?;
            }
            documents += 1;
        }
    }

    let written = writer.written();
    writer.finish()?;
    info!(
        files = inputs.len(),
        documents,
        records = written,
        negated,
        asserted = written - negated,
        "negation analysis complete"
    );
    Ok(())
}
