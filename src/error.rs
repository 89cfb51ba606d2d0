//! Error types for the negation engine and its host-side loaders.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by rule compilation, corpus loading and record output.
#[derive(Error, Debug)]
pub enum NegexError {
    #[error(
        "no negation rules path configured; set NEGATION_RULES_PATH or pass --rules \
         with the trigger phrase file used by the analyzer"
    )]
    MissingRulesPath,

    #[error("failed to read rules file {path}: {source}")]
    RulesIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rule on line {line}: {reason}")]
    InvalidRule { line: usize, reason: String },

    #[error("filler {0:?} must be a word character so tagged phrases keep their boundaries")]
    InvalidFiller(char),

    #[error("failed to compile pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid {kind} span {begin}..{end} in document {document} (text length {len})")]
    InvalidSpan {
        document: String,
        kind: &'static str,
        begin: usize,
        end: usize,
        len: usize,
    },

    #[error("malformed document on line {line} of {path}: {source}")]
    Corpus {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, NegexError>;
