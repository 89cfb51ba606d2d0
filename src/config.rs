//! Runtime configuration for clinical-negex.

use std::{
    env,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::sources::SourceKind;

/// Placeholder that keeps multi-word tagged phrases together as one token.
pub const DEFAULT_FILLER: char = '_';

/// Settings resolved from `.env` and the process environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Trigger phrase file; empty means unset.
    pub negation_rules_path: PathBuf,
    pub filler: char,
    /// Compile trigger patterns case-insensitively.
    pub ignore_case: bool,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let negation_rules_path = env::var("NEGATION_RULES_PATH")
            .map(PathBuf::from)
            .unwrap_or_default();
        let filler = env::var("NEGATION_FILLER")
            .ok()
            .and_then(|v| v.chars().next())
            .unwrap_or(DEFAULT_FILLER);
        let ignore_case = env::var("NEGATION_IGNORE_CASE")
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Self {
            negation_rules_path,
            filler,
            ignore_case,
        })
    }

    /// Build the analyzer configuration, letting a CLI flag win over the environment.
    pub fn negation_config(
        &self,
        rules_override: Option<&Path>,
        source: SourceKind,
    ) -> NegationConfig {
        NegationConfig {
            negation_rules_path: rules_override
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.negation_rules_path.clone()),
            filler: self.filler,
            ignore_case: self.ignore_case,
            source,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Analyzer configuration, embeddable in a host pipeline's own config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NegationConfig {
    pub negation_rules_path: PathBuf,
    pub filler: char,
    pub ignore_case: bool,
    pub source: SourceKind,
}

impl Default for NegationConfig {
    fn default() -> Self {
        Self {
            negation_rules_path: PathBuf::new(),
            filler: DEFAULT_FILLER,
            ignore_case: false,
            source: SourceKind::Mentions,
        }
    }
}
