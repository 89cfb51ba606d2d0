//! Trigger phrase rules: parsing, priority ordering and pattern compilation.

use std::{fmt, fs, path::Path, str::FromStr};

use regex::{Regex, RegexBuilder};
use tracing::{debug, info};

use crate::error::{NegexError, Result};

/// Role a trigger phrase plays in scope resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleTag {
    /// Opens a scope covering the entities that follow it.
    Pre,
    /// Opens a scope covering the entities that precede it.
    Post,
    /// Closes any open scope in the direction it is met.
    Conj,
}

impl RuleTag {
    /// Bracket marker written around matches in the working text.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Pre => "[PREN]",
            Self::Post => "[POST]",
            Self::Conj => "[CONJ]",
        }
    }
}

impl fmt::Display for RuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

impl FromStr for RuleTag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "[PREN]" => Ok(Self::Pre),
            "[POST]" => Ok(Self::Post),
            "[CONJ]" => Ok(Self::Conj),
            other => Err(format!(
                "unknown tag {other:?}, expected one of [PREN], [POST], [CONJ]"
            )),
        }
    }
}

/// A compiled trigger phrase.
#[derive(Debug, Clone)]
pub struct Rule {
    pub phrase: String,
    pub tag: RuleTag,
    pub pattern: Regex,
    /// 1-based line in the source rule file.
    pub line: usize,
}

impl Rule {
    pub fn word_count(&self) -> usize {
        self.phrase.split_whitespace().count()
    }
}

/// Priority-ordered trigger rules. Longer phrases come first.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Read and compile a tab-delimited rule file.
    pub fn from_path(path: &Path, ignore_case: bool) -> Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(NegexError::MissingRulesPath);
        }
        let contents = fs::read_to_string(path).map_err(|source| NegexError::RulesIo {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::from_lines(contents.lines(), ignore_case)?;
        info!(path = %path.display(), rules = rules.len(), "compiled negation rules");
        Ok(rules)
    }

    /// Compile rules from `<phrase>\t<TAG>` lines.
    ///
    /// Blank lines and `#` comments are skipped; any number of tabs may
    /// separate the phrase from its tag.
    pub fn from_lines<'a, I>(lines: I, ignore_case: bool) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rules = Vec::new();
        for (idx, raw) in lines.into_iter().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let (phrase, tag) = split_rule_line(trimmed, line)?;
            let pattern = compile_phrase(&phrase, ignore_case)?;
            rules.push(Rule {
                phrase,
                tag,
                pattern,
                line,
            });
        }
        // Stable: equal word counts keep file order.
        rules.sort_by_key(|rule| std::cmp::Reverse(rule.word_count()));
        debug!(count = rules.len(), "sorted rules by phrase length");
        Ok(Self { rules })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn split_rule_line(line_text: &str, line: usize) -> Result<(String, RuleTag)> {
    let fields: Vec<&str> = line_text
        .split('\t')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .collect();
    match fields.as_slice() {
        [phrase, tag] => {
            let tag = tag
                .parse::<RuleTag>()
                .map_err(|reason| NegexError::InvalidRule { line, reason })?;
            let phrase = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
            Ok((phrase, tag))
        }
        [_] => Err(NegexError::InvalidRule {
            line,
            reason: "expected `<phrase>\\t<TAG>`".to_string(),
        }),
        _ => Err(NegexError::InvalidRule {
            line,
            reason: format!("expected 2 tab-separated fields, found {}", fields.len()),
        }),
    }
}

/// Whole-word pattern for a phrase, tolerant of any internal whitespace run.
fn compile_phrase(phrase: &str, ignore_case: bool) -> Result<Regex> {
    let body = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let pattern = RegexBuilder::new(&format!(r"\b({body})\b"))
        .case_insensitive(ignore_case)
        .build()?;
    Ok(pattern)
}
