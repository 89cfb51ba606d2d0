//! Maps resolved markup back to offsets in the original sentence.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::tagger::TaggedSentence;

static ASSERTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[ENTITY\](.*?)\[ENTITY\]").expect("valid entity regex"));
static NEGATED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[NEGATED\](.*?)\[NEGATED\]").expect("valid negated regex"));
static RESIDUAL_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[A-Z]+\]").expect("valid marker regex"));

/// Negation verdict for one mention, offsets relative to the sentence text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NegationResult {
    pub span_start: usize,
    pub span_end: usize,
    /// `true` when the mention is negated.
    pub polarity: bool,
}

impl NegationResult {
    pub fn text<'a>(&self, sentence: &'a str) -> &'a str {
        &sentence[self.span_start..self.span_end]
    }
}

/// Emit one result per tagged substring that can be found in `original`.
///
/// Results are ordered by span. When an asserted and a negated substring
/// land on the same span, the negated one is kept.
pub fn emit(original: &str, tagged: &TaggedSentence) -> Vec<NegationResult> {
    let markup = tagged.markup().replace(tagged.filler(), " ");
    let mut spans: BTreeMap<(usize, usize), bool> = BTreeMap::new();

    let found = ASSERTED
        .captures_iter(&markup)
        .map(|caps| (caps, false))
        .chain(NEGATED.captures_iter(&markup).map(|caps| (caps, true)));
    for (caps, polarity) in found {
        let inner = caps.get(1).map_or("", |m| m.as_str());
        let cleaned = RESIDUAL_MARKER.replace_all(inner, "");
        match relocate(original, &cleaned) {
            Some(span) => {
                *spans.entry(span).or_insert(polarity) |= polarity;
            }
            None => debug!(substring = %cleaned, "could not relocate tagged substring"),
        }
    }

    spans
        .into_iter()
        .map(|((span_start, span_end), polarity)| NegationResult {
            span_start,
            span_end,
            polarity,
        })
        .collect()
}

/// First whole-word occurrence of `substring` in `original`.
fn relocate(original: &str, substring: &str) -> Option<(usize, usize)> {
    let words: Vec<String> = substring.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }
    let pattern = Regex::new(&format!(r"\b{}\b", words.join(r"\s+"))).ok()?;
    pattern.find(original).map(|m| (m.start(), m.end()))
}
