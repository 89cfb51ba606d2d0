//! Bracket tagging of trigger phrases and entity phrases in a sentence.

use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};
use tracing::debug;

use super::rules::RuleSet;

pub const ENTITY_MARKER: &str = "[ENTITY]";
pub const NEGATED_MARKER: &str = "[NEGATED]";

static ANY_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(?:PREN|POST|CONJ|ENTITY|NEGATED)\]").expect("valid marker regex")
});

/// Working copy of a sentence, split on whitespace after tagging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSentence {
    tokens: Vec<String>,
    filler: char,
}

impl TaggedSentence {
    pub fn new(markup: &str, filler: char) -> Self {
        Self {
            tokens: markup.split_whitespace().map(str::to_string).collect(),
            filler,
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut [String] {
        &mut self.tokens
    }

    pub fn filler(&self) -> char {
        self.filler
    }

    /// Tokens re-joined with single spaces, markers intact.
    pub fn markup(&self) -> String {
        self.tokens.join(" ")
    }

    /// The sentence with every marker and placeholder removed.
    pub fn plain_text(&self) -> String {
        let spaced = self.markup().replace(self.filler, " ");
        ANY_MARKER.replace_all(&spaced, "").into_owned()
    }
}

/// Apply every rule in priority order, each seeing the previous rule's markup.
pub fn tag_triggers(text: &str, rules: &RuleSet, filler: char) -> String {
    rules.iter().fold(text.to_string(), |working, rule| {
        let marker = rule.tag.marker();
        let tagged = rule.pattern.replace_all(&working, |caps: &Captures| {
            caps.get(0).map_or_else(String::new, |m| {
                if is_enclosed(&working, m.start(), m.end()) {
                    m.as_str().to_string()
                } else {
                    wrap(marker, m.as_str(), filler)
                }
            })
        });
        tagged.into_owned()
    })
}

/// Wrap the first occurrence of each entity phrase in `[ENTITY]` markers.
///
/// Phrases are tried in the order given; a phrase that cannot be found in
/// the current markup is dropped. Text already inside a marker pair is never
/// matched again, so a phrase differing only in case from an earlier one
/// moves on to its next occurrence.
pub fn tag_entities(markup: String, phrases: &[String], filler: char) -> String {
    phrases.iter().fold(markup, |working, phrase| {
        let Some(pattern) = entity_pattern(phrase) else {
            return working;
        };
        let found = pattern
            .find_iter(&working)
            .find(|m| {
                !is_marker_word(&working, m.start(), m.end())
                    && !is_enclosed(&working, m.start(), m.end())
            });
        match found {
            Some(m) => {
                let mut out = String::with_capacity(working.len() + 2 * ENTITY_MARKER.len());
                out.push_str(&working[..m.start()]);
                out.push_str(&wrap(ENTITY_MARKER, m.as_str(), filler));
                out.push_str(&working[m.end()..]);
                out
            }
            None => {
                debug!(phrase = %phrase, "entity phrase not found in sentence");
                working
            }
        }
    })
}

/// Case-insensitive whole-word pattern; any non-word run may sit between words.
fn entity_pattern(phrase: &str) -> Option<Regex> {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }
    let pattern = format!(r"\b{}\b", words.join(r"\W+"));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(err) => {
            debug!(phrase = %phrase, error = %err, "skipping uncompilable entity phrase");
            None
        }
    }
}

/// A match sitting directly between `]` and `[` is already tagged.
fn is_enclosed(text: &str, start: usize, end: usize) -> bool {
    text[..start].ends_with(']') && text[end..].starts_with('[')
}

/// A match spanning exactly the word of a `[TAG]` marker.
fn is_marker_word(text: &str, start: usize, end: usize) -> bool {
    text[..start].ends_with('[') && text[end..].starts_with(']')
}

fn wrap(marker: &str, matched: &str, filler: char) -> String {
    let joined = matched
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(&filler.to_string());
    format!("{marker}{joined}{marker}")
}
