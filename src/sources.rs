//! Entity sources: which phrases of a sentence get negation verdicts.
//!
//! Generic mentions and UMLS-linked medical mentions resolve overlaps
//! differently, so each is its own strategy behind [`EntitySource`].

use clap::ValueEnum;
use indexmap::IndexSet;
use serde::Deserialize;

use crate::corpus::{EntityMention, Sentence};

/// Yields the candidate entity phrases of a sentence, in tagging order.
pub trait EntitySource: Send + Sync {
    fn name(&self) -> &'static str;
    fn candidate_phrases(&self, sentence: &Sentence<'_>) -> Vec<String>;
}

/// Every mention, deduplicated by text, in order of first appearance.
#[derive(Debug, Clone, Copy, Default)]
pub struct MentionSource;

impl EntitySource for MentionSource {
    fn name(&self) -> &'static str {
        "mentions"
    }

    fn candidate_phrases(&self, sentence: &Sentence<'_>) -> Vec<String> {
        distinct_phrases(sentence, sentence.mentions.iter().copied())
    }
}

/// Only mentions carrying UMLS concept links.
///
/// A mention nested inside a longer linked mention is dropped, and phrases
/// come out longest first so a short phrase never claims text belonging to
/// a longer one.
#[derive(Debug, Clone, Copy, Default)]
pub struct UmlsSource;

impl EntitySource for UmlsSource {
    fn name(&self) -> &'static str {
        "umls"
    }

    fn candidate_phrases(&self, sentence: &Sentence<'_>) -> Vec<String> {
        let mut linked: Vec<&EntityMention> = sentence
            .mentions
            .iter()
            .copied()
            .filter(|m| !m.umls_entities.is_empty() && !m.is_empty())
            .collect();
        linked.sort_by(|a, b| b.len().cmp(&a.len()).then(a.begin.cmp(&b.begin)));

        let mut kept: Vec<&EntityMention> = Vec::with_capacity(linked.len());
        for mention in linked {
            if !kept.iter().any(|outer| outer.contains(mention)) {
                kept.push(mention);
            }
        }
        distinct_phrases(sentence, kept.into_iter())
    }
}

fn distinct_phrases<'a>(
    sentence: &Sentence<'a>,
    mentions: impl Iterator<Item = &'a EntityMention>,
) -> Vec<String> {
    let phrases: IndexSet<&str> = mentions
        .map(|m| sentence.mention_text(m).trim())
        .filter(|text| !text.is_empty())
        .collect();
    phrases.into_iter().map(str::to_string).collect()
}

/// Selectable entity-source strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Generic entity mentions.
    #[default]
    Mentions,
    /// Medical mentions with UMLS concept links.
    Umls,
}

impl SourceKind {
    pub fn build(self) -> Box<dyn EntitySource> {
        match self {
            Self::Mentions => Box::new(MentionSource),
            Self::Umls => Box::new(UmlsSource),
        }
    }
}
