//! NegEx-style negation context analysis.
//!
//! Adapted from the NegEx algorithm described by W.W. Chapman et al. in
//! "A simple algorithm for identifying negated findings and diseases in
//! discharge summaries" (<https://pubmed.ncbi.nlm.nih.gov/12123149/>).
//!
//! Trigger phrases from the rule file are tagged as `[PREN]`, `[POST]` or
//! `[CONJ]`, entity phrases as `[ENTITY]`. Scope resolution rewrites covered
//! entities to `[NEGATED]`, and the emitter maps both kinds back to offsets
//! in the untouched sentence.

pub mod emitter;
pub mod rules;
pub mod scope;
pub mod tagger;

pub use emitter::NegationResult;
pub use rules::{Rule, RuleSet, RuleTag};
pub use scope::ScopeState;
pub use tagger::TaggedSentence;

use tracing::{debug, info_span};

use crate::{
    config::{NegationConfig, DEFAULT_FILLER},
    corpus::{Document, Sentence},
    error::{NegexError, Result},
    output::NegationRecord,
    sources::EntitySource,
};

/// Compiled rules plus the placeholder used while tagging.
///
/// Holds no per-sentence state, so one analyzer can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct NegationContextAnalyzer {
    rules: RuleSet,
    filler: char,
}

impl NegationContextAnalyzer {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            filler: DEFAULT_FILLER,
        }
    }

    /// Compile the configured rule file. An empty path is a fatal error.
    pub fn from_config(config: &NegationConfig) -> Result<Self> {
        if config.negation_rules_path.as_os_str().is_empty() {
            return Err(NegexError::MissingRulesPath);
        }
        let rules = RuleSet::from_path(&config.negation_rules_path, config.ignore_case)?;
        Self::new(rules).with_filler(config.filler)
    }

    /// Use a different placeholder; it must be a word character.
    pub fn with_filler(mut self, filler: char) -> Result<Self> {
        if !(filler.is_alphanumeric() || filler == '_') {
            return Err(NegexError::InvalidFiller(filler));
        }
        self.filler = filler;
        Ok(self)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Tag triggers and entity phrases without resolving scope.
    ///
    /// Returns `None` when there are no entity phrases to tag.
    pub fn tag(&self, text: &str, phrases: &[String]) -> Option<TaggedSentence> {
        if phrases.is_empty() {
            return None;
        }
        let markup = tagger::tag_triggers(text, &self.rules, self.filler);
        let markup = tagger::tag_entities(markup, phrases, self.filler);
        Some(TaggedSentence::new(&markup, self.filler))
    }

    /// Tag and resolve scope; the markup then carries `[NEGATED]` markers.
    pub fn resolve(&self, text: &str, phrases: &[String]) -> Option<TaggedSentence> {
        let mut tagged = self.tag(text, phrases)?;
        scope::resolve(&mut tagged);
        Some(tagged)
    }

    /// Negation verdicts for the given entity phrases of one sentence.
    pub fn analyze(&self, text: &str, phrases: &[String]) -> Vec<NegationResult> {
        self.resolve(text, phrases)
            .map(|tagged| emitter::emit(text, &tagged))
            .unwrap_or_default()
    }

    pub fn analyze_sentence(
        &self,
        sentence: &Sentence<'_>,
        source: &dyn EntitySource,
    ) -> Vec<NegationResult> {
        let phrases = source.candidate_phrases(sentence);
        let results = self.analyze(sentence.text, &phrases);
        debug!(
            sentence = sentence.index,
            phrases = phrases.len(),
            results = results.len(),
            "analyzed sentence"
        );
        results
    }

    /// Analyze every sentence, lifting offsets to document coordinates.
    ///
    /// Spans are validated first; a bad span yields `InvalidSpan`.
    pub fn analyze_document(
        &self,
        document: &Document,
        source: &dyn EntitySource,
    ) -> Result<Vec<NegationRecord>> {
        document.validate()?;
        let _span = info_span!("document", id = %document.id, source = source.name()).entered();
        let records: Vec<NegationRecord> = document
            .sentences()
            .iter()
            .flat_map(|sentence| {
                self.analyze_sentence(sentence, source)
                    .into_iter()
                    .map(move |result| NegationRecord {
                        document_id: document.id.clone(),
                        sentence: sentence.index,
                        begin: sentence.begin + result.span_start,
                        end: sentence.begin + result.span_end,
                        text: result.text(sentence.text).to_string(),
                        polarity: result.polarity,
                    })
            })
            .collect();
        Ok(records)
    }
}
