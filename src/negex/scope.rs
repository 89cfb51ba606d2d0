//! Negation scope resolution over bracket-tagged tokens.
//!
//! Two sweeps run over the same token sequence. The forward sweep opens a
//! scope at each `[PREN]` trigger and negates the entities that follow it.
//! The backward sweep opens one at each `[POST]` trigger and negates the
//! entities before it. Any other trigger closes the open scope in the
//! direction of the sweep, so a conjunction such as "but" stops a scope
//! without negating anything itself.

use tracing::trace;

use super::{
    rules::RuleTag,
    tagger::{TaggedSentence, ENTITY_MARKER, NEGATED_MARKER},
};

/// Scope state of a single sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    None,
    PreOpen,
    PostOpen,
}

/// Rewrite `[ENTITY]` to `[NEGATED]` wherever a negation scope covers it.
///
/// Returns the number of tokens rewritten. A token reached by both sweeps is
/// rewritten once.
pub fn resolve(tagged: &mut TaggedSentence) -> usize {
    let tokens = tagged.tokens_mut();
    let forward = sweep(tokens.iter_mut(), RuleTag::Pre, ScopeState::PreOpen);
    let backward = sweep(tokens.iter_mut().rev(), RuleTag::Post, ScopeState::PostOpen);
    trace!(forward, backward, "resolved negation scopes");
    forward + backward
}

fn sweep<'a, I>(tokens: I, opener: RuleTag, open: ScopeState) -> usize
where
    I: Iterator<Item = &'a mut String>,
{
    let mut state = ScopeState::None;
    let mut rewritten = 0;
    for token in tokens {
        state = match leading_tag(token) {
            Some(tag) if tag == opener => open,
            Some(_) => ScopeState::None,
            None => state,
        };
        if state == open && token.contains(ENTITY_MARKER) {
            *token = token.replace(ENTITY_MARKER, NEGATED_MARKER);
            rewritten += 1;
        }
    }
    rewritten
}

/// Trigger tag a token starts with, if any.
pub fn leading_tag(token: &str) -> Option<RuleTag> {
    [RuleTag::Pre, RuleTag::Post, RuleTag::Conj]
        .into_iter()
        .find(|tag| token.starts_with(tag.marker()))
}
