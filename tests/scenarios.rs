use std::path::PathBuf;

use clinical_negex::{
    config::NegationConfig,
    negex::{NegationContextAnalyzer, RuleSet},
    NegexError,
};

fn bundled_rules() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources/negex_triggers.txt")
}

fn bundled_analyzer() -> NegationContextAnalyzer {
    let config = NegationConfig {
        negation_rules_path: bundled_rules(),
        ..NegationConfig::default()
    };
    NegationContextAnalyzer::from_config(&config).expect("bundled rules compile")
}

fn inline_analyzer(lines: &[&str]) -> NegationContextAnalyzer {
    NegationContextAnalyzer::new(RuleSet::from_lines(lines.iter().copied(), false).unwrap())
}

fn verdicts(
    analyzer: &NegationContextAnalyzer,
    text: &str,
    entities: &[&str],
) -> Vec<(String, bool)> {
    let phrases: Vec<String> = entities.iter().map(|e| e.to_string()).collect();
    analyzer
        .analyze(text, &phrases)
        .into_iter()
        .map(|result| (result.text(text).to_string(), result.polarity))
        .collect()
}

#[test]
fn pre_negation_covers_every_following_entity() {
    let text = "Abdominal CT showed no lesions of T10 and sacrum most likely secondary to osteoporosis.";
    let got = verdicts(&bundled_analyzer(), text, &["lesions", "T10", "sacrum"]);
    assert_eq!(
        got,
        vec![
            ("lesions".to_string(), true),
            ("T10".to_string(), true),
            ("sacrum".to_string(), true),
        ]
    );
}

#[test]
fn post_negation_covers_preceding_entity() {
    let text = "Abdominal CT shows lesions are absent most likely secondary to osteoporosis.";
    let got = verdicts(&bundled_analyzer(), text, &["lesions"]);
    assert_eq!(got, vec![("lesions".to_string(), true)]);
}

#[test]
fn conjunction_stops_scope() {
    let text = "Abdominal CT shows lesions exist but no sacrum most likely secondary to osteoporosis.";
    let got = verdicts(&bundled_analyzer(), text, &["lesions", "sacrum"]);
    assert_eq!(
        got,
        vec![("lesions".to_string(), false), ("sacrum".to_string(), true)]
    );
}

#[test]
fn empty_rules_path_is_fatal() {
    let err = NegationContextAnalyzer::from_config(&NegationConfig::default()).unwrap_err();
    assert!(matches!(err, NegexError::MissingRulesPath));
}

#[test]
fn unreadable_rules_file_is_fatal() {
    let config = NegationConfig {
        negation_rules_path: PathBuf::from("/definitely/not/here.txt"),
        ..NegationConfig::default()
    };
    let err = NegationContextAnalyzer::from_config(&config).unwrap_err();
    assert!(matches!(err, NegexError::RulesIo { .. }));
}

#[test]
fn non_word_filler_is_rejected() {
    let analyzer = inline_analyzer(&["no\t[PREN]"]);
    let err = analyzer.with_filler('-').unwrap_err();
    assert!(matches!(err, NegexError::InvalidFiller('-')));
}

#[test]
fn sentence_without_entities_yields_nothing() {
    let analyzer = bundled_analyzer();
    assert!(analyzer.analyze("No lesions were seen.", &[]).is_empty());
    assert!(analyzer.tag("No lesions were seen.", &[]).is_none());
}

#[test]
fn longest_phrase_governs_overlapping_rules() {
    let analyzer = inline_analyzer(&["does not\t[PREN]", "does not exist\t[POST]"]);
    let text = "the lesion does not exist";
    let markup = analyzer
        .resolve(text, &["lesion".to_string()])
        .unwrap()
        .markup();
    assert_eq!(markup, "the [NEGATED]lesion[NEGATED] [POST]does_not_exist[POST]");
    assert_eq!(verdicts(&analyzer, text, &["lesion"]), vec![("lesion".to_string(), true)]);
}

#[test]
fn entity_in_both_scopes_is_negated_once() {
    let analyzer = inline_analyzer(&["no\t[PREN]", "absent\t[POST]"]);
    let text = "no lesions absent";
    let results = analyzer.analyze(text, &["lesions".to_string()]);
    assert_eq!(results.len(), 1);
    assert!(results[0].polarity);
    assert_eq!(results[0].text(text), "lesions");
}

#[test]
fn repeated_entity_text_uses_first_occurrence() {
    let analyzer = inline_analyzer(&["no\t[PREN]", "but\t[CONJ]"]);
    let text = "cyst seen but no cyst";
    let results = analyzer.analyze(text, &["cyst".to_string()]);
    assert_eq!(results.len(), 1);
    assert_eq!((results[0].span_start, results[0].span_end), (0, 4));
    assert!(!results[0].polarity);
}

#[test]
fn trigger_matching_is_case_sensitive_by_default() {
    let analyzer = inline_analyzer(&["no\t[PREN]"]);
    assert_eq!(
        verdicts(&analyzer, "No pleural effusion.", &["pleural effusion"]),
        vec![("pleural effusion".to_string(), false)]
    );
}

#[test]
fn ignore_case_rules_relocate_across_whitespace_runs() {
    let rules = RuleSet::from_lines(["no\t[PREN]"], true).unwrap();
    let analyzer = NegationContextAnalyzer::new(rules);
    let text = "No pleural  effusion.";
    let results = analyzer.analyze(text, &["pleural effusion".to_string()]);
    assert_eq!(results.len(), 1);
    assert_eq!((results[0].span_start, results[0].span_end), (3, 20));
    assert_eq!(results[0].text(text), "pleural  effusion");
    assert!(results[0].polarity);
}

#[test]
fn resolved_markup_for_conjunction_sentence() {
    let analyzer = inline_analyzer(&["no\t[PREN]", "but\t[CONJ]"]);
    let text = "Abdominal CT shows lesions exist but no sacrum most likely secondary to osteoporosis.";
    let phrases = vec!["lesions".to_string(), "sacrum".to_string()];
    let markup = analyzer.resolve(text, &phrases).unwrap().markup();
    insta::assert_snapshot!(
        markup,
        @"Abdominal CT shows [ENTITY]lesions[ENTITY] exist [CONJ]but[CONJ] [PREN]no[PREN] [NEGATED]sacrum[NEGATED] most likely secondary to osteoporosis."
    );
}

#[test]
fn case_variant_mentions_keep_both_verdicts() {
    let analyzer = inline_analyzer(&["absent\t[POST]", "but\t[CONJ]"]);
    let text = "Pain is absent but pain persists";
    let results = analyzer.analyze(text, &["Pain".to_string(), "pain".to_string()]);
    let spans: Vec<(usize, usize, bool)> = results
        .iter()
        .map(|r| (r.span_start, r.span_end, r.polarity))
        .collect();
    assert_eq!(spans, vec![(0, 4, true), (19, 23, false)]);
}
