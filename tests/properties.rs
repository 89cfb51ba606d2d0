use clinical_negex::negex::{NegationContextAnalyzer, RuleSet};
use proptest::prelude::*;

const VOCAB: &[&str] = &[
    "no", "lesions", "sacrum", "but", "absent", "CT", "shows", "and", "mass", "of", "without",
];
const ENTITIES: &[&str] = &["lesions", "sacrum", "mass", "CT"];

fn analyzer() -> NegationContextAnalyzer {
    let rules = RuleSet::from_lines(
        ["no\t[PREN]", "without\t[PREN]", "absent\t[POST]", "but\t[CONJ]"],
        false,
    )
    .unwrap();
    NegationContextAnalyzer::new(rules)
}

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB), 1..14).prop_map(|words| words.join(" "))
}

fn entities() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(ENTITIES, 0..=ENTITIES.len())
        .prop_map(|picked| picked.into_iter().map(str::to_string).collect())
}

proptest! {
    #[test]
    fn no_entities_means_no_results(text in "\\PC{0,120}") {
        prop_assert!(analyzer().analyze(&text, &[]).is_empty());
    }

    #[test]
    fn results_are_a_subset_of_mentions(text in sentence(), phrases in entities()) {
        let results = analyzer().analyze(&text, &phrases);
        prop_assert!(results.len() <= phrases.len());
        for result in &results {
            prop_assert!(phrases.iter().any(|p| p == result.text(&text)));
        }
    }

    #[test]
    fn reanalyzing_detagged_text_is_stable(text in sentence(), phrases in entities()) {
        let analyzer = analyzer();
        let first = analyzer.analyze(&text, &phrases);
        if let Some(tagged) = analyzer.resolve(&text, &phrases) {
            let plain = tagged.plain_text();
            prop_assert_eq!(&plain, &text);
            prop_assert_eq!(analyzer.analyze(&plain, &phrases), first);
        } else {
            prop_assert!(phrases.is_empty());
            prop_assert!(first.is_empty());
        }
    }
}
