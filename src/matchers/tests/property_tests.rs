// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Property-based tests for the matchers.

use proptest::prelude::*;

use crate::matchers::finite_automata::TransitionTable;
use crate::matchers::normalize::{normalize_case, normalize_chars};
use crate::matchers::{
    BitapMatcher, DfaConstruction, DfaMatcher, DfaOptions, Matcher, ZMatcher,
};

// Small alphabets make occurrences, including overlapping ones, likely
fn pattern_strategy() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'c']), 1..8)
}

fn text_strategy() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'c', 'd']), 0..200)
}

fn brute_force(pattern: &[char], text: &[char]) -> Vec<usize> {
    if pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&i| &text[i..i + pattern.len()] == pattern)
        .collect()
}

fn all_matchers() -> Vec<Box<dyn Matcher>> {
    vec![
        Box::new(ZMatcher::new()),
        Box::new(BitapMatcher::new()),
        Box::new(DfaMatcher::new(DfaOptions::default())),
        Box::new(DfaMatcher::new(
            DfaOptions::new().construction(DfaConstruction::FailureFunction),
        )),
    ]
}

proptest! {
    // Property: every matcher agrees with the brute-force scan
    #[test]
    fn prop_matches_brute_force(pattern in pattern_strategy(), text in text_strategy()) {
        let expected = brute_force(&pattern, &text);

        for mut matcher in all_matchers() {
            matcher.preprocess(&pattern).unwrap();
            let found = matcher.find_all(&text).unwrap();
            prop_assert_eq!(&found, &expected, "{}", matcher.name());
        }
    }

    // Property: the trace marks exactly the reported match ends
    #[test]
    fn prop_trace_agrees_with_search(pattern in pattern_strategy(), text in text_strategy()) {
        let m = pattern.len();

        for mut matcher in all_matchers() {
            matcher.preprocess(&pattern).unwrap();
            let steps = matcher.trace(&text).unwrap();
            prop_assert_eq!(steps.len(), text.len());

            let traced: Vec<usize> = steps
                .iter()
                .filter(|step| step.is_match)
                .map(|step| step.highlight_ranges[0].start)
                .collect();
            prop_assert_eq!(traced.clone(), matcher.find_all(&text).unwrap());
            prop_assert!(traced.iter().all(|&start| start + m <= text.len()));
        }
    }

    // Property: the two table constructions are indistinguishable
    #[test]
    fn prop_dfa_constructions_identical(
        pattern in pattern_strategy(),
        extra in prop::collection::vec(prop::char::range('a', 'f'), 0..4)
    ) {
        let naive = TransitionTable::build(&pattern, &extra, DfaConstruction::Naive);
        let failure = TransitionTable::build(&pattern, &extra, DfaConstruction::FailureFunction);

        prop_assert_eq!(naive.alphabet(), failure.alphabet());
        for state in 0..naive.state_count() {
            prop_assert_eq!(naive.row(state), failure.row(state));
        }
    }

    // Property: one prepared automaton stays correct across different texts
    #[test]
    fn prop_dfa_deterministic(
        pattern in pattern_strategy(),
        text_a in text_strategy(),
        text_b in text_strategy()
    ) {
        let expected_a = brute_force(&pattern, &text_a);
        let expected_b = brute_force(&pattern, &text_b);

        for construction in [DfaConstruction::Naive, DfaConstruction::FailureFunction] {
            let mut matcher = DfaMatcher::new(DfaOptions::new().construction(construction));
            matcher.preprocess(&pattern).unwrap();

            prop_assert_eq!(&matcher.find_all(&text_a).unwrap(), &expected_a);
            prop_assert_eq!(&matcher.find_all(&text_b).unwrap(), &expected_b);
            prop_assert_eq!(&matcher.find_all(&text_a).unwrap(), &expected_a);
        }
    }

    // Property: case folding is idempotent and length-preserving
    #[test]
    fn prop_normalization_idempotent(input in "\\PC{0,64}") {
        let once = normalize_case(&input, false).into_owned();
        let twice = normalize_case(&once, false).into_owned();

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.chars().count(), input.chars().count());
        prop_assert_eq!(normalize_chars(&input, false), once.chars().collect::<Vec<_>>());
    }

    // Property: Bitap accepts every length up to the word width
    #[test]
    fn prop_bitap_long_patterns(pattern in prop::collection::vec(prop::sample::select(vec!['x', 'y']), 40..=64)) {
        let mut text = vec!['x'; 5];
        text.extend_from_slice(&pattern);

        let mut matcher = BitapMatcher::new();
        matcher.preprocess(&pattern).unwrap();
        prop_assert_eq!(matcher.find_all(&text).unwrap(), brute_force(&pattern, &text));
    }
}
