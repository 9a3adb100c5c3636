// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Integration tests for the public API.
//!
//! Every algorithm must report the same positions for the same input, and
//! the text operations must leave a text that still contains what was
//! inserted.

use patternbench_lib::config::EvaluatorConfig;
use patternbench_lib::evaluator::{ExperimentParams, SweepParameter, TextKind};
use patternbench_lib::matchers::{BitapMatcher, DfaConstruction, MatchError, Matcher};
use patternbench_lib::memory::TrackingAllocator;
use patternbench_lib::runner::splice::insert_at;
use patternbench_lib::runner::{
    Algorithm, AlgorithmChoice, Operation, OperationRequest, Runner,
};
use patternbench_lib::{Evaluator, MatchingConfig};
use test_case::test_case;

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator::new();

fn runners() -> Vec<Runner> {
    let failure_function = MatchingConfig {
        dfa_construction: DfaConstruction::FailureFunction,
        ..MatchingConfig::default()
    };
    vec![Runner::default(), Runner::new(failure_function)]
}

#[test_case("AABAACAADAABAABA", "AABA", &[0, 9, 12]; "simple match")]
#[test_case("AABAACAADAABAABA", "XYZ", &[]; "no match")]
#[test_case("BANANA", "A", &[1, 3, 5]; "single character")]
#[test_case("AAAA", "AA", &[0, 1, 2]; "overlapping")]
#[test_case("HELLO", "HELLO", &[0]; "pattern equals text")]
#[test_case("", "ABC", &[]; "empty text")]
#[test_case("ABC", "ABCDEFGH", &[]; "pattern longer than text")]
#[test_case("0123456123789123", "123", &[1, 7, 13]; "digits")]
fn test_all_algorithms_agree(text: &str, pattern: &str, expected: &[usize]) -> anyhow::Result<()> {
    for runner in runners() {
        for outcome in runner.run_all(text, pattern) {
            let result = outcome.result?;
            assert_eq!(result.positions, expected, "{}", outcome.algorithm);
            assert_eq!(result.algorithm, outcome.algorithm.name());
        }
    }
    Ok(())
}

#[test]
fn test_bitap_word_limit() -> anyhow::Result<()> {
    let runner = Runner::default();

    let pattern = "A".repeat(64);
    let text = format!("{}{}{}", "B".repeat(100), pattern, "C".repeat(50));
    for outcome in runner.run_all(&text, &pattern) {
        assert_eq!(outcome.result?.positions, vec![100]);
    }

    let too_long = "A".repeat(65);
    let outcomes = runner.run_all(&text, &too_long);
    let bitap = outcomes
        .iter()
        .find(|o| o.algorithm == Algorithm::Bitap)
        .ok_or_else(|| anyhow::anyhow!("bitap missing"))?;
    assert_eq!(
        bitap.result,
        Err(MatchError::PatternTooLong { len: 65, max: 64 })
    );
    assert!(outcomes
        .iter()
        .filter(|o| o.algorithm != Algorithm::Bitap)
        .all(|o| o.ok().is_some_and(|r| r.positions.is_empty())));
    Ok(())
}

#[test]
fn test_matcher_trait_objects() -> anyhow::Result<()> {
    let config = MatchingConfig::default();
    let text: Vec<char> = "abracadabra".chars().collect();
    let pattern: Vec<char> = "abra".chars().collect();

    for algorithm in Algorithm::ALL {
        let mut matcher: Box<dyn Matcher> = algorithm.matcher(&config);
        assert!(matches!(matcher.search(&text), Err(MatchError::NotPreprocessed(_))));

        matcher.preprocess(&pattern)?;
        assert_eq!(matcher.search(&text)?.positions, vec![0, 7]);

        let trace = matcher.trace(&text)?;
        assert_eq!(trace.iter().filter(|step| step.is_match).count(), 2);
    }

    let mut bitap = BitapMatcher::new();
    assert_eq!(bitap.preprocess(&[]), Err(MatchError::InvalidPattern));
    Ok(())
}

#[test]
fn test_insert_then_search_finds_insertions() -> anyhow::Result<()> {
    let runner = Runner::default();
    let text = "the quick brown fox jumps over the lazy dog near the river";

    let before = runner.run_one(Algorithm::ZAlgorithm, text, "the")?.match_count();

    let response = runner.execute(&OperationRequest {
        text: text.to_string(),
        pattern: "the".to_string(),
        algorithm: AlgorithmChoice::One(Algorithm::FiniteAutomata),
        case_sensitive: true,
        operation: Operation::Insert("#".to_string()),
    });
    let updated = response
        .updated_text
        .ok_or_else(|| anyhow::anyhow!("insert produced no text"))?;

    for algorithm in Algorithm::ALL {
        assert_eq!(runner.run_one(algorithm, &updated, "the#")?.match_count(), before);
    }
    Ok(())
}

#[test_case("the cat and the hat sat by the sea", "the"; "words")]
#[test_case("GATCGGAAGAGCGATCACGATCGATC", "GATC"; "adjacent dna matches")]
#[test_case("xyz", "abc"; "no occurrences")]
fn test_delete_then_reinsert_restores_count(text: &str, pattern: &str) -> anyhow::Result<()> {
    let runner = Runner::default();
    let positions = runner.run_one(Algorithm::ZAlgorithm, text, pattern)?.positions;
    let m = pattern.chars().count();
    assert!(positions.windows(2).all(|w| w[1] - w[0] >= m));

    let response = runner.execute(&OperationRequest {
        text: text.to_string(),
        pattern: pattern.to_string(),
        algorithm: AlgorithmChoice::All,
        case_sensitive: true,
        operation: Operation::Delete,
    });
    let deleted: Vec<char> = response
        .updated_text
        .ok_or_else(|| anyhow::anyhow!("delete produced no text"))?
        .chars()
        .collect();

    let offsets: Vec<usize> = positions
        .iter()
        .enumerate()
        .map(|(k, &p)| p - k * m)
        .collect();
    let rebuilt = insert_at(&deleted, &offsets, pattern);

    assert_eq!(rebuilt, text);
    for algorithm in Algorithm::ALL {
        assert_eq!(runner.run_one(algorithm, &rebuilt, pattern)?.match_count(), positions.len());
    }
    Ok(())
}

#[test]
fn test_delete_removes_every_match() -> anyhow::Result<()> {
    let runner = Runner::default();
    let response = runner.execute(&OperationRequest {
        text: "One fish, Two FISH, red fish".to_string(),
        pattern: "fish".to_string(),
        algorithm: AlgorithmChoice::All,
        case_sensitive: false,
        operation: Operation::Delete,
    });

    assert_eq!(response.results.len(), 3);
    let updated = response
        .updated_text
        .ok_or_else(|| anyhow::anyhow!("delete produced no text"))?;
    assert_eq!(updated, "One , Two , red ");
    assert!(runner.run_one(Algorithm::Bitap, &updated, "fish")?.positions.is_empty());
    Ok(())
}

#[test]
fn test_sweep_over_pattern_length() {
    let config = EvaluatorConfig {
        repeats: 2,
        ..EvaluatorConfig::default()
    };
    let evaluator = Evaluator::new(config, MatchingConfig::default());
    let fixed = ExperimentParams {
        text_len: 2_000,
        pattern_len: 4,
        alphabet_size: 4,
        kind: TextKind::Repetitive,
    };
    let sweep = evaluator.sweep(SweepParameter::PatternLength, &[2, 8], &fixed);

    assert!(sweep.failures.is_empty());
    assert_eq!(sweep.metrics.len(), 6);
    for same_value in sweep.metrics.chunks(3) {
        assert!(same_value.windows(2).all(|w| w[0].matches == w[1].matches));
        assert!(same_value[0].matches > 0);
    }
}
