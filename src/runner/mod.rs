// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Uniform front end over the matchers.
//!
//! [`Runner`] normalizes case once, instantiates the requested algorithms,
//! preprocesses and scans, and packages the results. It also implements the
//! text operations (search, insert, delete), bulk search over a pattern list
//! and bounded traces.
//!
//! # Example
//!
//! ```
//! use patternbench_lib::config::MatchingConfig;
//! use patternbench_lib::runner::{Algorithm, Runner};
//!
//! let runner = Runner::new(MatchingConfig::default());
//! let outcomes = runner.run_all("AABAACAADAABAABA", "AABA");
//!
//! assert_eq!(outcomes.len(), Algorithm::ALL.len());
//! for outcome in outcomes {
//!     assert_eq!(outcome.result.unwrap().positions, vec![0, 9, 12]);
//! }
//! ```

pub mod splice;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::MatchingConfig;
use crate::matchers::normalize::normalize_chars;
use crate::matchers::{
    BitapMatcher, DfaMatcher, MatchError, MatchResult, Matcher, Result, TraceStep, ZMatcher,
};
use crate::memory::Probe;

/// The closed set of matching algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Z-array based matcher
    #[serde(rename = "Z-Algorithm")]
    ZAlgorithm,
    /// Shift-Or bit-parallel matcher
    #[serde(rename = "Bitap")]
    Bitap,
    /// Transition-table automaton
    #[serde(rename = "Finite Automata")]
    FiniteAutomata,
}

impl Algorithm {
    /// Every algorithm, in reporting order.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::ZAlgorithm,
        Algorithm::Bitap,
        Algorithm::FiniteAutomata,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::ZAlgorithm => crate::matchers::z_algorithm::NAME,
            Algorithm::Bitap => crate::matchers::bitap::NAME,
            Algorithm::FiniteAutomata => crate::matchers::finite_automata::NAME,
        }
    }

    /// A fresh, unprepared matcher configured from `config`.
    pub fn matcher(self, config: &MatchingConfig) -> Box<dyn Matcher> {
        match self {
            Algorithm::ZAlgorithm => Box::new(ZMatcher::new()),
            Algorithm::Bitap => Box::new(BitapMatcher::new()),
            Algorithm::FiniteAutomata => Box::new(DfaMatcher::new(config.dfa_options())),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = MatchError;

    /// Accepts the display names and a few common spellings, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match key.as_str() {
            "z-algorithm" | "z" | "zalgorithm" => Ok(Algorithm::ZAlgorithm),
            "bitap" | "shift-or" => Ok(Algorithm::Bitap),
            "finite-automata" | "finite-automaton" | "fa" | "dfa" => Ok(Algorithm::FiniteAutomata),
            _ => Err(MatchError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// One algorithm, or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AlgorithmChoice {
    /// A single algorithm
    One(Algorithm),
    /// Every algorithm in [`Algorithm::ALL`] order
    All,
}

impl AlgorithmChoice {
    /// The algorithms this choice expands to.
    pub fn algorithms(self) -> Vec<Algorithm> {
        match self {
            AlgorithmChoice::One(algorithm) => vec![algorithm],
            AlgorithmChoice::All => Algorithm::ALL.to_vec(),
        }
    }
}

impl FromStr for AlgorithmChoice {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(AlgorithmChoice::All)
        } else {
            s.parse().map(AlgorithmChoice::One)
        }
    }
}

impl TryFrom<String> for AlgorithmChoice {
    type Error = MatchError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AlgorithmChoice> for String {
    fn from(choice: AlgorithmChoice) -> Self {
        match choice {
            AlgorithmChoice::One(algorithm) => algorithm.name().to_string(),
            AlgorithmChoice::All => "All".to_string(),
        }
    }
}

/// Result or error of one algorithm within a multi-algorithm run.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmOutcome {
    /// Which algorithm ran
    pub algorithm: Algorithm,
    /// Its result, or the error that stopped it
    pub result: Result<MatchResult>,
}

impl AlgorithmOutcome {
    /// The result if the algorithm succeeded.
    pub fn ok(&self) -> Option<&MatchResult> {
        self.result.as_ref().ok()
    }
}

/// Per-pattern entry of a bulk search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCount {
    /// The pattern as given
    pub pattern: String,
    /// Number of occurrences
    pub count: usize,
    /// Why the pattern could not be searched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate of searching one text for many patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkResult {
    /// Algorithm display name
    pub algorithm: String,
    /// Sum of occurrences over all searched patterns
    pub total_matches: usize,
    /// Number of patterns submitted, blank ones included
    pub pattern_count: usize,
    /// One entry per non-blank pattern
    pub per_pattern: Vec<PatternCount>,
    /// Wall-clock time of the whole run
    pub elapsed_secs: f64,
    /// Peak heap growth during the run
    pub peak_memory: usize,
}

/// A bounded step-by-step replay of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceReport {
    /// Algorithm display name
    pub algorithm: String,
    /// Pattern after case normalization
    pub pattern: String,
    /// Traced prefix of the normalized text
    pub text: String,
    /// One step per traced character
    pub steps: Vec<TraceStep>,
    /// Whether the text was cut to the trace limit
    pub truncated: bool,
    /// Length of the text before truncation, in characters
    pub original_length: usize,
    /// Length of the pattern, in characters
    pub pattern_length: usize,
}

/// Text operation applied after the search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "insert_text", rename_all = "snake_case")]
pub enum Operation {
    /// Report matches only
    Search,
    /// Insert the text after every match
    Insert(String),
    /// Remove every matched span
    Delete,
}

/// A search or edit request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRequest {
    /// Text to search
    pub text: String,
    /// Pattern to search for
    pub pattern: String,
    /// Algorithm or `All`
    pub algorithm: AlgorithmChoice,
    /// Whether upper and lower case are distinct
    pub case_sensitive: bool,
    /// What to do with the matches
    pub operation: Operation,
}

/// Outcome of an [`OperationRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResponse {
    /// One outcome per requested algorithm
    pub results: Vec<AlgorithmOutcome>,
    /// The edited text, for insert and delete when some algorithm succeeded
    pub updated_text: Option<String>,
}

/// Runs matchers under a fixed [`MatchingConfig`].
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: MatchingConfig,
}

impl Runner {
    /// Creates a runner.
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    fn normalize(&self, input: &str) -> Vec<char> {
        normalize_chars(input, self.config.case_sensitive)
    }

    /// Preprocesses and scans already-normalized input, timing both.
    fn run_chars(&self, algorithm: Algorithm, text: &[char], pattern: &[char]) -> Result<MatchResult> {
        let mut matcher = algorithm.matcher(&self.config);

        let probe = Probe::start();
        let found = matcher
            .preprocess(pattern)
            .and_then(|()| matcher.find_all(text));
        let sample = probe.finish();

        let positions = found?;
        debug!(
            algorithm = %algorithm,
            text_len = text.len(),
            pattern_len = pattern.len(),
            matches = positions.len(),
            "Search completed"
        );
        Ok(MatchResult::new(algorithm.name(), positions).with_sample(sample))
    }

    /// Searches `text` for `pattern` with one algorithm.
    pub fn run_one(&self, algorithm: Algorithm, text: &str, pattern: &str) -> Result<MatchResult> {
        self.run_chars(algorithm, &self.normalize(text), &self.normalize(pattern))
    }

    /// Searches with every algorithm; failures are reported per algorithm.
    pub fn run_all(&self, text: &str, pattern: &str) -> Vec<AlgorithmOutcome> {
        self.run(AlgorithmChoice::All, text, pattern)
    }

    /// Searches with the algorithms `choice` expands to.
    pub fn run(&self, choice: AlgorithmChoice, text: &str, pattern: &str) -> Vec<AlgorithmOutcome> {
        let text = self.normalize(text);
        let pattern = self.normalize(pattern);
        self.run_normalized(choice, &text, &pattern)
    }

    fn run_normalized(&self, choice: AlgorithmChoice, text: &[char], pattern: &[char]) -> Vec<AlgorithmOutcome> {
        choice
            .algorithms()
            .into_iter()
            .map(|algorithm| {
                let result = self.run_chars(algorithm, text, pattern);
                if let Err(err) = &result {
                    warn!(algorithm = %algorithm, error = %err, "Algorithm skipped");
                }
                AlgorithmOutcome { algorithm, result }
            })
            .collect()
    }

    /// Searches one text for each pattern in turn.
    ///
    /// Blank patterns are skipped. A pattern the algorithm cannot handle is
    /// recorded with its error and the run moves on.
    pub fn run_bulk<S: AsRef<str>>(&self, algorithm: Algorithm, text: &str, patterns: &[S]) -> BulkResult {
        let text = self.normalize(text);
        let mut prepared: Vec<(&str, Vec<char>, Box<dyn Matcher>)> = patterns
            .iter()
            .map(AsRef::as_ref)
            .filter(|pattern| !pattern.trim().is_empty())
            .map(|pattern| (pattern, self.normalize(pattern), algorithm.matcher(&self.config)))
            .collect();
        let mut counts: Vec<Result<usize>> = Vec::with_capacity(prepared.len());

        // Only preprocessing and scanning happen under the probe
        let probe = Probe::start();
        for (_, pattern, matcher) in prepared.iter_mut() {
            let found = matcher
                .preprocess(pattern)
                .and_then(|()| matcher.find_all(&text))
                .map(|positions| positions.len());
            counts.push(found);
        }
        let sample = probe.finish();

        let mut total_matches = 0;
        let per_pattern: Vec<PatternCount> = prepared
            .iter()
            .zip(counts)
            .map(|((pattern, _, _), found)| match found {
                Ok(count) => {
                    total_matches += count;
                    PatternCount {
                        pattern: pattern.to_string(),
                        count,
                        error: None,
                    }
                }
                Err(err) => PatternCount {
                    pattern: pattern.to_string(),
                    count: 0,
                    error: Some(err.to_string()),
                },
            })
            .collect();

        debug!(
            algorithm = %algorithm,
            patterns = patterns.len(),
            total_matches,
            "Bulk search completed"
        );
        BulkResult {
            algorithm: algorithm.name().to_string(),
            total_matches,
            pattern_count: patterns.len(),
            per_pattern,
            elapsed_secs: sample.elapsed.as_secs_f64(),
            peak_memory: sample.peak_memory,
        }
    }

    /// Traces the scan over at most `trace_limit` characters of `text`.
    pub fn run_trace(&self, algorithm: Algorithm, text: &str, pattern: &str) -> Result<TraceReport> {
        let pattern = self.normalize(pattern);
        let mut text = self.normalize(text);
        if text.is_empty() {
            return Err(MatchError::InvalidParameter(
                "Text cannot be empty".to_string(),
            ));
        }

        let original_length = text.len();
        let truncated = original_length > self.config.trace_limit;
        text.truncate(self.config.trace_limit);

        let mut matcher = algorithm.matcher(&self.config);
        matcher.preprocess(&pattern)?;
        let steps = matcher.trace(&text)?;

        Ok(TraceReport {
            algorithm: algorithm.name().to_string(),
            pattern_length: pattern.len(),
            pattern: pattern.into_iter().collect(),
            text: text.into_iter().collect(),
            steps,
            truncated,
            original_length,
        })
    }

    /// Executes a request: search, then apply the edit using the positions
    /// of the first algorithm that succeeded.
    ///
    /// Edits apply to the caller's text as given; case folding only affects
    /// where matches are found.
    pub fn execute(&self, request: &OperationRequest) -> OperationResponse {
        let runner = Runner::new(self.config.with_case_sensitive(request.case_sensitive));
        let original: Vec<char> = request.text.chars().collect();
        let text = runner.normalize(&request.text);
        let pattern = runner.normalize(&request.pattern);
        let results = runner.run_normalized(request.algorithm, &text, &pattern);

        let positions = results.iter().find_map(AlgorithmOutcome::ok).map(|r| &r.positions);
        let m = pattern.len();
        let updated_text = match (&request.operation, positions) {
            (Operation::Search, _) | (_, None) => None,
            (Operation::Delete, Some(positions)) => {
                Some(splice::delete_matches(&original, positions, m))
            }
            (Operation::Insert(insert), Some(positions)) => {
                Some(splice::insert_after_matches(&original, positions, m, insert))
            }
        };

        OperationResponse {
            results,
            updated_text,
        }
    }
}
