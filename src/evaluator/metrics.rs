// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Measurement records and summary statistics.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::matchers::MatchError;
use crate::memory::Sample;
use crate::runner::Algorithm;

/// Descriptive statistics of a series of samples.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl Summary {
    /// Summarizes `values`; an empty series yields all zeros.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Self {
            mean,
            median,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            std_dev: variance.sqrt(),
        }
    }
}

/// Aggregated cost of one algorithm on one workload.
///
/// Preprocessing runs once and is reported on its own. The timed repeats
/// reuse the preprocessed matcher, so `time` and `memory` describe scanning
/// only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetric {
    /// Algorithm display name
    pub algorithm: String,
    /// Text length in characters
    pub text_len: usize,
    /// Pattern length in characters
    pub pattern_len: usize,
    /// Distinct characters in the workload
    pub alphabet_size: usize,
    /// Occurrences found by the last repeat
    pub matches: usize,
    /// Preprocessing wall-clock time in seconds
    pub preprocess_secs: f64,
    /// Peak heap growth during preprocessing, in bytes
    pub preprocess_memory: usize,
    /// Search time in seconds
    pub time: Summary,
    /// Search peak heap growth in bytes
    pub memory: Summary,
    /// Raw search times in seconds, in run order
    pub time_samples: Vec<f64>,
    /// Raw search peak heap growth in bytes, in run order
    pub memory_samples: Vec<usize>,
}

impl AggregatedMetric {
    /// Builds the record from a preprocessing sample and the search samples.
    pub fn from_samples(
        algorithm: &str,
        workload: WorkloadShape,
        matches: usize,
        preprocess: Sample,
        samples: &[Sample],
    ) -> Self {
        let time_samples: Vec<f64> = samples.iter().map(|s| s.elapsed.as_secs_f64()).collect();
        let memory_samples: Vec<usize> = samples.iter().map(|s| s.peak_memory).collect();
        let memory_values: Vec<f64> = memory_samples.iter().map(|&b| b as f64).collect();

        Self {
            algorithm: algorithm.to_string(),
            text_len: workload.text_len,
            pattern_len: workload.pattern_len,
            alphabet_size: workload.alphabet_size,
            matches,
            preprocess_secs: preprocess.elapsed.as_secs_f64(),
            preprocess_memory: preprocess.peak_memory,
            time: Summary::from_values(&time_samples),
            memory: Summary::from_values(&memory_values),
            time_samples,
            memory_samples,
        }
    }
}

/// Dimensions of a measured workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadShape {
    pub text_len: usize,
    pub pattern_len: usize,
    pub alphabet_size: usize,
}

/// Kind of generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// Characters drawn uniformly from the alphabet
    #[default]
    Uniform,
    /// `A…AB` blocks with a matching `A…AB` pattern
    Repetitive,
}

impl FromStr for TextKind {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" | "random" => Ok(TextKind::Uniform),
            "repetitive" | "worst-case" => Ok(TextKind::Repetitive),
            other => Err(MatchError::InvalidParameter(format!("unknown text kind: {other}"))),
        }
    }
}

/// Parameter varied by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    TextLength,
    PatternLength,
    AlphabetSize,
}

impl Display for SweepParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SweepParameter::TextLength => "text_length",
            SweepParameter::PatternLength => "pattern_length",
            SweepParameter::AlphabetSize => "alphabet_size",
        })
    }
}

impl FromStr for SweepParameter {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "text_length" | "text" | "n" => Ok(SweepParameter::TextLength),
            "pattern_length" | "pattern" | "m" => Ok(SweepParameter::PatternLength),
            "alphabet_size" | "alphabet" | "sigma" => Ok(SweepParameter::AlphabetSize),
            other => Err(MatchError::InvalidParameter(format!(
                "unknown sweep parameter: {other}"
            ))),
        }
    }
}

/// Workload parameters of an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentParams {
    pub text_len: usize,
    pub pattern_len: usize,
    pub alphabet_size: usize,
    pub kind: TextKind,
}

impl Default for ExperimentParams {
    fn default() -> Self {
        Self {
            text_len: 100_000,
            pattern_len: 8,
            alphabet_size: 4,
            kind: TextKind::Uniform,
        }
    }
}

impl ExperimentParams {
    /// Copy with `parameter` set to `value`.
    pub fn with(mut self, parameter: SweepParameter, value: usize) -> Self {
        match parameter {
            SweepParameter::TextLength => self.text_len = value,
            SweepParameter::PatternLength => self.pattern_len = value,
            SweepParameter::AlphabetSize => self.alphabet_size = value,
        }
        self
    }
}

/// A configuration that could not be measured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepFailure {
    pub algorithm: Algorithm,
    /// Value of the swept parameter
    pub value: usize,
    pub error: String,
}

/// Ordered results of a parameter sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub parameter: SweepParameter,
    /// One entry per successful (value, algorithm), in value then algorithm order
    pub metrics: Vec<AggregatedMetric>,
    pub failures: Vec<SweepFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_summary_statistics() {
        let summary = Summary::from_values(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(summary.mean, 2.5);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
        assert!((summary.std_dev - 1.25f64.sqrt()).abs() < 1e-12);

        let odd = Summary::from_values(&[5.0, 1.0, 3.0]);
        assert_eq!(odd.median, 3.0);

        assert_eq!(Summary::from_values(&[]), Summary::default());
    }

    #[test]
    fn test_from_samples() {
        let samples = [
            Sample {
                elapsed: Duration::from_millis(2),
                peak_memory: 100,
            },
            Sample {
                elapsed: Duration::from_millis(4),
                peak_memory: 300,
            },
        ];
        let shape = WorkloadShape {
            text_len: 1000,
            pattern_len: 4,
            alphabet_size: 4,
        };
        let preprocess = Sample {
            elapsed: Duration::from_millis(1),
            peak_memory: 64,
        };
        let metric = AggregatedMetric::from_samples("Bitap", shape, 7, preprocess, &samples);

        assert_eq!(metric.matches, 7);
        assert_eq!(metric.preprocess_memory, 64);
        assert_eq!(metric.memory.mean, 200.0);
        assert_eq!(metric.memory_samples, vec![100, 300]);
        assert!((metric.time.mean - 0.003).abs() < 1e-9);
    }

    #[test]
    fn test_params_with() {
        let params = ExperimentParams::default().with(SweepParameter::PatternLength, 32);
        assert_eq!(params.pattern_len, 32);
        assert_eq!(params.text_len, 100_000);
        assert_eq!("alphabet-size".parse::<SweepParameter>().unwrap(), SweepParameter::AlphabetSize);
    }
}
