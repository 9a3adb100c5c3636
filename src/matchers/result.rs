// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! The common output shape produced by every matcher.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::memory::Sample;

/// Positions of every occurrence of a pattern, together with the cost of
/// the scan that found them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 0-indexed character offsets of match starts, strictly increasing
    pub positions: Vec<usize>,

    /// Display name of the algorithm that produced the result
    pub algorithm: String,

    /// Wall-clock duration of the scan in seconds
    pub elapsed_secs: f64,

    /// Peak heap bytes allocated by the scan above its starting baseline
    pub peak_memory: usize,
}

impl MatchResult {
    /// Creates a result with no cost information attached.
    pub fn new<S: Into<String>>(algorithm: S, positions: Vec<usize>) -> Self {
        Self {
            positions,
            algorithm: algorithm.into(),
            elapsed_secs: 0.0,
            peak_memory: 0,
        }
    }

    /// Attaches the time and memory recorded for the scan.
    pub fn with_sample(mut self, sample: Sample) -> Self {
        self.elapsed_secs = sample.elapsed.as_secs_f64();
        self.peak_memory = sample.peak_memory;
        self
    }

    /// Number of occurrences found.
    pub fn match_count(&self) -> usize {
        self.positions.len()
    }

    /// Scan duration.
    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed_secs)
    }

    /// The recorded cost as a measurement sample.
    pub fn sample(&self) -> Sample {
        Sample {
            elapsed: self.elapsed(),
            peak_memory: self.peak_memory,
        }
    }
}
