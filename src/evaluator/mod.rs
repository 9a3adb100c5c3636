// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Instrumented performance evaluation.
//!
//! The [`Evaluator`] measures wall-clock time and peak heap growth of the
//! matchers under controlled conditions:
//!
//! - [`Evaluator::measure`]: one algorithm on one text and pattern, repeated
//! - [`Evaluator::sweep`]: every configured algorithm while one workload
//!   parameter varies, spread across worker threads
//! - [`Evaluator::benchmark`]: time against text length on DNA prefixes
//!
//! Memory figures come from [`crate::memory`] and read as zero unless the
//! process installs [`crate::memory::TrackingAllocator`].
//!
//! Preprocessing is measured once, outside the timed region. The repeats
//! then reuse the prepared matcher, so the search figures cover scanning
//! only.

pub mod metrics;
pub mod report;
pub mod workload;

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use fastrand::Rng;
use fnv::FnvHashSet;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{EvaluatorConfig, MatchingConfig};
use crate::error::AppResult;
use crate::matchers::normalize::normalize_chars;
use crate::matchers::{MatchError, Matcher, Result};
use crate::memory::{self, Probe, Sample};
use crate::runner::Algorithm;

pub use metrics::{
    AggregatedMetric, ExperimentParams, Summary, Sweep, SweepFailure, SweepParameter, TextKind,
    WorkloadShape,
};
pub use report::Report;
pub use workload::{sample_scenarios, SampleScenario, Workload};

/// File the text report is written to inside the output directory.
pub const REPORT_FILE: &str = "benchmark_report.txt";

/// One point of a time-against-length series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkPoint {
    /// Text prefix length in characters
    pub length: usize,
    /// Preprocess plus search time in seconds
    pub time_secs: f64,
    /// Peak heap growth in bytes
    pub peak_memory: usize,
}

/// Runs measurements under a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
    matching: MatchingConfig,
}

#[derive(Debug, Clone, Copy)]
struct Job {
    value_index: usize,
    value: usize,
    algorithm: Algorithm,
}

impl Evaluator {
    /// Creates an evaluator.
    pub fn new(config: EvaluatorConfig, matching: MatchingConfig) -> Self {
        Self { config, matching }
    }

    /// The evaluator settings.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Measures `algorithm` on `text` and `pattern` over `repeats` searches.
    pub fn measure(
        &self,
        algorithm: Algorithm,
        text: &str,
        pattern: &str,
        repeats: usize,
    ) -> Result<AggregatedMetric> {
        let text = normalize_chars(text, self.matching.case_sensitive);
        let pattern = normalize_chars(pattern, self.matching.case_sensitive);
        let alphabet_size = text
            .iter()
            .chain(&pattern)
            .collect::<FnvHashSet<_>>()
            .len();

        let mut matcher = algorithm.matcher(&self.matching);
        let metric = measure_matcher(matcher.as_mut(), &text, &pattern, alphabet_size, repeats)?;
        info!(
            algorithm = %algorithm,
            text_len = metric.text_len,
            pattern_len = metric.pattern_len,
            mean_secs = metric.time.mean,
            memory_tracked = memory::is_tracking(),
            "Measurement completed"
        );
        Ok(metric)
    }

    /// Measures every configured algorithm at each value of `parameter`,
    /// holding the other parameters at `fixed`.
    ///
    /// Configurations that fail, such as Bitap with a pattern longer than
    /// the word width, are recorded in [`Sweep::failures`] and skipped.
    pub fn sweep(&self, parameter: SweepParameter, values: &[usize], fixed: &ExperimentParams) -> Sweep {
        let jobs: Vec<Job> = values
            .iter()
            .enumerate()
            .flat_map(|(value_index, &value)| {
                self.config.algorithms.iter().map(move |&algorithm| Job {
                    value_index,
                    value,
                    algorithm,
                })
            })
            .collect();

        let workers = self.config.effective_workers().clamp(1, jobs.len().max(1));
        if !memory::is_tracking() {
            warn!("TrackingAllocator is not installed, memory figures will read as zero");
        }
        info!(
            parameter = %parameter,
            configurations = jobs.len(),
            workers,
            "Starting sweep"
        );

        let next = AtomicUsize::new(0);
        let collected = Mutex::new(Vec::with_capacity(jobs.len()));
        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    let Some(job) = jobs.get(index) else {
                        break;
                    };
                    let outcome = self.run_job(parameter, fixed, job);
                    collected.lock().push((index, outcome));
                });
            }
        });

        let mut collected = collected.into_inner();
        collected.sort_by_key(|(index, _)| *index);

        let mut sweep = Sweep {
            parameter,
            metrics: Vec::with_capacity(collected.len()),
            failures: Vec::new(),
        };
        for (index, outcome) in collected {
            match outcome {
                Ok(metric) => sweep.metrics.push(metric),
                Err(err) => {
                    let job = jobs[index];
                    warn!(
                        algorithm = %job.algorithm,
                        value = job.value,
                        error = %err,
                        "Configuration skipped"
                    );
                    sweep.failures.push(SweepFailure {
                        algorithm: job.algorithm,
                        value: job.value,
                        error: err.to_string(),
                    });
                }
            }
        }
        sweep
    }

    fn run_job(&self, parameter: SweepParameter, fixed: &ExperimentParams, job: &Job) -> Result<AggregatedMetric> {
        let params = fixed.with(parameter, job.value);
        // Same seed for every algorithm at a given value, so they see the same input
        let seed = self.config.seed.wrapping_add(job.value_index as u64);
        let workload = Workload::generate(&params, seed, self.config.max_text_len)?;

        let mut matcher = job.algorithm.matcher(&self.matching);
        measure_matcher(
            matcher.as_mut(),
            &workload.text,
            &workload.pattern,
            workload.alphabet_size,
            self.config.repeats,
        )
    }

    /// Times preprocess plus search on prefixes of one random DNA text, at
    /// lengths `step, 2·step, …` up to `max_length`.
    pub fn benchmark(
        &self,
        algorithm: Algorithm,
        pattern: &str,
        max_length: usize,
        step: usize,
    ) -> Result<Vec<BenchmarkPoint>> {
        if step == 0 || max_length == 0 {
            return Err(MatchError::InvalidParameter(
                "max_length and step must be greater than 0".to_string(),
            ));
        }
        if max_length > self.config.max_text_len {
            return Err(MatchError::InvalidParameter(format!(
                "Max length is {} characters",
                self.config.max_text_len
            )));
        }

        let pattern = normalize_chars(pattern, self.matching.case_sensitive);
        let mut rng = Rng::with_seed(self.config.seed);
        let full_text = workload::dna_text(&mut rng, max_length);

        let mut points = Vec::with_capacity(max_length / step);
        for length in (step..=max_length).step_by(step) {
            let text = &full_text[..length];
            let mut matcher = algorithm.matcher(&self.matching);

            let probe = Probe::start();
            let found = matcher.preprocess(&pattern).and_then(|()| matcher.find_all(text));
            let sample = probe.finish();
            found?;

            points.push(BenchmarkPoint {
                length,
                time_secs: sample.elapsed.as_secs_f64(),
                peak_memory: sample.peak_memory,
            });
        }

        debug!(algorithm = %algorithm, points = points.len(), "Benchmark series completed");
        Ok(points)
    }

    /// Writes `metrics` as pretty JSON to `filename` in the output directory.
    pub fn save_results(&self, metrics: &[AggregatedMetric], filename: &str) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.config.output_dir)?;
        let path = self.config.output_dir.join(filename);
        fs::write(&path, serde_json::to_string_pretty(metrics)?)?;
        info!(path = %path.display(), count = metrics.len(), "Saved results");
        Ok(path)
    }

    /// Writes the text [`Report`] for `metrics` to the output directory.
    pub fn write_report(&self, metrics: &[AggregatedMetric]) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.config.output_dir)?;
        let path = self.config.output_dir.join(REPORT_FILE);
        fs::write(&path, Report::new(metrics).to_string())?;
        info!(path = %path.display(), "Saved report");
        Ok(path)
    }
}

/// Preprocesses once under its own probe, then runs `repeats` timed searches.
pub fn measure_matcher(
    matcher: &mut dyn Matcher,
    text: &[char],
    pattern: &[char],
    alphabet_size: usize,
    repeats: usize,
) -> Result<AggregatedMetric> {
    if repeats == 0 {
        return Err(MatchError::InvalidParameter(
            "repeats must be greater than 0".to_string(),
        ));
    }

    let probe = Probe::start();
    let prepared = matcher.preprocess(pattern);
    let preprocess = probe.finish();
    prepared?;

    let mut samples: Vec<Sample> = Vec::with_capacity(repeats);
    let mut matches = 0;
    for _ in 0..repeats {
        let result = matcher.search(text)?;
        matches = result.match_count();
        samples.push(result.sample());
    }

    let shape = WorkloadShape {
        text_len: text.len(),
        pattern_len: pattern.len(),
        alphabet_size,
    };
    debug!(
        algorithm = matcher.name(),
        repeats,
        matches,
        "Measured"
    );
    Ok(AggregatedMetric::from_samples(
        matcher.name(),
        shape,
        matches,
        preprocess,
        &samples,
    ))
}
