// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Plain-text summary of a set of measurements.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use super::metrics::AggregatedMetric;

const RULE_WIDTH: usize = 70;

/// Fastest and leanest algorithm at one text size.
#[derive(Debug, Clone, PartialEq)]
pub struct BestPerformer<'a> {
    pub text_len: usize,
    pub fastest: &'a str,
    pub fastest_ms: f64,
    pub lowest_memory: &'a str,
    pub lowest_memory_kb: f64,
}

/// Search memory of one algorithm across all its measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySummary<'a> {
    pub algorithm: &'a str,
    pub average_kb: f64,
    pub min_kb: f64,
    pub max_kb: f64,
}

/// Report over a slice of [`AggregatedMetric`]s, rendered by `Display`.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    metrics: &'a [AggregatedMetric],
}

fn kb(bytes: f64) -> f64 {
    bytes / 1024.0
}

fn ms(secs: f64) -> f64 {
    secs * 1000.0
}

impl<'a> Report<'a> {
    pub fn new(metrics: &'a [AggregatedMetric]) -> Self {
        Self { metrics }
    }

    fn algorithms(&self) -> BTreeSet<&'a str> {
        let metrics = self.metrics;
        metrics.iter().map(|m| m.algorithm.as_str()).collect()
    }

    /// Best performers by mean search time and mean search memory, per text size.
    pub fn best_performers(&self) -> Vec<BestPerformer<'a>> {
        let metrics = self.metrics;
        let sizes: BTreeSet<usize> = metrics.iter().map(|m| m.text_len).collect();

        sizes
            .into_iter()
            .filter_map(|size| {
                let at_size = || metrics.iter().filter(move |m| m.text_len == size);
                let fastest = at_size().min_by(|a, b| a.time.mean.total_cmp(&b.time.mean))?;
                let leanest = at_size().min_by(|a, b| a.memory.mean.total_cmp(&b.memory.mean))?;
                Some(BestPerformer {
                    text_len: size,
                    fastest: &fastest.algorithm,
                    fastest_ms: ms(fastest.time.mean),
                    lowest_memory: &leanest.algorithm,
                    lowest_memory_kb: kb(leanest.memory.mean),
                })
            })
            .collect()
    }

    /// Average and range of mean search memory, per algorithm.
    pub fn memory_summary(&self) -> Vec<MemorySummary<'a>> {
        self.algorithms()
            .into_iter()
            .map(|algorithm| {
                let values: Vec<f64> = self
                    .metrics
                    .iter()
                    .filter(|m| m.algorithm == algorithm)
                    .map(|m| kb(m.memory.mean))
                    .collect();
                let average_kb = values.iter().sum::<f64>() / values.len() as f64;
                MemorySummary {
                    algorithm,
                    average_kb,
                    min_kb: values.iter().copied().fold(f64::INFINITY, f64::min),
                    max_kb: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                }
            })
            .collect()
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);
        let algorithms: Vec<&str> = self.algorithms().into_iter().collect();

        writeln!(f, "{heavy}")?;
        writeln!(f, "STRING MATCHING ALGORITHMS - BENCHMARK REPORT")?;
        writeln!(f, "{heavy}")?;
        writeln!(f)?;
        writeln!(f, "Total benchmarks: {}", self.metrics.len())?;
        writeln!(f, "Algorithms: {}", algorithms.join(", "))?;
        writeln!(f)?;

        writeln!(f, "{light}")?;
        writeln!(f, "BEST PERFORMERS")?;
        writeln!(f, "{light}")?;
        for best in self.best_performers() {
            writeln!(f, "  {:>10} chars:", best.text_len)?;
            writeln!(f, "    Fastest: {:20} {:8.4} ms", best.fastest, best.fastest_ms)?;
            writeln!(
                f,
                "    Lowest Memory: {:20} {:8.2} KB",
                best.lowest_memory, best.lowest_memory_kb
            )?;
        }
        writeln!(f)?;

        writeln!(f, "{light}")?;
        writeln!(f, "MEMORY USAGE SUMMARY")?;
        writeln!(f, "{light}")?;
        for summary in self.memory_summary() {
            writeln!(f, "{}:", summary.algorithm)?;
            writeln!(f, "  Average: {:8.2} KB", summary.average_kb)?;
            writeln!(f, "  Range: {:8.2} - {:8.2} KB", summary.min_kb, summary.max_kb)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::metrics::{Summary, WorkloadShape};
    use crate::memory::Sample;
    use std::time::Duration;

    fn metric(algorithm: &str, text_len: usize, time_ms: u64, memory: usize) -> AggregatedMetric {
        let shape = WorkloadShape {
            text_len,
            pattern_len: 4,
            alphabet_size: 4,
        };
        let sample = Sample {
            elapsed: Duration::from_millis(time_ms),
            peak_memory: memory,
        };
        AggregatedMetric::from_samples(algorithm, shape, 1, Sample::default(), &[sample])
    }

    #[test]
    fn test_best_performers() {
        let metrics = vec![
            metric("Bitap", 1000, 1, 4096),
            metric("Z-Algorithm", 1000, 3, 1024),
            metric("Bitap", 5000, 9, 4096),
            metric("Finite Automata", 5000, 2, 8192),
        ];
        let report = Report::new(&metrics);
        let best = report.best_performers();

        assert_eq!(best.len(), 2);
        assert_eq!(best[0].fastest, "Bitap");
        assert_eq!(best[0].lowest_memory, "Z-Algorithm");
        assert_eq!(best[1].fastest, "Finite Automata");
        assert_eq!(best[1].lowest_memory, "Bitap");
        assert_eq!(best[1].lowest_memory_kb, 4.0);
    }

    #[test]
    fn test_memory_summary_and_rendering() {
        let metrics = vec![metric("Bitap", 10, 1, 1024), metric("Bitap", 20, 1, 3072)];
        let report = Report::new(&metrics);
        let summary = report.memory_summary();

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].average_kb, 2.0);
        assert_eq!(summary[0].min_kb, 1.0);
        assert_eq!(summary[0].max_kb, 3.0);

        let text = report.to_string();
        assert!(text.contains("Total benchmarks: 2"));
        assert!(text.contains("BEST PERFORMERS"));
        assert!(text.contains("MEMORY USAGE SUMMARY"));
        assert_eq!(metrics[0].time, Summary::from_values(&[0.001]));
    }
}
