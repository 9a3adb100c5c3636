// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Deterministic workload generation.
//!
//! Alphabets are prefixes of [`SYMBOL_POOL`], so an alphabet of size 4 is
//! the DNA alphabet. Every generator draws from a seeded [`fastrand::Rng`];
//! the same seed always yields the same text and pattern.

use fastrand::Rng;

use super::metrics::{ExperimentParams, TextKind};
use crate::matchers::{MatchError, Result};

/// Symbols alphabets are drawn from, in order.
pub const SYMBOL_POOL: &str = "ACGTBDEFHIJKLMNOPQRSUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Nucleotide alphabet.
pub const DNA: [char; 4] = ['A', 'C', 'G', 'T'];

/// The first `size` symbols of the pool.
pub fn alphabet(size: usize) -> Result<Vec<char>> {
    let pool_len = SYMBOL_POOL.chars().count();
    if size == 0 || size > pool_len {
        return Err(MatchError::InvalidParameter(format!(
            "alphabet size must be between 1 and {pool_len}, got {size}"
        )));
    }
    Ok(SYMBOL_POOL.chars().take(size).collect())
}

/// `len` characters drawn uniformly from `alphabet`.
pub fn uniform_text(rng: &mut Rng, alphabet: &[char], len: usize) -> Vec<char> {
    (0..len).map(|_| alphabet[rng.usize(..alphabet.len())]).collect()
}

/// Random DNA of length `len`.
pub fn dna_text(rng: &mut Rng, len: usize) -> Vec<char> {
    uniform_text(rng, &DNA, len)
}

/// Worst-case block `A^(m-1) B`.
pub fn repetitive_pattern(m: usize) -> Vec<char> {
    let mut pattern = vec!['A'; m.saturating_sub(1)];
    pattern.push('B');
    pattern
}

/// Repeated [`repetitive_pattern`] blocks cut to `len` characters.
pub fn repetitive_text(len: usize, block: usize) -> Vec<char> {
    repetitive_pattern(block).into_iter().cycle().take(len).collect()
}

/// A random length-`m` substring of `text`, so at least one match exists.
pub fn sample_pattern(rng: &mut Rng, text: &[char], m: usize) -> Result<Vec<char>> {
    if m == 0 {
        return Err(MatchError::InvalidPattern);
    }
    if m > text.len() {
        return Err(MatchError::InvalidParameter(format!(
            "pattern length {m} exceeds text length {}",
            text.len()
        )));
    }
    let start = rng.usize(..=text.len() - m);
    Ok(text[start..start + m].to_vec())
}

/// A generated text and pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    pub text: Vec<char>,
    pub pattern: Vec<char>,
    /// Number of distinct symbols the text is drawn from
    pub alphabet_size: usize,
}

impl Workload {
    /// Generates the workload described by `params`.
    pub fn generate(params: &ExperimentParams, seed: u64, max_text_len: usize) -> Result<Self> {
        if params.text_len > max_text_len {
            return Err(MatchError::InvalidParameter(format!(
                "text length {} exceeds the maximum of {max_text_len}",
                params.text_len
            )));
        }

        let mut rng = Rng::with_seed(seed);
        match params.kind {
            TextKind::Uniform => {
                let symbols = alphabet(params.alphabet_size)?;
                let text = uniform_text(&mut rng, &symbols, params.text_len);
                let pattern = sample_pattern(&mut rng, &text, params.pattern_len)?;
                Ok(Self {
                    text,
                    pattern,
                    alphabet_size: symbols.len(),
                })
            }
            TextKind::Repetitive => {
                if params.pattern_len == 0 {
                    return Err(MatchError::InvalidPattern);
                }
                let text = repetitive_text(params.text_len, params.pattern_len);
                let pattern = repetitive_pattern(params.pattern_len);
                let alphabet_size = if params.pattern_len == 1 { 1 } else { 2 };
                Ok(Self {
                    text,
                    pattern,
                    alphabet_size,
                })
            }
        }
    }
}

/// Built-in text with the patterns to look for in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleScenario {
    pub name: &'static str,
    pub text: String,
    pub patterns: Vec<&'static str>,
}

const DNA_SAMPLE: &str = "GATCGGAAGAGCACACGTCTGAACTCCAGTCACATCACGATCTCGTATGCCGTCTTCTGCTTGAAA";

const BOOK_SAMPLE: &str = concat!(
    "It was the best of times, it was the worst of times, it was the age of \n",
    "    wisdom, it was the age of foolishness, it was the epoch of belief, it was the epoch of \n",
    "    incredulity, it was the season of Light, it was the season of Darkness, it was the \n",
    "    spring of hope, it was the winter of despair.",
);

/// The DNA and book samples used by the demo.
pub fn sample_scenarios() -> Vec<SampleScenario> {
    vec![
        SampleScenario {
            name: "dna",
            text: DNA_SAMPLE.repeat(100),
            patterns: vec!["GATC", "AAAA", "GTCT", "CGTATGCCGTCTTCTGCTTG"],
        },
        SampleScenario {
            name: "book",
            text: BOOK_SAMPLE.repeat(50),
            patterns: vec!["times", "was the", "age", "of foolishness"],
        },
    ]
}
