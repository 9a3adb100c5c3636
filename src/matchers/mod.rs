// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Exact single-pattern matchers.
//!
//! Three independent algorithms share the [`Matcher`] capability:
//!
//! - [`ZMatcher`]: Z-array over `pattern ++ sentinel ++ text`
//! - [`BitapMatcher`]: Shift-Or bit-parallel scan, patterns up to 64 characters
//! - [`DfaMatcher`]: table-driven finite automaton
//!
//! All of them report every occurrence, overlapping ones included, as
//! strictly increasing 0-based character offsets. Case folding is not their
//! concern: callers normalize pattern and text first (see [`normalize`]).
//!
//! # Example
//!
//! ```
//! use patternbench_lib::matchers::{BitapMatcher, Matcher};
//!
//! let mut matcher = BitapMatcher::new();
//! matcher.preprocess(&['a', 'n', 'a']).unwrap();
//!
//! let text: Vec<char> = "banana".chars().collect();
//! let result = matcher.search(&text).unwrap();
//! assert_eq!(result.positions, vec![1, 3]);
//! ```

pub mod bitap;
mod error;
pub mod finite_automata;
pub mod normalize;
mod result;
pub mod trace;
pub mod z_algorithm;

#[cfg(test)]
mod tests;

pub use bitap::BitapMatcher;
pub use error::{MatchError, Result};
pub use finite_automata::{DfaConstruction, DfaMatcher, DfaOptions, UnknownCharPolicy};
pub use result::MatchResult;
pub use trace::{Highlight, HighlightKind, TraceStep};
pub use z_algorithm::ZMatcher;

use crate::memory::Probe;

/// A preprocess-then-scan exact matcher.
///
/// `preprocess` must succeed before `find_all`, `trace` or `search`;
/// otherwise they fail with [`MatchError::NotPreprocessed`]. A matcher may
/// be preprocessed again to switch patterns.
#[cfg_attr(test, mockall::automock)]
pub trait Matcher: Send {
    /// Display name of the algorithm.
    fn name(&self) -> &'static str;

    /// Builds the per-pattern state.
    fn preprocess(&mut self, pattern: &[char]) -> Result<()>;

    /// Start offsets of every occurrence, in increasing order.
    fn find_all(&self, text: &[char]) -> Result<Vec<usize>>;

    /// One [`TraceStep`] per text character, in scan order.
    fn trace(&self, text: &[char]) -> Result<Vec<TraceStep>>;

    /// Runs [`Matcher::find_all`] under a [`Probe`] and packages the result.
    fn search(&self, text: &[char]) -> Result<MatchResult> {
        let probe = Probe::start();
        let positions = self.find_all(text)?;
        let sample = probe.finish();
        Ok(MatchResult::new(self.name(), positions).with_sample(sample))
    }
}
