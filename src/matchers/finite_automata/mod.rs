// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Deterministic finite automaton matcher.
//!
//! Preprocessing compiles the pattern into a transition table; searching is
//! one table lookup per text character. The automaton never resets after a
//! match, so overlapping occurrences are reported, the same as the Z and
//! Bitap matchers.
//!
//! # Example
//!
//! ```
//! use patternbench_lib::matchers::{DfaMatcher, DfaOptions, Matcher};
//!
//! let mut matcher = DfaMatcher::new(DfaOptions::default());
//! let pattern: Vec<char> = "AABA".chars().collect();
//! let text: Vec<char> = "AABAACAADAABAABA".chars().collect();
//!
//! matcher.preprocess(&pattern).unwrap();
//! assert_eq!(matcher.find_all(&text).unwrap(), vec![0, 9, 12]);
//! ```
//!
//! # Performance Characteristics
//!
//! - Preprocessing: O(m³·|Σ|) with [`DfaConstruction::Naive`], O(m·|Σ|) with
//!   [`DfaConstruction::FailureFunction`]
//! - Space: O(m·|Σ|) for the table
//! - Search: O(n)

mod table;

use serde::{Deserialize, Serialize};

pub use table::{DfaConstruction, TransitionTable};

use super::error::{MatchError, Result};
use super::trace::TraceStep;
use super::Matcher;

/// Display name.
pub const NAME: &str = "Finite Automata";

/// What the scan does with a character outside the automaton alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCharPolicy {
    /// Fall back to the start state, as no pattern prefix can end there
    #[default]
    ResetToStart,
    /// Fail the search with [`MatchError::UnknownCharacter`]
    Reject,
}

/// Options for building the automaton.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DfaOptions {
    /// Table construction strategy
    pub construction: DfaConstruction,
    /// Handling of characters outside the alphabet
    pub unknown_chars: UnknownCharPolicy,
    /// Characters added to the alphabet beyond those of the pattern
    pub extra_alphabet: Vec<char>,
}

impl DfaOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the table construction strategy.
    pub fn construction(mut self, construction: DfaConstruction) -> Self {
        self.construction = construction;
        self
    }

    /// Sets the unknown-character policy.
    pub fn unknown_chars(mut self, policy: UnknownCharPolicy) -> Self {
        self.unknown_chars = policy;
        self
    }

    /// Sets the extra alphabet.
    pub fn extra_alphabet(mut self, alphabet: impl IntoIterator<Item = char>) -> Self {
        self.extra_alphabet = alphabet.into_iter().collect();
        self
    }
}

/// One transition taken during a scan.
#[derive(Debug, Clone, Copy)]
struct Transition {
    from: usize,
    to: usize,
    known: bool,
}

/// Exact matcher driven by a precomputed transition table.
#[derive(Debug, Clone, Default)]
pub struct DfaMatcher {
    options: DfaOptions,
    table: Option<TransitionTable>,
}

impl DfaMatcher {
    /// Creates a matcher awaiting [`Matcher::preprocess`].
    pub fn new(options: DfaOptions) -> Self {
        Self {
            options,
            table: None,
        }
    }

    #[cfg(test)]
    fn table(&self) -> Option<&TransitionTable> {
        self.table.as_ref()
    }

    fn prepared(&self) -> Result<&TransitionTable> {
        self.table.as_ref().ok_or(MatchError::NotPreprocessed(NAME))
    }

    /// Runs the automaton over `text`, reporting every transition.
    fn scan<F>(&self, text: &[char], mut on_step: F) -> Result<()>
    where
        F: FnMut(usize, char, Transition),
    {
        let table = self.prepared()?;
        let mut state = 0;
        for (i, &ch) in text.iter().enumerate() {
            let from = state;
            let known = match table.column(ch) {
                Some(column) => {
                    state = table.next_state(state, column);
                    true
                }
                None => match self.options.unknown_chars {
                    UnknownCharPolicy::ResetToStart => {
                        state = 0;
                        false
                    }
                    UnknownCharPolicy::Reject => {
                        return Err(MatchError::UnknownCharacter { ch, index: i });
                    }
                },
            };
            on_step(i, ch, Transition { from, to: state, known });
        }
        Ok(())
    }
}

impl Matcher for DfaMatcher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn preprocess(&mut self, pattern: &[char]) -> Result<()> {
        if pattern.is_empty() {
            return Err(MatchError::InvalidPattern);
        }

        let table = TransitionTable::build(
            pattern,
            &self.options.extra_alphabet,
            self.options.construction,
        );
        self.table = Some(table);
        Ok(())
    }

    fn find_all(&self, text: &[char]) -> Result<Vec<usize>> {
        let accepting = self.prepared()?.state_count() - 1;
        let mut positions = Vec::new();
        self.scan(text, |i, _, step| {
            if step.to == accepting {
                positions.push(i + 1 - accepting);
            }
        })?;
        Ok(positions)
    }

    fn trace(&self, text: &[char]) -> Result<Vec<TraceStep>> {
        let accepting = self.prepared()?.state_count() - 1;
        let mut steps = Vec::with_capacity(text.len());

        self.scan(text, |i, ch, step| {
            let Transition { from, to, known } = step;
            let traced = if to == accepting {
                let start = i + 1 - accepting;
                TraceStep::matched(
                    i,
                    start,
                    i + 1,
                    format!("Position {i}: read {ch:?}, state {from} -> {to}, accepting state reached, match at index {start}"),
                )
            } else if !known {
                TraceStep::current(
                    i,
                    format!("Position {i}: read {ch:?}, not in alphabet, state {from} -> 0"),
                )
            } else if to > 0 {
                TraceStep::compare(
                    i + 1 - to,
                    i + 1,
                    format!("Position {i}: read {ch:?}, state {from} -> {to}"),
                )
            } else {
                TraceStep::current(i, format!("Position {i}: read {ch:?}, state {from} -> 0"))
            };
            steps.push(traced);
        })?;

        Ok(steps)
    }
}
