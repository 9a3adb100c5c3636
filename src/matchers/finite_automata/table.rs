// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Transition table for the pattern-matching automaton.
//!
//! State `s` (0..=m) means "the longest pattern prefix ending at the current
//! text position has length `s`". The table has one row per state and one
//! column per alphabet character, stored row-major in a flat vector.
//!
//! Two constructions are provided and produce identical tables:
//!
//! 1. [`DfaConstruction::Naive`]: for every state and character, probe
//!    candidate states from longest to shortest and compare prefix against
//!    suffix directly. O(m³·|Σ|).
//!
//! 2. [`DfaConstruction::FailureFunction`]: copy each row from the row of
//!    the state's longest proper border, tracked incrementally. O(m·|Σ|).

use fnv::FnvBuildHasher;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Column index for code points below 256 that are not in the alphabet.
const NO_COLUMN: usize = usize::MAX;

/// How the transition table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DfaConstruction {
    /// Textbook cubic construction by direct prefix/suffix comparison
    #[default]
    Naive,
    /// Linear-per-character construction from the border of each state
    FailureFunction,
}

/// `(m + 1) × |Σ|` transition table, read-only once built.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    alphabet: Vec<char>,
    low_columns: [usize; 256],
    high_columns: HashMap<char, usize, FnvBuildHasher>,
    states: usize,
    next: Vec<usize>,
}

impl TransitionTable {
    /// Builds the table for `pattern` over the sorted union of the
    /// pattern's characters and `extra_alphabet`.
    pub fn build(pattern: &[char], extra_alphabet: &[char], construction: DfaConstruction) -> Self {
        let mut alphabet: Vec<char> = pattern.iter().chain(extra_alphabet).copied().collect();
        alphabet.sort_unstable();
        alphabet.dedup();

        let mut low_columns = [NO_COLUMN; 256];
        let mut high_columns = HashMap::with_capacity_and_hasher(alphabet.len(), FnvBuildHasher::default());
        for (column, &ch) in alphabet.iter().enumerate() {
            match u8::try_from(u32::from(ch)) {
                Ok(byte) => low_columns[usize::from(byte)] = column,
                Err(_) => {
                    high_columns.insert(ch, column);
                }
            }
        }

        let mut table = Self {
            alphabet,
            low_columns,
            high_columns,
            states: pattern.len() + 1,
            next: Vec::new(),
        };
        table.next = match construction {
            DfaConstruction::Naive => table.build_naive(pattern),
            DfaConstruction::FailureFunction => table.build_with_failure(pattern),
        };
        table
    }

    fn build_naive(&self, pattern: &[char]) -> Vec<usize> {
        let width = self.alphabet.len();
        let mut next = vec![0; self.states * width];
        for state in 0..self.states {
            for (column, &ch) in self.alphabet.iter().enumerate() {
                next[state * width + column] = naive_transition(pattern, state, ch);
            }
        }
        next
    }

    fn build_with_failure(&self, pattern: &[char]) -> Vec<usize> {
        let width = self.alphabet.len();
        let m = pattern.len();
        let mut next = vec![0; self.states * width];
        if m == 0 {
            return next;
        }

        let pattern_columns: Vec<usize> = pattern
            .iter()
            .map(|&ch| self.column(ch).unwrap_or(NO_COLUMN))
            .collect();

        next[pattern_columns[0]] = 1;
        // Border state: where the automaton would be after reading pattern[1..s]
        let mut border = 0;
        for state in 1..=m {
            let (done, rest) = next.split_at_mut(state * width);
            rest[..width].copy_from_slice(&done[border * width..(border + 1) * width]);
            if state < m {
                let column = pattern_columns[state];
                rest[column] = state + 1;
                border = done[border * width + column];
            }
        }
        next
    }

    /// Column of `ch`, or `None` if it is outside the alphabet.
    #[inline]
    pub fn column(&self, ch: char) -> Option<usize> {
        match u8::try_from(u32::from(ch)) {
            Ok(byte) => Some(self.low_columns[usize::from(byte)]).filter(|&c| c != NO_COLUMN),
            Err(_) => self.high_columns.get(&ch).copied(),
        }
    }

    /// Next state from `state` on the character in `column`.
    #[inline]
    pub fn next_state(&self, state: usize, column: usize) -> usize {
        self.next[state * self.alphabet.len() + column]
    }

    /// Row of transitions out of `state`, in alphabet order.
    pub fn row(&self, state: usize) -> &[usize] {
        let width = self.alphabet.len();
        &self.next[state * width..(state + 1) * width]
    }

    /// The sorted alphabet the table is dimensioned by.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Number of states, `m + 1`.
    pub fn state_count(&self) -> usize {
        self.states
    }
}

/// Longest `k` such that `pattern[..k]` is a suffix of `pattern[..state] ++ ch`.
fn naive_transition(pattern: &[char], state: usize, ch: char) -> usize {
    if state < pattern.len() && pattern[state] == ch {
        return state + 1;
    }
    (1..=state)
        .rev()
        .find(|&k| pattern[k - 1] == ch && pattern[..k - 1] == pattern[state + 1 - k..state])
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_textbook_table() {
        // Pattern "ababaca" over {a, b, c}
        let table = TransitionTable::build(&chars("ababaca"), &[], DfaConstruction::Naive);
        let expected = [
            [1, 0, 0],
            [1, 2, 0],
            [3, 0, 0],
            [1, 4, 0],
            [5, 0, 0],
            [1, 4, 6],
            [7, 0, 0],
            [1, 2, 0],
        ];

        assert_eq!(table.alphabet(), &['a', 'b', 'c']);
        assert_eq!(table.state_count(), 8);
        for (state, row) in expected.iter().enumerate() {
            assert_eq!(table.row(state), row, "state {state}");
        }
    }

    #[test]
    fn test_constructions_agree() {
        for pattern in ["a", "aaaa", "aabaab", "ababaca", "abcabcab", "zyx", "ααβα"] {
            let pattern = chars(pattern);
            let extra = chars("abcq");
            let naive = TransitionTable::build(&pattern, &extra, DfaConstruction::Naive);
            let failure = TransitionTable::build(&pattern, &extra, DfaConstruction::FailureFunction);

            assert_eq!(naive.alphabet(), failure.alphabet());
            for state in 0..naive.state_count() {
                assert_eq!(naive.row(state), failure.row(state));
            }
        }
    }

    #[test]
    fn test_columns() {
        let table = TransitionTable::build(&chars("bé"), &chars("a"), DfaConstruction::Naive);

        assert_eq!(table.column('a'), Some(0));
        assert_eq!(table.column('b'), Some(1));
        assert_eq!(table.column('é'), Some(2));
        assert_eq!(table.column('z'), None);
        assert_eq!(table.column('€'), None);
    }
}
