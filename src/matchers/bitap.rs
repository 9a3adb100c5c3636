// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Bitap (Shift-Or) matcher.
//!
//! One bit per pattern position is packed into a `u64`. In the Shift-Or
//! convention a 0 bit means "still matching": bit `j` of the state is 0 when
//! `pattern[..=j]` ends at the current text position. Each text character
//! costs one shift, one OR and one bit test.
//!
//! - Preprocessing: O(m + σ) to build the mask table
//! - Search: O(n), constant work per character
//! - Patterns are limited to [`WORD_WIDTH`] characters

use fnv::FnvHashMap;

use super::error::{MatchError, Result};
use super::trace::TraceStep;
use super::Matcher;

/// Number of pattern positions that fit in the state word.
pub const WORD_WIDTH: usize = u64::BITS as usize;

/// Display name.
pub const NAME: &str = "Bitap";

/// Mask with the low `m` bits set, for `1 <= m <= WORD_WIDTH`.
#[inline]
fn width_mask(m: usize) -> u64 {
    // Right shift keeps m == 64 well-defined, unlike `(1 << m) - 1`.
    u64::MAX >> (WORD_WIDTH - m)
}

/// Per-character mismatch masks.
///
/// Bit `j` of `mask(c)` is 0 iff `pattern[j] == c`. Code points below 256
/// are looked up in a flat table; the rest go through a hash map.
#[derive(Debug, Clone)]
struct MaskTable {
    low: [u64; 256],
    high: FnvHashMap<char, u64>,
    /// Mask for characters absent from the pattern
    absent: u64,
}

impl MaskTable {
    fn new(pattern: &[char]) -> Self {
        let absent = width_mask(pattern.len());
        let mut low = [absent; 256];
        let mut high = FnvHashMap::default();

        for (j, &ch) in pattern.iter().enumerate() {
            let clear = !(1u64 << j);
            match u8::try_from(u32::from(ch)) {
                Ok(byte) => low[usize::from(byte)] &= clear,
                Err(_) => *high.entry(ch).or_insert(absent) &= clear,
            }
        }

        Self { low, high, absent }
    }

    #[inline]
    fn mask(&self, ch: char) -> u64 {
        match u8::try_from(u32::from(ch)) {
            Ok(byte) => self.low[usize::from(byte)],
            Err(_) => self.high.get(&ch).copied().unwrap_or(self.absent),
        }
    }
}

#[derive(Debug, Clone)]
struct Prepared {
    pattern_len: usize,
    masks: MaskTable,
    /// Bit `m - 1`, clear when a full match ends at the current position
    match_bit: u64,
}

impl Prepared {
    /// Runs the shift register over `text`, reporting the state after
    /// every character.
    #[inline]
    fn scan<F>(&self, text: &[char], mut on_step: F)
    where
        F: FnMut(usize, char, u64, bool),
    {
        let mut state = u64::MAX;
        for (i, &ch) in text.iter().enumerate() {
            state = (state << 1) | self.masks.mask(ch);
            on_step(i, ch, state, state & self.match_bit == 0);
        }
    }
}

/// Exact matcher using the Shift-Or bit-parallel scan.
#[derive(Debug, Clone, Default)]
pub struct BitapMatcher {
    prepared: Option<Prepared>,
}

impl BitapMatcher {
    /// Creates a matcher awaiting [`Matcher::preprocess`].
    pub fn new() -> Self {
        Self::default()
    }

    fn prepared(&self) -> Result<&Prepared> {
        self.prepared
            .as_ref()
            .ok_or(MatchError::NotPreprocessed(NAME))
    }
}

impl Matcher for BitapMatcher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn preprocess(&mut self, pattern: &[char]) -> Result<()> {
        let m = pattern.len();
        if m == 0 {
            return Err(MatchError::InvalidPattern);
        }
        if m > WORD_WIDTH {
            return Err(MatchError::PatternTooLong {
                len: m,
                max: WORD_WIDTH,
            });
        }

        let masks = MaskTable::new(pattern);
        self.prepared = Some(Prepared {
            pattern_len: m,
            masks,
            match_bit: 1u64 << (m - 1),
        });
        Ok(())
    }

    fn find_all(&self, text: &[char]) -> Result<Vec<usize>> {
        let prepared = self.prepared()?;
        let m = prepared.pattern_len;
        let mut positions = Vec::new();
        prepared.scan(text, |i, _, _, matched| {
            if matched {
                positions.push(i + 1 - m);
            }
        });
        Ok(positions)
    }

    fn trace(&self, text: &[char]) -> Result<Vec<TraceStep>> {
        let prepared = self.prepared()?;
        let m = prepared.pattern_len;
        let visible = width_mask(m);
        let mut steps = Vec::with_capacity(text.len());

        prepared.scan(text, |i, ch, state, matched| {
            let bits = format!("{:0width$b}", state & visible, width = m);
            let step = if matched {
                let start = i + 1 - m;
                TraceStep::matched(
                    i,
                    start,
                    i + 1,
                    format!("Position {i}: read {ch:?}, bit vector {bits}, match at index {start}"),
                )
            } else {
                TraceStep::current(i, format!("Position {i}: read {ch:?}, bit vector {bits}"))
            };
            steps.push(step);
        });

        Ok(steps)
    }
}
