// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Z-Algorithm matcher.
//!
//! The search builds the Z-array of `pattern ++ SENTINEL ++ text`, where
//! `Z[i]` is the length of the longest substring starting at `i` that is also
//! a prefix of the concatenation. A text position is a match start exactly
//! when its Z-value equals the pattern length.
//!
//! The concatenation is built over `u32` symbols and the sentinel is
//! `u32::MAX`, which is not a Unicode scalar value, so it can never collide
//! with a pattern or text character.
//!
//! - Preprocessing: O(m), just a copy of the pattern
//! - Search: O(n + m) time and space

use super::error::{MatchError, Result};
use super::trace::TraceStep;
use super::Matcher;

/// Separator between pattern and text in the concatenation.
const SENTINEL: u32 = u32::MAX;

/// Display name.
pub const NAME: &str = "Z-Algorithm";

/// The Z-box `[left, right)` as seen when a position was computed.
#[derive(Debug, Clone, Copy)]
struct ZBox {
    /// Whether the position fell inside the box before extension
    inside: bool,
    left: usize,
    right: usize,
}

/// Computes the Z-array of `s`, reporting each position after it is settled.
///
/// Inside the box `[left, right)` the value is seeded from the mirrored
/// position `i - left` and only extended by direct comparison beyond
/// `right`; outside it is computed from scratch.
fn z_array_with<F>(s: &[u32], mut on_step: F) -> Vec<usize>
where
    F: FnMut(usize, usize, ZBox),
{
    let n = s.len();
    let mut z = vec![0; n];
    if n == 0 {
        return z;
    }
    z[0] = n;

    let (mut left, mut right) = (0, 0);
    for i in 1..n {
        let inside = i < right;
        let mut len = if inside { (right - i).min(z[i - left]) } else { 0 };

        while i + len < n && s[len] == s[i + len] {
            len += 1;
        }

        if i + len > right {
            left = i;
            right = i + len;
        }

        z[i] = len;
        on_step(i, len, ZBox { inside, left, right });
    }

    z
}

/// Computes the Z-array of `s`.
pub fn z_array(s: &[u32]) -> Vec<usize> {
    z_array_with(s, |_, _, _| {})
}

fn concat(pattern: &[char], text: &[char]) -> Vec<u32> {
    let mut s = Vec::with_capacity(pattern.len() + 1 + text.len());
    s.extend(pattern.iter().map(|&ch| ch as u32));
    s.push(SENTINEL);
    s.extend(text.iter().map(|&ch| ch as u32));
    s
}

/// Exact matcher based on the Z-array of the pattern/text concatenation.
#[derive(Debug, Clone, Default)]
pub struct ZMatcher {
    pattern: Option<Vec<char>>,
}

impl ZMatcher {
    /// Creates a matcher awaiting [`Matcher::preprocess`].
    pub fn new() -> Self {
        Self::default()
    }

    fn pattern(&self) -> Result<&[char]> {
        self.pattern
            .as_deref()
            .ok_or(MatchError::NotPreprocessed(NAME))
    }
}

impl Matcher for ZMatcher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn preprocess(&mut self, pattern: &[char]) -> Result<()> {
        if pattern.is_empty() {
            return Err(MatchError::InvalidPattern);
        }
        self.pattern = Some(pattern.to_vec());
        Ok(())
    }

    fn find_all(&self, text: &[char]) -> Result<Vec<usize>> {
        let pattern = self.pattern()?;
        let m = pattern.len();
        if m > text.len() {
            return Ok(Vec::new());
        }

        let z = z_array(&concat(pattern, text));
        Ok(z.iter()
            .enumerate()
            .skip(m + 1)
            .filter(|&(_, &len)| len == m)
            .map(|(i, _)| i - m - 1)
            .collect())
    }

    fn trace(&self, text: &[char]) -> Result<Vec<TraceStep>> {
        let pattern = self.pattern()?;
        let m = pattern.len();
        let n = text.len();
        let mut steps = Vec::with_capacity(n);

        z_array_with(&concat(pattern, text), |i, len, zbox| {
            if i <= m {
                return;
            }
            let index = i - m - 1;
            let step = if len == m {
                TraceStep::matched(
                    index,
                    index,
                    index + m,
                    format!("Position {index}: Z = {m} equals the pattern length, match found"),
                )
            } else {
                let region = if zbox.inside {
                    "inside Z-box, reusing mirrored value"
                } else {
                    "outside Z-box, comparing from scratch"
                };
                TraceStep::compare(
                    index,
                    (index + len).min(n),
                    format!(
                        "Position {index}: {region}, Z = {len} (box [{}, {}))",
                        zbox.left.saturating_sub(m + 1),
                        zbox.right.saturating_sub(m + 1)
                    ),
                )
            };
            steps.push(step);
        });

        Ok(steps)
    }
}
