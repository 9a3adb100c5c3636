// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Comparison-mode normalization.
//!
//! Case folding is applied once to both pattern and text before any matcher
//! sees them. Folding is character-for-character: a character whose
//! lowercase form spans several characters is kept as-is, so offsets in the
//! folded text are offsets in the caller's text.

use std::borrow::Cow;

/// Lowercases a single character, keeping it unchanged when its lowercase
/// form is not exactly one character.
#[inline]
pub fn fold_char(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => ch,
    }
}

/// Normalizes `input` for the given comparison mode.
///
/// Borrows when nothing changes (always in case-sensitive mode).
pub fn normalize_case(input: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive || input.chars().all(|ch| fold_char(ch) == ch) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.chars().map(fold_char).collect())
    }
}

/// Normalizes `input` and splits it into characters for scanning.
pub fn normalize_chars(input: &str, case_sensitive: bool) -> Vec<char> {
    normalize_case(input, case_sensitive).chars().collect()
}
