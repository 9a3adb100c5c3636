// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Step records replaying a scan for visualization.
//!
//! Every matcher emits exactly one [`TraceStep`] per text character it
//! examines, in visitation order.

use serde::{Deserialize, Serialize};

/// Role of a highlighted text range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    /// The character being read
    Current,
    /// A span compared against the pattern prefix
    Compare,
    /// A complete occurrence of the pattern
    Match,
}

/// Half-open character range `[start, end)` in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    /// First highlighted character
    pub start: usize,
    /// One past the last highlighted character
    pub end: usize,
    /// What the range represents
    #[serde(rename = "type")]
    pub kind: HighlightKind,
}

/// One scan step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    /// Text offset of the character examined
    pub index: usize,
    /// Human-readable account of the step
    pub description: String,
    /// Whether this step completed an occurrence
    #[serde(rename = "match")]
    pub is_match: bool,
    /// Ranges to highlight
    pub highlight_ranges: Vec<Highlight>,
}

impl TraceStep {
    /// A step that reads the character at `index`.
    pub fn current(index: usize, description: String) -> Self {
        Self {
            index,
            description,
            is_match: false,
            highlight_ranges: vec![Highlight {
                start: index,
                end: index + 1,
                kind: HighlightKind::Current,
            }],
        }
    }

    /// A step that compares `[index, end)` against the pattern prefix.
    pub fn compare(index: usize, end: usize, description: String) -> Self {
        Self {
            index,
            description,
            is_match: false,
            highlight_ranges: vec![Highlight {
                start: index,
                end,
                kind: HighlightKind::Compare,
            }],
        }
    }

    /// A step that completes an occurrence spanning `[start, end)`.
    pub fn matched(index: usize, start: usize, end: usize, description: String) -> Self {
        Self {
            index,
            description,
            is_match: true,
            highlight_ranges: vec![Highlight {
                start,
                end,
                kind: HighlightKind::Match,
            }],
        }
    }
}
