// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Matching configuration module.
//!
//! Options that change what a search reports or how the automaton is built.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use crate::matchers::normalize::normalize_chars;
use crate::matchers::{DfaConstruction, DfaOptions, UnknownCharPolicy};
use serde::{Deserialize, Serialize};

/// Matching options shared by every algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Whether upper and lower case are distinct
    pub case_sensitive: bool,

    /// Transition table construction for the finite automaton
    pub dfa_construction: DfaConstruction,

    /// What the finite automaton does with characters outside its alphabet
    pub unknown_chars: UnknownCharPolicy,

    /// Characters added to the automaton alphabet
    #[serde(default)]
    pub extra_alphabet: Option<String>,

    /// Maximum number of text characters a trace covers
    pub trace_limit: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            dfa_construction: DfaConstruction::Naive,
            unknown_chars: UnknownCharPolicy::ResetToStart,
            extra_alphabet: None,
            trace_limit: 250,
        }
    }
}

impl MatchingConfig {
    /// Returns a copy with a different case mode.
    pub fn with_case_sensitive(&self, case_sensitive: bool) -> Self {
        Self {
            case_sensitive,
            ..self.clone()
        }
    }

    /// Automaton options derived from this configuration.
    ///
    /// The extra alphabet goes through the same case folding as text and
    /// pattern, so a case-insensitive search never sees upper-case columns.
    pub fn dfa_options(&self) -> DfaOptions {
        let extra = self
            .extra_alphabet
            .as_deref()
            .map(|alphabet| normalize_chars(alphabet, self.case_sensitive))
            .unwrap_or_default();

        DfaOptions::new()
            .construction(self.dfa_construction)
            .unknown_chars(self.unknown_chars)
            .extra_alphabet(extra)
    }
}

impl Validate for MatchingConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.trace_limit == 0 {
            return Err(ConfigError::ValidationError(
                "trace_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
