// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Evaluator configuration module.

use std::path::PathBuf;

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use crate::runner::Algorithm;
use serde::{Deserialize, Serialize};

/// Upper bound on measured repeats per configuration.
const MAX_REPEATS: usize = 10_000;

/// Settings for measurement runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Timed searches per configuration
    pub repeats: usize,

    /// Worker threads for sweeps; 0 uses one per CPU
    pub workers: usize,

    /// Seed for workload generation
    pub seed: u64,

    /// Directory for saved results
    pub output_dir: PathBuf,

    /// Longest generated text
    pub max_text_len: usize,

    /// Algorithms included in sweeps
    pub algorithms: Vec<Algorithm>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            repeats: 5,
            workers: 1,
            seed: 42,
            output_dir: PathBuf::from("results"),
            max_text_len: 1_000_000,
            algorithms: Algorithm::ALL.to_vec(),
        }
    }
}

impl EvaluatorConfig {
    /// Number of sweep workers with `0` resolved to the CPU count.
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }
}

impl Validate for EvaluatorConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.repeats == 0 || self.repeats > MAX_REPEATS {
            return Err(ConfigError::ValueOutOfRange {
                key: "evaluator.repeats".to_string(),
                message: format!("must be between 1 and {MAX_REPEATS}"),
            });
        }

        if self.max_text_len == 0 {
            return Err(ConfigError::ValidationError(
                "max_text_len must be greater than 0".to_string(),
            ));
        }

        if self.algorithms.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one algorithm must be enabled".to_string(),
            ));
        }

        Ok(())
    }
}
