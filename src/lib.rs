// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Patternbench Library
//!
//! Exact single-pattern string matching with three independent algorithms
//! (Z-Algorithm, Bitap and a deterministic finite automaton) behind one
//! [`matchers::Matcher`] interface, a [`runner::Runner`] that makes them
//! interchangeable, and an [`evaluator::Evaluator`] that measures their
//! time and peak memory under controlled conditions.
//!
//! # Architecture
//!
//! - [`matchers`]: the algorithms, trace steps and case normalization
//! - [`runner`]: algorithm selection, text operations, bulk search, traces
//! - [`evaluator`]: repeated measurements, parameter sweeps, reports
//! - [`memory`]: per-thread heap accounting through a global allocator
//! - [`config`] and [`error`]: layered configuration and error types
//!
//! No state is global: configuration is loaded once and passed to the
//! components that need it.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod matchers;
pub mod memory;
pub mod runner;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

#[cfg(test)]
#[global_allocator]
static TEST_ALLOCATOR: memory::TrackingAllocator = memory::TrackingAllocator::new();

pub use config::{AppConfig, MatchingConfig};
pub use evaluator::Evaluator;
pub use matchers::{MatchError, MatchResult, Matcher};
pub use runner::{Algorithm, AlgorithmChoice, Runner};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
