// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Crate-level tests for the configuration and error layers.
//!
//! Matcher, runner and evaluator tests live next to their modules; the
//! cross-algorithm checks are in the `tests/` directory.

pub mod test_utils;

pub use test_utils::{create_test_dir, write_config, EnvGuard};
