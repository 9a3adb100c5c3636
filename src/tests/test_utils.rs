// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Test helpers shared by the crate-level tests.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for test files.
pub fn create_test_dir() -> std::io::Result<TempDir> {
    tempfile::tempdir()
}

/// Writes `content` to `name` inside `dir` and returns the full path.
pub fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("failed to write test config");
    path
}

/// Sets environment variables and removes them again on drop.
///
/// Each test should use its own prefix so that parallel tests never
/// observe each other's variables.
#[derive(Debug, Default)]
pub struct EnvGuard {
    keys: Vec<String>,
}

impl EnvGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: &str) -> Self {
        std::env::set_var(key, value);
        self.keys.push(key.to_string());
        self
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            std::env::remove_var(key);
        }
    }
}
