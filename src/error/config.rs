// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration error module.
//!
//! Errors raised while loading, parsing and validating the layered
//! configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file is missing.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The configuration could not be parsed or deserialized.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(String),

    /// A value failed validation.
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// A value is outside its valid range.
    #[error("Configuration value {key} is out of valid range: {message}")]
    ValueOutOfRange {
        /// Dotted key of the value
        key: String,
        /// Description of the valid range
        message: String,
    },
}
