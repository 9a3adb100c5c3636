// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration module.
//!
//! Settings are layered: built-in defaults, then an optional TOML, YAML or
//! JSON file, then environment variables such as
//! `PATTERNBENCH__EVALUATOR__REPEATS=10`. The result is validated before use
//! and passed explicitly to whatever needs it.

use std::path::{Path, PathBuf};

use crate::error::config::ConfigError;
use crate::error::AppResult;
use config::{Config, ConfigError as ExternalConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub mod evaluator;
pub mod matching;

pub use evaluator::EvaluatorConfig;
pub use matching::MatchingConfig;

/// Result of loading or validating configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "PATTERNBENCH";

/// Checks a configuration section for out-of-range values.
pub trait Validate {
    /// Returns the first problem found.
    fn validate(&self) -> ConfigResult<()>;
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Search options
    pub matching: MatchingConfig,

    /// Measurement options
    pub evaluator: EvaluatorConfig,

    /// Log configuration
    pub log: LogConfig,
}

impl Validate for AppConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.matching.validate()?;
        self.evaluator.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

/// Subscriber settings used by the binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter level when `RUST_LOG` is unset
    pub level: String,

    /// Emit JSON lines instead of the human format
    pub json: bool,

    /// Include file and line of each event
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            source_location: true,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}",
                self.level
            ))),
        }
    }
}

/// Layered configuration loader.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Loader reading `config_path` when given, then variables named
    /// `{env_prefix}__SECTION__KEY`.
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Loads and validates the configuration.
    pub fn load(&self) -> ConfigResult<AppConfig> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&AppConfig::default())
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
        );

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }

            let format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => FileFormat::Toml,
                Some("json") => FileFormat::Json,
                Some("yaml" | "yml") => FileFormat::Yaml,
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "Unsupported file extension for: {path:?}"
                    )))
                }
            };
            builder = builder.add_source(File::from(path.as_path()).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(|e| match e {
            ExternalConfigError::NotFound(path) => ConfigError::FileNotFound(PathBuf::from(path)),
            ExternalConfigError::FileParse { uri, cause } => ConfigError::ParseError(format!(
                "Error parsing {}: {cause}",
                uri.as_deref().unwrap_or("config file")
            )),
            other => ConfigError::ParseError(other.to_string()),
        })?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        app_config.validate()?;

        Ok(app_config)
    }
}

/// Loads the application configuration using [`ENV_PREFIX`] for overrides.
pub fn load(config_path: Option<&Path>) -> AppResult<AppConfig> {
    Ok(ConfigLoader::new(config_path, ENV_PREFIX).load()?)
}
