// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Application-level error handling.
//!
//! Each layer has its own error enum ([`MatchError`] for the matchers,
//! [`config::ConfigError`] for configuration); [`AppError`] unifies them for
//! the evaluator and the binary. Failures that should not abort a run are
//! wrapped in an [`ErrorContext`] and handed to an [`ErrorReporter`] the
//! caller supplies.

use std::fmt::{Display, Formatter};

use thiserror::Error;
use tracing_error::SpanTrace;

use crate::matchers::MatchError;

pub mod config;

/// Result type alias used outside the matchers.
pub type AppResult<T> = Result<T, AppError>;

/// Core error enum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors raised by a matcher or the algorithm wrapper.
    #[error("Matching error: {0}")]
    Match(#[from] MatchError),

    /// Reading input or writing results failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Results could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Free-form message, e.g. a recorded sweep failure.
    #[error("{0}")]
    Custom(String),
}

/// An error together with where it happened.
#[derive(Debug)]
pub struct ErrorContext {
    /// The wrapped error.
    pub error: AppError,

    /// Component name, such as `demo` or `sweep`.
    pub component: String,

    /// Free-form context, e.g. the scenario and pattern.
    pub details: Option<String>,

    /// Span trace at the point of capture, if any spans were active.
    pub trace: Option<String>,
}

impl ErrorContext {
    /// Wraps `error` without a span trace.
    pub fn new<S: Into<String>>(error: impl Into<AppError>, component: S) -> Self {
        Self {
            error: error.into(),
            component: component.into(),
            details: None,
            trace: None,
        }
    }

    /// Creates a context carrying the span trace of the caller.
    ///
    /// The trace is only populated when the subscriber has the
    /// `tracing_error::ErrorLayer` installed.
    pub fn capture<S: Into<String>>(error: impl Into<AppError>, component: S) -> Self {
        let span_trace = SpanTrace::capture();
        let rendered = span_trace.to_string();
        let context = Self::new(error, component);
        if rendered.is_empty() {
            context
        } else {
            context.with_trace(rendered)
        }
    }

    /// Sets the details.
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Sets the trace text.
    pub fn with_trace<S: Into<String>>(mut self, trace: S) -> Self {
        self.trace = Some(trace.into());
        self
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.component, self.error)?;
        match &self.details {
            Some(details) => write!(f, " ({details})"),
            None => Ok(()),
        }
    }
}

/// Sink for errors that are reported and then skipped.
pub trait ErrorReporter: Send + Sync + std::fmt::Debug {
    /// Consumes one failure.
    fn report(&self, context: ErrorContext);
}

/// Reporter that logs through `tracing`.
#[derive(Default, Debug)]
pub struct TracingErrorReporter;

impl TracingErrorReporter {
    /// Creates the reporter.
    pub fn new() -> Self {
        Self
    }
}

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: ErrorContext) {
        let ErrorContext {
            error,
            component,
            details,
            trace,
        } = context;
        tracing::error!(
            %error,
            %component,
            details = details.as_deref().unwrap_or_default(),
            span_trace = trace.as_deref().unwrap_or_default(),
            "Skipping after failure"
        );
    }
}
