// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation problems.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A configuration failed validation.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use muxline::observability::messages::validation::ConfigValidationFailed;
///
/// let problems = vec!["Layer 'sink' must have at least one worker".to_string()];
/// let msg = ConfigValidationFailed {
///     pipeline: "numbers",
///     problems: &problems,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ConfigValidationFailed<'a> {
    pub pipeline: &'a str,
    pub problems: &'a [String],
}

impl Display for ConfigValidationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Config for pipeline '{}' has {} problem(s): {}",
            self.pipeline,
            self.problems.len(),
            self.problems.join("; ")
        )
    }
}

impl StructuredLog for ConfigValidationFailed<'_> {
    fn log(&self) {
        tracing::error!(
            pipeline = self.pipeline,
            problem_count = self.problems.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "config_validation_failed",
            span_name = name,
            pipeline = self.pipeline,
            problem_count = self.problems.len(),
        )
    }
}

/// A configuration was loaded and resolved against the stage registry.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ConfigResolved<'a> {
    pub pipeline: &'a str,
    pub layers: usize,
}

impl Display for ConfigResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resolved config for pipeline '{}' with {} layers",
            self.pipeline, self.layers
        )
    }
}

impl StructuredLog for ConfigResolved<'_> {
    fn log(&self) {
        tracing::info!(pipeline = self.pipeline, layers = self.layers, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "config_resolved",
            span_name = name,
            pipeline = self.pipeline,
            layers = self.layers,
        )
    }
}
