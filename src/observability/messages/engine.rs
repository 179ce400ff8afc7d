// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipeline lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Pipeline launch (all workers and relays spawned)
//! * Pipeline completion once the join barrier has released
//! * Pipeline failure reported by the join

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Pipeline launched: every worker and relay has been spawned.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use muxline::observability::messages::engine::PipelineStarted;
///
/// let msg = PipelineStarted {
///     pipeline: "numbers",
///     layers: 4,
///     workers: 12,
///     relays: 3,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PipelineStarted<'a> {
    pub pipeline: &'a str,
    pub layers: usize,
    pub workers: usize,
    pub relays: usize,
}

impl Display for PipelineStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline '{}' started: {} layers, {} workers, {} relays",
            self.pipeline, self.layers, self.workers, self.relays
        )
    }
}

impl StructuredLog for PipelineStarted<'_> {
    fn log(&self) {
        tracing::info!(
            pipeline = self.pipeline,
            layers = self.layers,
            workers = self.workers,
            relays = self.relays,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline",
            span_name = name,
            pipeline = self.pipeline,
            layers = self.layers,
            workers = self.workers,
            relays = self.relays,
        )
    }
}

/// Pipeline finished: all sinks returned and every task was reaped without error.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use muxline::observability::messages::engine::PipelineCompleted;
/// use std::time::Duration;
///
/// let msg = PipelineCompleted {
///     pipeline: "numbers",
///     items_relayed: 1000,
///     duration: Duration::from_millis(250),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PipelineCompleted<'a> {
    pub pipeline: &'a str,
    pub items_relayed: u64,
    pub duration: std::time::Duration,
}

impl Display for PipelineCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline '{}' completed: {} items relayed in {:?}",
            self.pipeline, self.items_relayed, self.duration
        )
    }
}

impl StructuredLog for PipelineCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            pipeline = self.pipeline,
            items_relayed = self.items_relayed,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_completed",
            span_name = name,
            pipeline = self.pipeline,
            items_relayed = self.items_relayed,
            duration = ?self.duration,
        )
    }
}

/// Pipeline failed; the join returns this error instead of a report.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct PipelineFailed<'a> {
    pub pipeline: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for PipelineFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Pipeline '{}' failed: {}", self.pipeline, self.error)
    }
}

impl StructuredLog for PipelineFailed<'_> {
    fn log(&self) {
        tracing::error!(
            pipeline = self.pipeline,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "pipeline_failed",
            span_name = name,
            pipeline = self.pipeline,
            error = %self.error,
        )
    }
}
