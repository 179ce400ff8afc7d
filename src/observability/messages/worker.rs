// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for worker lifecycle events.

use crate::observability::messages::StructuredLog;
use crate::pipeline::StageKind;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Worker task began running its stage.
///
/// # Log Level
/// `debug!` - Wiring detail
pub struct WorkerStarted<'a> {
    pub layer: &'a str,
    pub index: usize,
    pub kind: StageKind,
    pub stage: &'a str,
}

impl Display for WorkerStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker {}[{}] started ({} '{}')",
            self.layer, self.index, self.kind, self.stage
        )
    }
}

impl StructuredLog for WorkerStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            layer = self.layer,
            index = self.index,
            kind = %self.kind,
            stage = self.stage,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "worker",
            span_name = name,
            layer = self.layer,
            index = self.index,
            kind = %self.kind,
            stage = self.stage,
        )
    }
}

/// Worker's stage returned; its output (if any) is now closed.
///
/// # Log Level
/// `debug!` - Wiring detail
pub struct WorkerFinished<'a> {
    pub layer: &'a str,
    pub index: usize,
    pub kind: StageKind,
}

impl Display for WorkerFinished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Worker {}[{}] finished ({})", self.layer, self.index, self.kind)
    }
}

impl StructuredLog for WorkerFinished<'_> {
    fn log(&self) {
        tracing::debug!(
            layer = self.layer,
            index = self.index,
            kind = %self.kind,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "worker_finished",
            span_name = name,
            layer = self.layer,
            index = self.index,
        )
    }
}

/// A stage function panicked. Fatal to the run; reported by the join.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use muxline::observability::messages::worker::WorkerPanicked;
///
/// let msg = WorkerPanicked {
///     layer: "pipe-1",
///     index: 0,
///     message: "unexpected item shape",
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct WorkerPanicked<'a> {
    pub layer: &'a str,
    pub index: usize,
    pub message: &'a str,
}

impl Display for WorkerPanicked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker {}[{}] panicked: {}",
            self.layer, self.index, self.message
        )
    }
}

impl StructuredLog for WorkerPanicked<'_> {
    fn log(&self) {
        tracing::error!(
            layer = self.layer,
            index = self.index,
            panic = self.message,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "worker_panicked",
            span_name = name,
            layer = self.layer,
            index = self.index,
        )
    }
}

/// The join returned while this worker was still running after closing its output.
/// The task keeps running on its own.
///
/// # Log Level
/// `debug!` - Wiring detail
pub struct WorkerDetached<'a> {
    pub layer: &'a str,
    pub index: usize,
    pub kind: StageKind,
}

impl Display for WorkerDetached<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker {}[{}] ({}) still running after the sinks finished, detaching",
            self.layer, self.index, self.kind
        )
    }
}

impl StructuredLog for WorkerDetached<'_> {
    fn log(&self) {
        tracing::debug!(
            layer = self.layer,
            index = self.index,
            kind = %self.kind,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "worker_detached",
            span_name = name,
            layer = self.layer,
            index = self.index,
        )
    }
}
