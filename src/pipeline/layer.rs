// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use crate::traits::{Sink, Source, Transform};

/// Which position in a pipeline a stage can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Source,
    Transform,
    Sink,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageKind::Source => "source",
            StageKind::Transform => "transform",
            StageKind::Sink => "sink",
        };
        f.write_str(name)
    }
}

/// A stage function tagged with its kind.
///
/// The kind is fixed when the value is built, so the engine never has to inspect a stage to
/// find out how to wire it.
pub enum StageFunction<T: Send + 'static> {
    Source(Arc<dyn Source<T>>),
    Transform(Arc<dyn Transform<T>>),
    Sink(Arc<dyn Sink<T>>),
}

impl<T: Send + 'static> StageFunction<T> {
    pub fn source(stage: impl Source<T> + 'static) -> Self {
        StageFunction::Source(Arc::new(stage))
    }

    pub fn transform(stage: impl Transform<T> + 'static) -> Self {
        StageFunction::Transform(Arc::new(stage))
    }

    pub fn sink(stage: impl Sink<T> + 'static) -> Self {
        StageFunction::Sink(Arc::new(stage))
    }

    pub fn kind(&self) -> StageKind {
        match self {
            StageFunction::Source(_) => StageKind::Source,
            StageFunction::Transform(_) => StageKind::Transform,
            StageFunction::Sink(_) => StageKind::Sink,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StageFunction::Source(stage) => stage.name(),
            StageFunction::Transform(stage) => stage.name(),
            StageFunction::Sink(stage) => stage.name(),
        }
    }
}

impl<T: Send + 'static> Clone for StageFunction<T> {
    fn clone(&self) -> Self {
        match self {
            StageFunction::Source(stage) => StageFunction::Source(Arc::clone(stage)),
            StageFunction::Transform(stage) => StageFunction::Transform(Arc::clone(stage)),
            StageFunction::Sink(stage) => StageFunction::Sink(Arc::clone(stage)),
        }
    }
}

impl<T: Send + 'static> fmt::Debug for StageFunction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageFunction")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

/// One stage replicated across `workers` parallel instances.
pub struct Layer<T: Send + 'static> {
    label: String,
    stage: StageFunction<T>,
    workers: usize,
}

impl<T: Send + 'static> Layer<T> {
    pub fn new(label: impl Into<String>, stage: StageFunction<T>, workers: usize) -> Self {
        Self {
            label: label.into(),
            stage,
            workers,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn stage(&self) -> &StageFunction<T> {
        &self.stage
    }

    pub fn kind(&self) -> StageKind {
        self.stage.kind()
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl<T: Send + 'static> Clone for Layer<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            stage: self.stage.clone(),
            workers: self.workers,
        }
    }
}

impl<T: Send + 'static> fmt::Debug for Layer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("label", &self.label)
            .field("stage", &self.stage)
            .field("workers", &self.workers)
            .finish()
    }
}
