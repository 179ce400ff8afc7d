// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_CONDUIT_CAPACITY, DEFAULT_PIPELINE_NAME, SINK_LABEL, SOURCE_LABEL};
use crate::engine::{lifecycle, PipelineHandle};
use crate::errors::BuildError;
use crate::pipeline::{Layer, StageFunction, StageKind};
use crate::traits::{Sink, Source, Transform};

/// An ordered, validated sequence of layers: sources first, sinks last, transforms between.
///
/// A `Pipeline` can only be obtained through [`PipelineBuilder::with_sinks`] or
/// [`Pipeline::from_layers`], both of which validate the layout, so every value of this type
/// is runnable. [`Pipeline::up`] consumes it: a pipeline runs at most once.
///
/// # Examples
///
/// ```
/// use muxline::backends::adapters::{pipe_from_fn, sink_from_fn, source_from_fn};
/// use muxline::pipeline::Pipeline;
///
/// # #[tokio::main]
/// # async fn main() {
/// let pipeline = Pipeline::builder(source_from_fn(|| 0..10u64), 1)
///     .with_pipe(pipe_from_fn(|x: u64| x * 10), 2)
///     .with_sinks(sink_from_fn(|x: u64| assert_eq!(x % 10, 0)), 1)
///     .unwrap();
///
/// let report = pipeline.up().wait().await.unwrap();
/// assert_eq!(report.items_into_sinks(), 10);
/// # }
/// ```
pub struct Pipeline<T: Send + 'static> {
    name: String,
    layers: Vec<Layer<T>>,
    conduit_capacity: usize,
}

impl<T: Send + 'static> Pipeline<T> {
    /// Start building a pipeline whose first layer runs `workers` copies of `source`.
    pub fn builder(source: impl Source<T> + 'static, workers: usize) -> PipelineBuilder<T> {
        PipelineBuilder {
            name: DEFAULT_PIPELINE_NAME.to_string(),
            layers: vec![Layer::new(SOURCE_LABEL, StageFunction::source(source), workers)],
            conduit_capacity: DEFAULT_CONDUIT_CAPACITY,
        }
    }

    /// Assemble a pipeline from pre-built layers, checking ordering and worker counts.
    pub fn from_layers(
        name: impl Into<String>,
        layers: Vec<Layer<T>>,
        conduit_capacity: usize,
    ) -> Result<Self, BuildError> {
        if layers.len() < 2 {
            return Err(BuildError::TooFewLayers(layers.len()));
        }
        if conduit_capacity == 0 {
            return Err(BuildError::ZeroCapacity);
        }

        let last = layers.len() - 1;
        for (position, layer) in layers.iter().enumerate() {
            let expected = match position {
                0 => StageKind::Source,
                p if p == last => StageKind::Sink,
                _ => StageKind::Transform,
            };
            if layer.kind() != expected {
                return Err(BuildError::LayerKindMismatch {
                    position,
                    expected,
                    found: layer.kind(),
                });
            }
            if layer.workers() == 0 {
                return Err(BuildError::ZeroWorkers {
                    layer: layer.label().to_string(),
                    position,
                });
            }
        }

        Ok(Self {
            name: name.into(),
            layers,
            conduit_capacity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layers(&self) -> &[Layer<T>] {
        &self.layers
    }

    pub fn conduit_capacity(&self) -> usize {
        self.conduit_capacity
    }

    /// Total number of workers across all layers.
    pub fn worker_count(&self) -> usize {
        self.layers.iter().map(Layer::workers).sum()
    }

    /// Number of sink workers, i.e. the initial value of the join barrier.
    pub fn sink_workers(&self) -> usize {
        self.layers.last().map(Layer::workers).unwrap_or(0)
    }

    /// One relay sits between every pair of adjacent layers.
    pub fn relay_count(&self) -> usize {
        self.layers.len() - 1
    }

    /// Start every worker and relay and return immediately.
    ///
    /// Must be called from within a Tokio runtime. Await [`PipelineHandle::wait`] to join.
    pub fn up(self) -> PipelineHandle {
        lifecycle::launch(self.name, self.layers, self.conduit_capacity)
    }
}

impl<T: Send + 'static> std::fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("layers", &self.layers)
            .field("conduit_capacity", &self.conduit_capacity)
            .finish()
    }
}

/// Chained construction of a [`Pipeline`]. Created by [`Pipeline::builder`].
pub struct PipelineBuilder<T: Send + 'static> {
    name: String,
    layers: Vec<Layer<T>>,
    conduit_capacity: usize,
}

impl<T: Send + 'static> PipelineBuilder<T> {
    /// Name used in logs and in the run report.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Buffer size of every conduit. Defaults to 1; must be at least 1.
    pub fn with_conduit_capacity(mut self, capacity: usize) -> Self {
        self.conduit_capacity = capacity;
        self
    }

    /// Append a transform layer labelled `pipe-<n>`.
    pub fn with_pipe(self, pipe: impl Transform<T> + 'static, workers: usize) -> Self {
        let label = format!("pipe-{}", self.layers.len());
        self.with_labeled_pipe(label, pipe, workers)
    }

    pub fn with_labeled_pipe(
        mut self,
        label: impl Into<String>,
        pipe: impl Transform<T> + 'static,
        workers: usize,
    ) -> Self {
        self.layers
            .push(Layer::new(label, StageFunction::transform(pipe), workers));
        self
    }

    /// Terminate the pipeline with a sink layer and validate the result.
    pub fn with_sinks(
        self,
        sink: impl Sink<T> + 'static,
        workers: usize,
    ) -> Result<Pipeline<T>, BuildError> {
        self.with_labeled_sinks(SINK_LABEL, sink, workers)
    }

    pub fn with_labeled_sinks(
        mut self,
        label: impl Into<String>,
        sink: impl Sink<T> + 'static,
        workers: usize,
    ) -> Result<Pipeline<T>, BuildError> {
        self.layers
            .push(Layer::new(label, StageFunction::sink(sink), workers));
        Pipeline::from_layers(self.name, self.layers, self.conduit_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::adapters::pipe_from_fn;
    use crate::backends::stub::{AddOne, Counter, Generator, Multiply};

    #[test]
    fn test_builder_assigns_default_labels() {
        let pipeline = Pipeline::builder(Generator::new(1), 2)
            .with_pipe(Multiply::new(10), 3)
            .with_pipe(AddOne, 1)
            .with_sinks(Counter::new(), 4)
            .unwrap();

        let labels: Vec<_> = pipeline.layers().iter().map(Layer::label).collect();
        assert_eq!(labels, vec!["source", "pipe-1", "pipe-2", "sink"]);
        assert_eq!(pipeline.name(), DEFAULT_PIPELINE_NAME);
        assert_eq!(pipeline.conduit_capacity(), DEFAULT_CONDUIT_CAPACITY);
        assert_eq!(pipeline.worker_count(), 10);
        assert_eq!(pipeline.sink_workers(), 4);
        assert_eq!(pipeline.relay_count(), 3);
    }

    #[test]
    fn test_builder_without_pipes() {
        let pipeline = Pipeline::builder(Generator::new(1), 1)
            .named("direct")
            .with_conduit_capacity(8)
            .with_sinks(Counter::new(), 1)
            .unwrap();

        assert_eq!(pipeline.name(), "direct");
        assert_eq!(pipeline.conduit_capacity(), 8);
        assert_eq!(pipeline.relay_count(), 1);
    }

    #[test]
    fn test_zero_source_workers_rejected() {
        let result = Pipeline::builder(Generator::new(1), 0).with_sinks(Counter::new(), 1);

        assert_eq!(
            result.unwrap_err(),
            BuildError::ZeroWorkers {
                layer: "source".to_string(),
                position: 0
            }
        );
    }

    #[test]
    fn test_zero_pipe_workers_rejected() {
        let result = Pipeline::builder(Generator::new(1), 1)
            .with_labeled_pipe("scale", pipe_from_fn(|x: u64| x * 2), 0)
            .with_sinks(Counter::new(), 1);

        assert_eq!(
            result.unwrap_err(),
            BuildError::ZeroWorkers {
                layer: "scale".to_string(),
                position: 1
            }
        );
    }

    #[test]
    fn test_zero_sink_workers_rejected() {
        let result = Pipeline::builder(Generator::new(1), 1).with_sinks(Counter::new(), 0);
        assert!(matches!(result, Err(BuildError::ZeroWorkers { position: 1, .. })));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = Pipeline::builder(Generator::new(1), 1)
            .with_conduit_capacity(0)
            .with_sinks(Counter::new(), 1);
        assert_eq!(result.unwrap_err(), BuildError::ZeroCapacity);
    }

    #[test]
    fn test_from_layers_checks_kind_per_position() {
        let layers: Vec<Layer<u64>> = vec![
            Layer::new("source", StageFunction::source(Generator::new(1)), 1),
            Layer::new("early-sink", StageFunction::sink(Counter::new()), 1),
            Layer::new("sink", StageFunction::sink(Counter::new()), 1),
        ];

        let err = Pipeline::from_layers("bad", layers, 1).unwrap_err();
        assert_eq!(
            err,
            BuildError::LayerKindMismatch {
                position: 1,
                expected: StageKind::Transform,
                found: StageKind::Sink,
            }
        );
    }

    #[test]
    fn test_from_layers_requires_source_first() {
        let layers: Vec<Layer<u64>> = vec![
            Layer::new("pipe", StageFunction::transform(AddOne), 1),
            Layer::new("sink", StageFunction::sink(Counter::new()), 1),
        ];

        let err = Pipeline::from_layers("bad", layers, 1).unwrap_err();
        assert!(matches!(
            err,
            BuildError::LayerKindMismatch {
                position: 0,
                expected: StageKind::Source,
                ..
            }
        ));
    }

    #[test]
    fn test_from_layers_requires_two_layers() {
        let layers: Vec<Layer<u64>> =
            vec![Layer::new("source", StageFunction::source(Generator::new(1)), 1)];
        assert_eq!(
            Pipeline::from_layers("short", layers, 1).unwrap_err(),
            BuildError::TooFewLayers(1)
        );
    }
}
