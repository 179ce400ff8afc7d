// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::Path;

use crate::config::{
    load_and_validate_config, validate_config, validate_stages, PipelineConfig, StageRegistry,
};
use crate::errors::ConfigError;
use crate::observability::messages::validation::{ConfigResolved, ConfigValidationFailed};
use crate::observability::messages::StructuredLog;
use crate::pipeline::{Layer, Pipeline};

/// Pipeline runtime builder - turns a [`PipelineConfig`] into a runnable [`Pipeline`].
///
/// Stage names are resolved against a [`StageRegistry`]. All validation problems are
/// collected and returned together as [`ConfigError::Invalid`].
///
/// # Examples
///
/// ```
/// use muxline::backends::adapters::{pipe_from_fn, sink_from_fn, source_from_fn};
/// use muxline::config::{PipelineConfig, RuntimeBuilder, StageRegistry};
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut registry = StageRegistry::<u64>::new();
/// registry.register_source("numbers", source_from_fn(|| 0..10u64));
/// registry.register_transform("double", pipe_from_fn(|x: u64| x * 2));
/// registry.register_sink("discard", sink_from_fn(|_: u64| {}));
///
/// let cfg = PipelineConfig::from_yaml_str(
///     "source: {stage: numbers}\npipes: [{stage: double, workers: 3}]\nsinks: {stage: discard}",
/// )
/// .unwrap();
///
/// let pipeline = RuntimeBuilder::from_config(&cfg, &registry).unwrap();
/// let report = pipeline.up().wait().await.unwrap();
/// assert_eq!(report.items_into_sinks(), 10);
/// # }
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Validate `cfg`, resolve its stages and assemble the pipeline.
    pub fn from_config<T: Send + 'static>(
        cfg: &PipelineConfig,
        registry: &StageRegistry<T>,
    ) -> Result<Pipeline<T>, ConfigError> {
        let mut problems = validate_config(cfg).err().unwrap_or_default();
        if let Err(stage_problems) = validate_stages(cfg, registry) {
            problems.extend(stage_problems);
        }
        if !problems.is_empty() {
            let messages: Vec<String> = problems.iter().map(|e| e.to_string()).collect();
            ConfigValidationFailed {
                pipeline: &cfg.name,
                problems: &messages,
            }
            .log();
            return Err(ConfigError::Invalid(problems));
        }

        let layers = cfg
            .layers()
            .map(|(_, layer)| {
                let stage = registry
                    .get(&layer.stage)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownStage {
                        layer: layer.label().to_string(),
                        stage: layer.stage.clone(),
                    })?;
                Ok(Layer::new(layer.label(), stage, layer.workers))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let pipeline = Pipeline::from_layers(cfg.name.clone(), layers, cfg.conduit_capacity)?;
        ConfigResolved {
            pipeline: pipeline.name(),
            layers: pipeline.layers().len(),
        }
        .log();
        Ok(pipeline)
    }

    /// Load a config file and build the pipeline it describes.
    pub fn from_file<T: Send + 'static, P: AsRef<Path>>(
        path: P,
        registry: &StageRegistry<T>,
    ) -> Result<Pipeline<T>, ConfigError> {
        let cfg = load_and_validate_config(path)?;
        Self::from_config(&cfg, registry)
    }
}
