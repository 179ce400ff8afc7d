// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::config::consts::{DEFAULT_CONDUIT_CAPACITY, DEFAULT_PIPELINE_NAME};
use crate::errors::ConfigError;
use crate::observability::messages::validation::ConfigValidationFailed;
use crate::observability::messages::StructuredLog;
use crate::pipeline::StageKind;

/// Declarative description of a pipeline.
///
/// Stage logic cannot live in a file, so layers name their stage and the names are resolved
/// against a [`StageRegistry`](crate::config::StageRegistry) when the pipeline is built.
///
/// # Fields
/// * `name` - Name used in logs and run reports (optional, defaults to `pipeline`)
/// * `conduit_capacity` - Buffer size of every conduit (optional, defaults to 1)
/// * `source` - The first layer
/// * `pipes` - Transform layers in order (optional, defaults to none)
/// * `sinks` - The last layer
///
/// # Example
/// ```yaml
/// name: numbers
/// conduit_capacity: 1
/// source:
///   stage: generator
///   workers: 2
/// pipes:
///   - stage: multiply
///     workers: 4
///   - stage: add_one
///     workers: 4
///     label: increment
/// sinks:
///   stage: counter
///   workers: 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_capacity")]
    pub conduit_capacity: usize,
    pub source: LayerConfig,
    #[serde(default)]
    pub pipes: Vec<LayerConfig>,
    pub sinks: LayerConfig,
}

/// One layer: which registered stage to run and on how many workers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayerConfig {
    pub stage: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Label used in logs; defaults to the stage name.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_name() -> String {
    DEFAULT_PIPELINE_NAME.to_string()
}

fn default_capacity() -> usize {
    DEFAULT_CONDUIT_CAPACITY
}

fn default_workers() -> usize {
    1
}

impl LayerConfig {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.stage)
    }
}

impl PipelineConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// All layers in pipeline order, each with the stage kind its position requires.
    pub fn layers(&self) -> impl Iterator<Item = (StageKind, &LayerConfig)> {
        std::iter::once((StageKind::Source, &self.source))
            .chain(self.pipes.iter().map(|pipe| (StageKind::Transform, pipe)))
            .chain(std::iter::once((StageKind::Sink, &self.sinks)))
    }
}

/// Load a config from a YAML (`.yaml`, `.yml`) or TOML (`.toml`) file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "yaml" | "yml" => PipelineConfig::from_yaml_str(&fs::read_to_string(path)?),
        "toml" => PipelineConfig::from_toml_str(&fs::read_to_string(path)?),
        _ => Err(ConfigError::UnsupportedFormat(extension)),
    }
}

/// Load a config and check worker counts and conduit capacity.
///
/// Stage names are checked later, against a registry, by
/// [`RuntimeBuilder::from_config`](crate::config::RuntimeBuilder::from_config).
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig, ConfigError> {
    let cfg = load_config(path)?;

    if let Err(problems) = crate::config::validate_config(&cfg) {
        let messages: Vec<String> = problems.iter().map(|e| e.to_string()).collect();
        ConfigValidationFailed {
            pipeline: &cfg.name,
            problems: &messages,
        }
        .log();
        return Err(ConfigError::Invalid(problems));
    }

    Ok(cfg)
}
