// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::BuildError;
use crate::pipeline::StageKind;
use thiserror::Error;

/// Errors raised while loading, validating or resolving a pipeline configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML.
    #[error("Unsupported config format '{0}' (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(String),

    /// A layer references a stage name that is not registered.
    #[error("Layer '{layer}' references unknown stage '{stage}'")]
    UnknownStage { layer: String, stage: String },

    /// A registered stage is used at a position of a different kind.
    #[error("Layer '{layer}' needs a {expected} stage but '{stage}' is a {found}")]
    WrongStageKind {
        layer: String,
        stage: String,
        expected: StageKind,
        found: StageKind,
    },

    #[error("Layer '{layer}' must have at least one worker")]
    ZeroWorkers { layer: String },

    #[error("conduit_capacity must be at least 1")]
    ZeroCapacity,

    /// Validation found one or more problems; all of them are listed.
    #[error("Configuration validation failed:\n{}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n"))]
    Invalid(Vec<ConfigError>),

    #[error(transparent)]
    Build(#[from] BuildError),
}
