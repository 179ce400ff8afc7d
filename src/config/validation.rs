// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation.
//!
//! Validation runs in two passes so that every problem is reported at once rather than one
//! per attempt:
//!
//! 1. **Structural** ([`validate_config`]): conduit capacity and worker counts.
//! 2. **Resolution** ([`validate_stages`]): every stage name is registered, and the registered
//!    stage has the kind its position needs (source first, sinks last, transforms between).

use crate::config::{PipelineConfig, StageRegistry};
use crate::errors::ConfigError;

/// Check capacity and worker counts.
pub fn validate_config(cfg: &PipelineConfig) -> Result<(), Vec<ConfigError>> {
    let mut problems = Vec::new();

    if cfg.conduit_capacity == 0 {
        problems.push(ConfigError::ZeroCapacity);
    }
    for (_, layer) in cfg.layers() {
        if layer.workers == 0 {
            problems.push(ConfigError::ZeroWorkers {
                layer: layer.label().to_string(),
            });
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

/// Check every layer's stage name against `registry`.
pub fn validate_stages<T: Send + 'static>(
    cfg: &PipelineConfig,
    registry: &StageRegistry<T>,
) -> Result<(), Vec<ConfigError>> {
    let mut problems = Vec::new();

    for (expected, layer) in cfg.layers() {
        match registry.kind_of(&layer.stage) {
            None => problems.push(ConfigError::UnknownStage {
                layer: layer.label().to_string(),
                stage: layer.stage.clone(),
            }),
            Some(found) if found != expected => problems.push(ConfigError::WrongStageKind {
                layer: layer.label().to_string(),
                stage: layer.stage.clone(),
                expected,
                found,
            }),
            Some(_) => {}
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}
