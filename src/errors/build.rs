// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors reported synchronously while a pipeline is being assembled.

use crate::pipeline::StageKind;
use thiserror::Error;

/// Construction-time failure. A pipeline that produced one of these can never be run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A layer was declared with no workers.
    #[error("Layer '{layer}' at position {position} must have at least one worker")]
    ZeroWorkers { layer: String, position: usize },

    /// Conduits need room for at least one in-flight item.
    #[error("Conduit capacity must be at least 1")]
    ZeroCapacity,

    /// A stage function sits at a position reserved for another kind.
    #[error("Layer at position {position} must be a {expected} stage, found {found}")]
    LayerKindMismatch {
        position: usize,
        expected: StageKind,
        found: StageKind,
    },

    /// A pipeline needs at least a source layer and a sink layer.
    #[error("Pipeline needs at least 2 layers (source and sink), got {0}")]
    TooFewLayers(usize),
}
