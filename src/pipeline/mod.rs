// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod builder;
mod layer;

pub use builder::{Pipeline, PipelineBuilder};
pub use layer::{Layer, StageFunction, StageKind};
