// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Multiplexed, layered pipelines on Tokio.
//!
//! A pipeline is a source layer, any number of transform layers and a sink layer. Each layer
//! runs N copies of one stage function, and a relay between every pair of adjacent layers
//! moves items from whichever upstream worker has one to whichever downstream worker is free.

pub mod backends;   // ready-made stages
pub mod config;     // config files + stage registry
pub mod engine;     // conduits, relays, workers, lifecycle
pub mod errors;     // error handling
pub mod observability;
pub mod pipeline;   // layers + builder
pub mod traits;     // stage abstractions

pub use engine::{Inlet, Outlet, PipelineHandle, PipelineReport};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use traits::{Sink, Source, Transform};
