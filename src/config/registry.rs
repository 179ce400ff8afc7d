// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::pipeline::{StageFunction, StageKind};
use crate::traits::{Sink, Source, Transform};

/// Named stage functions that configuration files can refer to.
///
/// # Examples
///
/// ```
/// use muxline::backends::adapters::{pipe_from_fn, sink_from_fn, source_from_fn};
/// use muxline::config::StageRegistry;
/// use muxline::pipeline::StageKind;
///
/// let mut registry = StageRegistry::<u64>::new();
/// registry.register_source("numbers", source_from_fn(|| 0..100u64));
/// registry.register_transform("double", pipe_from_fn(|x: u64| x * 2));
/// registry.register_sink("discard", sink_from_fn(|_: u64| {}));
///
/// assert_eq!(registry.kind_of("double"), Some(StageKind::Transform));
/// assert_eq!(registry.names(), vec!["discard", "double", "numbers"]);
/// ```
pub struct StageRegistry<T: Send + 'static> {
    stages: HashMap<String, StageFunction<T>>,
}

impl<T: Send + 'static> StageRegistry<T> {
    pub fn new() -> Self {
        Self {
            stages: HashMap::new(),
        }
    }

    /// Register a stage under `name`, returning the stage it replaced, if any.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        stage: StageFunction<T>,
    ) -> Option<StageFunction<T>> {
        self.stages.insert(name.into(), stage)
    }

    pub fn register_source(&mut self, name: impl Into<String>, stage: impl Source<T> + 'static) {
        self.register(name, StageFunction::source(stage));
    }

    pub fn register_transform(
        &mut self,
        name: impl Into<String>,
        stage: impl Transform<T> + 'static,
    ) {
        self.register(name, StageFunction::transform(stage));
    }

    pub fn register_sink(&mut self, name: impl Into<String>, stage: impl Sink<T> + 'static) {
        self.register(name, StageFunction::sink(stage));
    }

    pub fn get(&self, name: &str) -> Option<&StageFunction<T>> {
        self.stages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stages.contains_key(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<StageKind> {
        self.stages.get(name).map(StageFunction::kind)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.stages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<T: Send + 'static> Default for StageRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> std::fmt::Debug for StageRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageRegistry")
            .field("stage_count", &self.stages.len())
            .field("stage_names", &self.names())
            .finish()
    }
}
