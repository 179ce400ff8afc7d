// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The three shapes of stage logic a pipeline runs.
//!
//! Stages receive their conduit ends by value. Returning from `run` drops them, which is what
//! closes a stage's output; there is no separate "close" call to forget.

use async_trait::async_trait;

use crate::engine::{Inlet, Outlet};

/// Produces items. Has no input.
///
/// Must return once it has produced everything it will ever produce. If
/// [`Outlet::send`] fails the downstream is gone and the source should return.
#[async_trait]
pub trait Source<T: Send + 'static>: Send + Sync {
    async fn run(&self, output: Outlet<T>);

    fn name(&self) -> &str {
        "source"
    }
}

/// Consumes items and produces zero or more items for each of them.
///
/// Must keep reading until `input` yields `None`, then return.
#[async_trait]
pub trait Transform<T: Send + 'static>: Send + Sync {
    async fn run(&self, input: Inlet<T>, output: Outlet<T>);

    fn name(&self) -> &str {
        "transform"
    }
}

/// Consumes items and produces nothing.
///
/// Returning from `run` is the only completion signal the pipeline's join observes.
#[async_trait]
pub trait Sink<T: Send + 'static>: Send + Sync {
    async fn run(&self, input: Inlet<T>);

    fn name(&self) -> &str {
        "sink"
    }
}
