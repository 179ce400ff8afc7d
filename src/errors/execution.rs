// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// Returned by [`Outlet::send`](crate::engine::Outlet::send) when the reading side of a
/// conduit is gone. The rejected item is handed back to the caller.
#[derive(Error, PartialEq, Eq, Clone)]
#[error("conduit closed: the reader has gone away")]
pub struct ConduitClosed<T>(pub T);

impl<T> fmt::Debug for ConduitClosed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConduitClosed").finish_non_exhaustive()
    }
}

/// Failure of a single relay.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Every downstream reader disappeared while the relay still held an item.
    #[error("all {outputs} downstream consumers are gone; {dropped} item(s) could not be delivered")]
    NoConsumers { outputs: usize, dropped: u64 },
}

/// Errors surfaced by [`PipelineHandle::wait`](crate::engine::PipelineHandle::wait).
///
/// The core never retries and never returns partial results: when any worker or relay
/// failed, the whole run is reported as failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// A stage function panicked inside one of its workers.
    #[error("Worker {index} of layer '{layer}' panicked: {message}")]
    WorkerPanicked {
        layer: String,
        index: usize,
        message: String,
    },

    /// A relay could not hand its items downstream.
    #[error("Relay '{relay}' failed: {source}")]
    Relay {
        relay: String,
        #[source]
        source: RelayError,
    },

    /// A relay task itself panicked or was aborted.
    #[error("Relay '{relay}' task failed: {message}")]
    RelayAborted { relay: String, message: String },
}
