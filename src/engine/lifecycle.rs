// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Starting a pipeline and joining on it.
//!
//! `launch` allocates fresh conduits for every layer, spawns one task per worker and one per
//! relay, sets the join barrier to the number of sink workers and returns without waiting.
//! Layers are wired in order:
//!
//! ```text
//! source[0..M] -> relay -> pipe-1[0..N] -> relay -> ... -> relay -> sink[0..K]
//! ```
//!
//! A sink finishing is the only completion signal the barrier sees. Because a relay closes
//! its outputs only after all of its inputs closed, every sink having finished implies every
//! upstream worker and relay has drained.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::{JoinError, JoinHandle};
use tracing::Instrument;

use crate::engine::{
    conduit_set, Inlet, JoinBarrier, Relay, RelayStats, Worker, WorkerId, WorkerTask,
};
use crate::errors::{ExecutionError, RelayError};
use crate::observability::messages::engine::{PipelineCompleted, PipelineFailed, PipelineStarted};
use crate::observability::messages::relay::RelayStarted;
use crate::observability::messages::worker::{WorkerDetached, WorkerPanicked};
use crate::observability::messages::StructuredLog;
use crate::pipeline::{Layer, StageFunction, StageKind};

/// What a successful run looked like.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub pipeline: String,
    /// One entry per relay, upstream first.
    pub relays: Vec<RelayStats>,
    pub elapsed: Duration,
}

impl PipelineReport {
    /// Items the last relay handed to the sink layer.
    pub fn items_into_sinks(&self) -> u64 {
        self.relays.last().map(|stats| stats.delivered).unwrap_or(0)
    }

    /// Items handed over by all relays together.
    pub fn items_relayed(&self) -> u64 {
        self.relays.iter().map(|stats| stats.delivered).sum()
    }
}

/// Join handle of a running pipeline, returned by [`Pipeline::up`](crate::pipeline::Pipeline::up).
pub struct PipelineHandle {
    name: String,
    barrier: JoinBarrier,
    workers: Vec<(WorkerId, StageKind, JoinHandle<()>)>,
    relays: Vec<(String, JoinHandle<Result<RelayStats, RelayError>>)>,
    started: Instant,
}

impl PipelineHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sink workers that have not finished yet.
    pub fn outstanding_sinks(&self) -> usize {
        self.barrier.outstanding()
    }

    /// The join barrier itself, for callers that want to wait without consuming the handle.
    pub fn barrier(&self) -> JoinBarrier {
        self.barrier.clone()
    }

    /// Block until every sink worker has finished, then collect what the run produced.
    ///
    /// Relays and sink workers are reaped. Once the barrier has released they are done, or
    /// done as soon as the items still in flight have failed to find a consumer. Sources
    /// and transforms that closed their output but are still running are left detached.
    ///
    /// Returns the first failure found, worker panics before relay failures. Never returns
    /// if a stage never closes its output or never drains its input.
    pub async fn wait(self) -> Result<PipelineReport, ExecutionError> {
        self.barrier.wait().await;

        let mut relays = Vec::with_capacity(self.relays.len());
        let mut relay_failure = None;
        for (relay, handle) in self.relays {
            match handle.await {
                Ok(Ok(stats)) => relays.push(stats),
                Ok(Err(source)) => {
                    relay_failure.get_or_insert(ExecutionError::Relay { relay, source });
                }
                Err(join_error) => {
                    relay_failure.get_or_insert(ExecutionError::RelayAborted {
                        relay,
                        message: panic_message(join_error),
                    });
                }
            }
        }

        let mut failure = None;
        for (id, kind, handle) in self.workers {
            if kind != StageKind::Sink && !handle.is_finished() {
                WorkerDetached {
                    layer: &id.layer,
                    index: id.index,
                    kind,
                }
                .log();
                continue;
            }
            if let Err(join_error) = handle.await {
                let message = panic_message(join_error);
                WorkerPanicked {
                    layer: &id.layer,
                    index: id.index,
                    message: &message,
                }
                .log();
                failure.get_or_insert(ExecutionError::WorkerPanicked {
                    layer: id.layer,
                    index: id.index,
                    message,
                });
            }
        }

        if let Some(error) = failure.or(relay_failure) {
            PipelineFailed {
                pipeline: &self.name,
                error: &error,
            }
            .log();
            return Err(error);
        }

        let report = PipelineReport {
            pipeline: self.name,
            relays,
            elapsed: self.started.elapsed(),
        };
        PipelineCompleted {
            pipeline: &report.pipeline,
            items_relayed: report.items_relayed(),
            duration: report.elapsed,
        }
        .log();
        Ok(report)
    }
}

impl std::fmt::Debug for PipelineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineHandle")
            .field("name", &self.name)
            .field("outstanding_sinks", &self.barrier.outstanding())
            .field("workers", &self.workers.len())
            .field("relays", &self.relays.len())
            .finish()
    }
}

/// Spawn every worker and relay of an already validated layer list.
///
/// Must run inside a Tokio runtime.
pub(crate) fn launch<T: Send + 'static>(
    name: String,
    layers: Vec<Layer<T>>,
    capacity: usize,
) -> PipelineHandle {
    let started = Instant::now();
    let layer_count = layers.len();
    let worker_count = layers.iter().map(Layer::workers).sum();
    let barrier = JoinBarrier::new(layers.last().map(Layer::workers).unwrap_or(0));

    let mut workers = Vec::with_capacity(worker_count);
    let mut relays = Vec::with_capacity(layer_count.saturating_sub(1));
    let mut upstream: Vec<Inlet<T>> = Vec::new();
    let mut upstream_label = String::new();

    for layer in layers {
        let label = layer.label().to_string();
        let count = layer.workers();

        match layer.stage().clone() {
            StageFunction::Source(stage) => {
                let (outputs, next) = conduit_set(count, capacity);
                for (index, output) in outputs.into_iter().enumerate() {
                    let task = WorkerTask::Source {
                        stage: Arc::clone(&stage),
                        output,
                    };
                    workers.push(spawn_worker(&label, index, task));
                }
                upstream = next;
            }
            StageFunction::Transform(stage) => {
                let inputs = spawn_relay(
                    &mut relays,
                    &upstream_label,
                    &label,
                    std::mem::take(&mut upstream),
                    count,
                    capacity,
                );
                let (outputs, next) = conduit_set(count, capacity);
                for (index, (input, output)) in inputs.into_iter().zip(outputs).enumerate() {
                    let task = WorkerTask::Transform {
                        stage: Arc::clone(&stage),
                        input,
                        output,
                    };
                    workers.push(spawn_worker(&label, index, task));
                }
                upstream = next;
            }
            StageFunction::Sink(stage) => {
                let inputs = spawn_relay(
                    &mut relays,
                    &upstream_label,
                    &label,
                    std::mem::take(&mut upstream),
                    count,
                    capacity,
                );
                for (index, input) in inputs.into_iter().enumerate() {
                    let task = WorkerTask::Sink {
                        stage: Arc::clone(&stage),
                        input,
                        completion: barrier.guard(),
                    };
                    workers.push(spawn_worker(&label, index, task));
                }
            }
        }

        upstream_label = label;
    }

    PipelineStarted {
        pipeline: &name,
        layers: layer_count,
        workers: worker_count,
        relays: relays.len(),
    }
    .log();

    PipelineHandle {
        name,
        barrier,
        workers,
        relays,
        started,
    }
}

fn spawn_worker<T: Send + 'static>(
    layer: &str,
    index: usize,
    task: WorkerTask<T>,
) -> (WorkerId, StageKind, JoinHandle<()>) {
    let id = WorkerId {
        layer: layer.to_string(),
        index,
    };
    let kind = task.kind();
    let span = tracing::debug_span!("worker", layer = %id.layer, index);
    let handle = tokio::spawn(Worker::new(id.clone(), task).run().instrument(span));
    (id, kind, handle)
}

/// Spawn the relay feeding a layer of `count` workers and return the workers' inputs.
fn spawn_relay<T: Send + 'static>(
    relays: &mut Vec<(String, JoinHandle<Result<RelayStats, RelayError>>)>,
    from: &str,
    to: &str,
    inputs: Vec<Inlet<T>>,
    count: usize,
    capacity: usize,
) -> Vec<Inlet<T>> {
    let (outputs, downstream) = conduit_set(count, capacity);
    let name = format!("{from}->{to}");
    let span = RelayStarted {
        relay: &name,
        inputs: inputs.len(),
        outputs: count,
    }
    .span("relay_execution");
    let relay = Relay::new(name.clone(), inputs, outputs);
    relays.push((name, tokio::spawn(relay.run().instrument(span))));
    downstream
}

fn panic_message(error: JoinError) -> String {
    if error.is_cancelled() {
        return "task was cancelled".to_string();
    }
    let payload = error.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
