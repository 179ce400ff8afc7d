// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use crate::engine::{BarrierGuard, Inlet, Outlet};
use crate::observability::messages::worker::{WorkerFinished, WorkerStarted};
use crate::observability::messages::StructuredLog;
use crate::pipeline::StageKind;
use crate::traits::{Sink, Source, Transform};

/// Identity of one worker: its layer label and index within the layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkerId {
    pub layer: String,
    pub index: usize,
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.layer, self.index)
    }
}

/// A stage bound to the conduit ends of one worker slot.
///
/// The variant fixes which ends exist: sources have no input, sinks have no output but carry
/// the guard that releases the join barrier.
pub enum WorkerTask<T: Send + 'static> {
    Source {
        stage: Arc<dyn Source<T>>,
        output: Outlet<T>,
    },
    Transform {
        stage: Arc<dyn Transform<T>>,
        input: Inlet<T>,
        output: Outlet<T>,
    },
    Sink {
        stage: Arc<dyn Sink<T>>,
        input: Inlet<T>,
        completion: BarrierGuard,
    },
}

impl<T: Send + 'static> WorkerTask<T> {
    pub fn kind(&self) -> StageKind {
        match self {
            WorkerTask::Source { .. } => StageKind::Source,
            WorkerTask::Transform { .. } => StageKind::Transform,
            WorkerTask::Sink { .. } => StageKind::Sink,
        }
    }

    fn stage_name(&self) -> &str {
        match self {
            WorkerTask::Source { stage, .. } => stage.name(),
            WorkerTask::Transform { stage, .. } => stage.name(),
            WorkerTask::Sink { stage, .. } => stage.name(),
        }
    }
}

/// One running instance of a stage function.
pub struct Worker<T: Send + 'static> {
    id: WorkerId,
    task: WorkerTask<T>,
}

impl<T: Send + 'static> Worker<T> {
    pub fn new(id: WorkerId, task: WorkerTask<T>) -> Self {
        Self { id, task }
    }

    /// Run the stage to completion.
    ///
    /// The stage owns its conduit ends, so the output closes when it returns or unwinds.
    /// For sinks the barrier guard is held until the stage is done and is released on
    /// every exit path.
    pub async fn run(self) {
        let kind = self.task.kind();
        WorkerStarted {
            layer: &self.id.layer,
            index: self.id.index,
            kind,
            stage: self.task.stage_name(),
        }
        .log();

        match self.task {
            WorkerTask::Source { stage, output } => stage.run(output).await,
            WorkerTask::Transform {
                stage,
                input,
                output,
            } => stage.run(input, output).await,
            WorkerTask::Sink {
                stage,
                input,
                completion,
            } => {
                let _completion = completion;
                stage.run(input).await;
            }
        }

        WorkerFinished {
            layer: &self.id.layer,
            index: self.id.index,
            kind,
        }
        .log();
    }
}
