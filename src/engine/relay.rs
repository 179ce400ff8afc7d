// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The relay (multiplexer) between two adjacent layers.
//!
//! A relay owns the read ends of the M output conduits of the upstream layer and the write
//! ends of the N input conduits of the downstream layer. It repeatedly waits for any open
//! input to yield, then hands the item to whichever output can accept it first:
//!
//! 1. If all M inputs have reported end-of-stream, drop (close) all N outputs and exit.
//! 2. Otherwise wait on every input that is still open. An input that yields `None` is
//!    marked closed and the loop continues.
//! 3. An item is offered to all live outputs at once; the first one with a free slot takes
//!    it. There is no retry limit: the relay waits as long as some output is live.
//!
//! Every item is delivered to exactly one output and the outputs close only after the
//! upstream has fully drained. Arrival order across conduits is not preserved. Both waits
//! start scanning at a rotating offset so that simultaneously ready conduits take turns.

use std::future::poll_fn;
use std::task::Poll;
use tokio_util::sync::PollSender;

use crate::engine::{Inlet, Outlet};
use crate::errors::RelayError;
use crate::observability::messages::relay::{
    RelayClosed, RelayDelivered, RelayFailed, RelayInputClosed, RelayOutputRetired,
    RelayStarted,
};
use crate::observability::messages::StructuredLog;

/// Counters for one relay run. On a successful run `received == delivered`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub relay: String,
    pub inputs: usize,
    pub outputs: usize,
    pub received: u64,
    pub delivered: u64,
}

/// Many-to-many load-balancing bridge. See the module documentation for the algorithm.
pub struct Relay<T> {
    name: String,
    inputs: Vec<Inlet<T>>,
    outputs: Vec<Outlet<T>>,
}

impl<T: Send + 'static> Relay<T> {
    pub fn new(name: impl Into<String>, inputs: Vec<Inlet<T>>, outputs: Vec<Outlet<T>>) -> Self {
        Self {
            name: name.into(),
            inputs,
            outputs,
        }
    }

    /// Run until every input has closed, then close every output.
    ///
    /// Fails only when all outputs lost their readers while an item was waiting to be
    /// delivered. In that case the inputs are dropped as well, so upstream producers see
    /// their sends fail instead of blocking forever.
    pub async fn run(self) -> Result<RelayStats, RelayError> {
        let Relay {
            name,
            mut inputs,
            outputs,
        } = self;

        RelayStarted {
            relay: &name,
            inputs: inputs.len(),
            outputs: outputs.len(),
        }
        .log();

        let mut stats = RelayStats {
            relay: name.clone(),
            inputs: inputs.len(),
            outputs: outputs.len(),
            ..Default::default()
        };
        let mut outputs: Vec<Option<PollSender<T>>> = outputs
            .into_iter()
            .map(|output| Some(output.into_poll_sender()))
            .collect();
        let mut closed = vec![false; inputs.len()];
        let mut closed_count = 0;
        let mut receive_cursor = 0;
        let mut deliver_cursor = 0;

        loop {
            if closed_count == inputs.len() {
                drop(outputs);
                RelayClosed {
                    relay: &name,
                    received: stats.received,
                    delivered: stats.delivered,
                }
                .log();
                return Ok(stats);
            }

            let (input, next) = receive_any(&mut inputs, &closed, &mut receive_cursor).await;
            let Some(item) = next else {
                closed[input] = true;
                closed_count += 1;
                RelayInputClosed {
                    relay: &name,
                    input,
                    closed: closed_count,
                    inputs: stats.inputs,
                }
                .log();
                continue;
            };
            stats.received += 1;

            match deliver_any(&name, &mut outputs, &mut deliver_cursor, item).await {
                Some(output) => {
                    stats.delivered += 1;
                    RelayDelivered {
                        relay: &name,
                        input,
                        output,
                    }
                    .log();
                }
                None => {
                    let error = RelayError::NoConsumers {
                        outputs: stats.outputs,
                        dropped: stats.received - stats.delivered,
                    };
                    RelayFailed {
                        relay: &name,
                        error: &error,
                    }
                    .log();
                    return Err(error);
                }
            }
        }
    }
}

/// Wait until one of the open inputs yields, returning its index and what it yielded.
///
/// At least one input must still be open.
async fn receive_any<T>(
    inputs: &mut [Inlet<T>],
    closed: &[bool],
    cursor: &mut usize,
) -> (usize, Option<T>) {
    let count = inputs.len();
    let start = *cursor % count;
    *cursor = start + 1;

    poll_fn(|cx| {
        for offset in 0..count {
            let index = (start + offset) % count;
            if closed[index] {
                continue;
            }
            if let Poll::Ready(next) = inputs[index].poll_recv(cx) {
                return Poll::Ready((index, next));
            }
        }
        Poll::Pending
    })
    .await
}

/// Hand `item` to the first live output with a free slot.
///
/// Outputs whose reader is gone are retired (set to `None`). Returns `None` once every
/// output is retired; the item is dropped in that case.
async fn deliver_any<T: Send + 'static>(
    relay: &str,
    outputs: &mut [Option<PollSender<T>>],
    cursor: &mut usize,
    mut item: T,
) -> Option<usize> {
    let count = outputs.len();
    if count == 0 {
        return None;
    }

    loop {
        let start = *cursor % count;
        *cursor = start + 1;

        let ready = poll_fn(|cx| {
            let mut pending = 0;
            for offset in 0..count {
                let index = (start + offset) % count;
                let Some(sender) = outputs[index].as_mut() else {
                    continue;
                };
                match sender.poll_reserve(cx) {
                    Poll::Ready(Ok(())) => return Poll::Ready(Some(index)),
                    Poll::Ready(Err(_)) => {
                        outputs[index] = None;
                        RelayOutputRetired {
                            relay,
                            output: index,
                        }
                        .log();
                    }
                    Poll::Pending => pending += 1,
                }
            }
            if pending == 0 {
                Poll::Ready(None)
            } else {
                Poll::Pending
            }
        })
        .await?;

        // Only the chosen output keeps its reserved slot.
        for (index, sender) in outputs.iter_mut().enumerate() {
            if index != ready {
                if let Some(sender) = sender {
                    sender.abort_send();
                }
            }
        }

        let sender = outputs[ready].as_mut()?;
        match sender.send_item(item) {
            Ok(()) => return Some(ready),
            Err(error) => {
                outputs[ready] = None;
                RelayOutputRetired {
                    relay,
                    output: ready,
                }
                .log();
                item = error.into_inner()?;
            }
        }
    }
}
