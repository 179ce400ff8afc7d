// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Single-writer, single-reader item channels with an explicit end-of-stream.
//!
//! A conduit is a bounded Tokio `mpsc` channel split into an [`Outlet`] (write end) and an
//! [`Inlet`] (read end). Neither end is `Clone`, so each conduit has exactly one producer and
//! one consumer. Closing is dropping the `Outlet`: the reader still drains everything that was
//! buffered and then observes `None`.

use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_util::sync::PollSender;

use crate::config::consts::DEFAULT_CONDUIT_CAPACITY;
use crate::errors::ConduitClosed;

/// Write end of a conduit. Dropping it closes the conduit.
#[derive(Debug)]
pub struct Outlet<T> {
    tx: mpsc::Sender<T>,
}

/// Read end of a conduit.
#[derive(Debug)]
pub struct Inlet<T> {
    rx: mpsc::Receiver<T>,
}

/// Create a conduit holding up to `capacity` buffered items.
///
/// # Panics
/// Panics if `capacity` is zero. The pipeline builder rejects zero capacities before any
/// conduit is allocated.
pub fn conduit<T>(capacity: usize) -> (Outlet<T>, Inlet<T>) {
    let (tx, rx) = mpsc::channel(capacity);
    (Outlet { tx }, Inlet { rx })
}

/// Create a conduit with the default capacity of one item.
pub fn default_conduit<T>() -> (Outlet<T>, Inlet<T>) {
    conduit(DEFAULT_CONDUIT_CAPACITY)
}

/// Allocate `count` independent conduits, returning the write and read ends index-aligned.
pub fn conduit_set<T>(count: usize, capacity: usize) -> (Vec<Outlet<T>>, Vec<Inlet<T>>) {
    (0..count).map(|_| conduit(capacity)).unzip()
}

impl<T> Outlet<T> {
    /// Send one item, waiting while the buffer is full.
    ///
    /// Fails with the item handed back when the reader is gone. Producers should stop on
    /// that error; nobody will ever read what they emit.
    pub async fn send(&self, item: T) -> Result<(), ConduitClosed<T>> {
        self.tx.send(item).await.map_err(|e| ConduitClosed(e.0))
    }

    /// True once the reading side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Close the conduit explicitly. Equivalent to dropping the outlet.
    pub fn close(self) {}

    pub(crate) fn into_poll_sender(self) -> PollSender<T>
    where
        T: Send + 'static,
    {
        PollSender::new(self.tx)
    }
}

impl<T> Inlet<T> {
    /// Receive the next item, or `None` once the writer has closed and the buffer is drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Non-blocking variant used by the relay's wait-any.
    pub(crate) fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.rx.poll_recv(cx)
    }

    /// Drain the conduit to completion, returning every remaining item.
    pub async fn collect(mut self) -> Vec<T> {
        let mut items = Vec::new();
        while let Some(item) = self.recv().await {
            items.push(item);
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_close_is_observed_after_buffered_items() {
        let (outlet, inlet) = conduit(4);
        outlet.send(1).await.unwrap();
        outlet.send(2).await.unwrap();
        outlet.close();

        assert_eq!(inlet.collect().await, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_send_after_reader_dropped_returns_item() {
        let (outlet, inlet) = default_conduit::<u32>();
        drop(inlet);

        assert!(outlet.is_closed());
        assert_eq!(outlet.send(7).await, Err(ConduitClosed(7)));
    }

    #[tokio::test]
    async fn test_conduit_set_is_index_aligned() {
        let (outlets, mut inlets) = conduit_set::<usize>(3, 1);
        for (i, outlet) in outlets.iter().enumerate() {
            outlet.send(i).await.unwrap();
        }
        for (i, inlet) in inlets.iter_mut().enumerate() {
            assert_eq!(inlet.recv().await, Some(i));
        }
    }
}
