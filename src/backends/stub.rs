// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Stage implementations for exercising the engine in tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::engine::{Inlet, Outlet};
use crate::traits::{Sink, Source, Transform};

/// Emits `count` numbers in `0..10` per worker, then closes.
pub struct Generator {
    count: u64,
}

impl Generator {
    pub fn new(count: u64) -> Self {
        Self { count }
    }
}

#[async_trait]
impl Source<u64> for Generator {
    async fn run(&self, output: Outlet<u64>) {
        for i in 0..self.count {
            if output.send(i % 10).await.is_err() {
                return;
            }
        }
    }

    fn name(&self) -> &str {
        "generator"
    }
}

/// Multiplies every item by a fixed factor.
pub struct Multiply {
    factor: u64,
}

impl Multiply {
    pub fn new(factor: u64) -> Self {
        Self { factor }
    }
}

#[async_trait]
impl Transform<u64> for Multiply {
    async fn run(&self, mut input: Inlet<u64>, output: Outlet<u64>) {
        while let Some(item) = input.recv().await {
            if output.send(item * self.factor).await.is_err() {
                return;
            }
        }
    }

    fn name(&self) -> &str {
        "multiply"
    }
}

/// Adds one to every item.
pub struct AddOne;

#[async_trait]
impl Transform<u64> for AddOne {
    async fn run(&self, mut input: Inlet<u64>, output: Outlet<u64>) {
        while let Some(item) = input.recv().await {
            if output.send(item + 1).await.is_err() {
                return;
            }
        }
    }

    fn name(&self) -> &str {
        "add_one"
    }
}

/// Emits every item twice.
pub struct Duplicate;

#[async_trait]
impl Transform<u64> for Duplicate {
    async fn run(&self, mut input: Inlet<u64>, output: Outlet<u64>) {
        while let Some(item) = input.recv().await {
            if output.send(item).await.is_err() || output.send(item).await.is_err() {
                return;
            }
        }
    }
}

/// Forwards items after sleeping for `delay` on each one.
pub struct SlowPipe {
    delay: Duration,
}

impl SlowPipe {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Transform<u64> for SlowPipe {
    async fn run(&self, mut input: Inlet<u64>, output: Outlet<u64>) {
        while let Some(item) = input.recv().await {
            tokio::time::sleep(self.delay).await;
            if output.send(item).await.is_err() {
                return;
            }
        }
    }
}

/// Counts the items it sees. Clones share the count, so one clone can be handed to the
/// pipeline while the test keeps another.
#[derive(Clone, Default)]
pub struct Counter {
    seen: Arc<AtomicU64>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.seen.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: Send + 'static> Sink<T> for Counter {
    async fn run(&self, mut input: Inlet<T>) {
        while input.recv().await.is_some() {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn name(&self) -> &str {
        "counter"
    }
}

/// Keeps every item it sees.
#[derive(Clone, Default)]
pub struct Collector {
    items: Arc<Mutex<Vec<u64>>>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sorted(&self) -> Vec<u64> {
        let mut items = self.items.lock().await.clone();
        items.sort_unstable();
        items
    }
}

#[async_trait]
impl Sink<u64> for Collector {
    async fn run(&self, mut input: Inlet<u64>) {
        while let Some(item) = input.recv().await {
            self.items.lock().await.push(item);
        }
    }
}

/// Transform that panics when it sees its `after`-th item (1-based).
pub struct PanickingPipe {
    after: u64,
}

impl PanickingPipe {
    pub fn new(after: u64) -> Self {
        Self { after }
    }
}

#[async_trait]
impl Transform<u64> for PanickingPipe {
    async fn run(&self, mut input: Inlet<u64>, output: Outlet<u64>) {
        let mut seen = 0;
        while let Some(item) = input.recv().await {
            seen += 1;
            if seen == self.after {
                panic!("unexpected item {item}");
            }
            if output.send(item).await.is_err() {
                return;
            }
        }
    }
}

/// Sink that panics on its first item.
pub struct PanickingSink;

#[async_trait]
impl Sink<u64> for PanickingSink {
    async fn run(&self, mut input: Inlet<u64>) {
        if let Some(item) = input.recv().await {
            panic!("sink rejected item {item}");
        }
    }
}

/// Emits one item, closes its output, then keeps running for `linger`.
pub struct LingeringSource {
    linger: Duration,
}

impl LingeringSource {
    pub fn new(linger: Duration) -> Self {
        Self { linger }
    }
}

#[async_trait]
impl Source<u64> for LingeringSource {
    async fn run(&self, output: Outlet<u64>) {
        let _ = output.send(1).await;
        output.close();
        tokio::time::sleep(self.linger).await;
    }
}

/// Sink that reads a single item and returns without draining its input.
#[derive(Clone, Default)]
pub struct FirstOnly {
    seen: Counter,
}

impl FirstOnly {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.seen.count()
    }
}

#[async_trait]
impl Sink<u64> for FirstOnly {
    async fn run(&self, mut input: Inlet<u64>) {
        if input.recv().await.is_some() {
            self.seen.seen.fetch_add(1, Ordering::SeqCst);
        }
    }
}
