// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::engine::{Inlet, Outlet};
use crate::traits::{Sink, Source, Transform};

/// Transform applying a pure function to every item. Built by [`pipe_from_fn`].
pub struct FnPipe<F> {
    f: F,
    name: &'static str,
}

/// Wrap a pure item-to-item function as a transform stage.
///
/// The stage reads until its input closes, writes `f(item)` for each item and closes its
/// output when the input is exhausted.
pub fn pipe_from_fn<T, F>(f: F) -> FnPipe<F>
where
    T: Send + 'static,
    F: Fn(T) -> T + Send + Sync + 'static,
{
    FnPipe { f, name: "fn-pipe" }
}

impl<F> FnPipe<F> {
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

#[async_trait]
impl<T, F> Transform<T> for FnPipe<F>
where
    T: Send + 'static,
    F: Fn(T) -> T + Send + Sync + 'static,
{
    async fn run(&self, mut input: Inlet<T>, output: Outlet<T>) {
        while let Some(item) = input.recv().await {
            if output.send((self.f)(item)).await.is_err() {
                break;
            }
        }
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Transform emitting zero or one item per input. Built by [`filter_map_from_fn`].
pub struct FnFilterMap<F> {
    f: F,
}

pub fn filter_map_from_fn<T, F>(f: F) -> FnFilterMap<F>
where
    T: Send + 'static,
    F: Fn(T) -> Option<T> + Send + Sync + 'static,
{
    FnFilterMap { f }
}

#[async_trait]
impl<T, F> Transform<T> for FnFilterMap<F>
where
    T: Send + 'static,
    F: Fn(T) -> Option<T> + Send + Sync + 'static,
{
    async fn run(&self, mut input: Inlet<T>, output: Outlet<T>) {
        while let Some(item) = input.recv().await {
            let Some(mapped) = (self.f)(item) else {
                continue;
            };
            if output.send(mapped).await.is_err() {
                break;
            }
        }
    }

    fn name(&self) -> &str {
        "fn-filter-map"
    }
}

/// Source emitting the items of an iterator. Built by [`source_from_fn`].
pub struct FnSource<F> {
    f: F,
}

/// Every source worker calls `f` once and emits what the returned iterator yields.
pub fn source_from_fn<T, I, F>(f: F) -> FnSource<F>
where
    T: Send + 'static,
    I: IntoIterator<Item = T>,
    I::IntoIter: Send,
    F: Fn() -> I + Send + Sync + 'static,
{
    FnSource { f }
}

#[async_trait]
impl<T, I, F> Source<T> for FnSource<F>
where
    T: Send + 'static,
    I: IntoIterator<Item = T>,
    I::IntoIter: Send,
    F: Fn() -> I + Send + Sync + 'static,
{
    async fn run(&self, output: Outlet<T>) {
        for item in (self.f)() {
            if output.send(item).await.is_err() {
                break;
            }
        }
    }

    fn name(&self) -> &str {
        "fn-source"
    }
}

/// Sink running a side effect per item. Built by [`sink_from_fn`].
pub struct FnSink<F> {
    f: F,
}

pub fn sink_from_fn<T, F>(f: F) -> FnSink<F>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    FnSink { f }
}

#[async_trait]
impl<T, F> Sink<T> for FnSink<F>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    async fn run(&self, mut input: Inlet<T>) {
        while let Some(item) = input.recv().await {
            (self.f)(item);
        }
    }

    fn name(&self) -> &str {
        "fn-sink"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::conduit;

    async fn run_transform(stage: impl Transform<u64>, items: Vec<u64>) -> Vec<u64> {
        let (upstream, input) = conduit::<u64>(1);
        let (output, downstream) = conduit::<u64>(1);

        let feeder = tokio::spawn(async move {
            for item in items {
                upstream.send(item).await.unwrap();
            }
        });
        let (_, collected) = tokio::join!(stage.run(input, output), downstream.collect());
        feeder.await.unwrap();
        collected
    }

    #[tokio::test]
    async fn test_pipe_from_fn_maps_every_item() {
        let stage = pipe_from_fn(|x: u64| x * 10 + 1).named("mult-plus");
        assert_eq!(Transform::<u64>::name(&stage), "mult-plus");
        assert_eq!(run_transform(stage, vec![1, 2, 3]).await, vec![11, 21, 31]);
    }

    #[tokio::test]
    async fn test_filter_map_can_drop_items() {
        let stage = filter_map_from_fn(|x: u64| (x % 2 == 0).then_some(x / 2));
        assert_eq!(run_transform(stage, (0..10).collect()).await, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_pipe_stops_when_reader_is_gone() {
        let stage = pipe_from_fn(|x: u64| x);
        let (upstream, input) = conduit::<u64>(4);
        let (output, downstream) = conduit::<u64>(1);
        drop(downstream);

        upstream.send(1).await.unwrap();
        upstream.send(2).await.unwrap();
        // Returns without draining its input even though the writer is still open.
        stage.run(input, output).await;
        assert!(upstream.is_closed());
    }

    #[tokio::test]
    async fn test_source_from_fn_emits_iterator() {
        let stage = source_from_fn(|| vec![3u64, 1, 2]);
        let (output, downstream) = conduit::<u64>(1);
        let (_, collected) = tokio::join!(stage.run(output), downstream.collect());
        assert_eq!(collected, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_sink_from_fn_sees_every_item() {
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::sync::Arc;

        let seen = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&seen);
        let stage = sink_from_fn(move |x: u64| {
            counter.fetch_add(x, Ordering::SeqCst);
        });

        let (upstream, input) = conduit::<u64>(1);
        let feeder = tokio::spawn(async move {
            for item in 1..=4 {
                upstream.send(item).await.unwrap();
            }
        });
        stage.run(input).await;
        feeder.await.unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 10);
    }
}
