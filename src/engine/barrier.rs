// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Countdown of outstanding sink workers.
///
/// Each sink holds one [`BarrierGuard`]; dropping the guard counts the sink as finished, so a
/// sink that panics still releases the barrier. Guards are only handed out by the pipeline
/// that owns the barrier:
///
/// ```compile_fail
/// use muxline::engine::JoinBarrier;
///
/// let barrier = JoinBarrier::new(1);
/// let _extra = barrier.guard();
/// ```
#[derive(Debug, Clone)]
pub struct JoinBarrier {
    inner: Arc<BarrierInner>,
}

#[derive(Debug)]
struct BarrierInner {
    remaining: AtomicUsize,
    notify: Notify,
}

/// Decrements its [`JoinBarrier`] exactly once, on drop.
#[derive(Debug)]
pub struct BarrierGuard {
    inner: Arc<BarrierInner>,
}

impl JoinBarrier {
    pub fn new(count: usize) -> Self {
        Self {
            inner: Arc::new(BarrierInner {
                remaining: AtomicUsize::new(count),
                notify: Notify::new(),
            }),
        }
    }

    /// Hand out one guard. The caller must create exactly `count` guards.
    pub(crate) fn guard(&self) -> BarrierGuard {
        BarrierGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of guards not yet dropped.
    pub fn outstanding(&self) -> usize {
        self.inner.remaining.load(Ordering::Acquire)
    }

    /// Resolve once every guard has been dropped.
    pub async fn wait(&self) {
        loop {
            // Register interest before checking the counter so a release in between
            // is not missed.
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.outstanding() == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Drop for BarrierGuard {
    fn drop(&mut self) {
        let previous = self.inner.remaining.fetch_sub(1, Ordering::AcqRel);
        if previous == 1 {
            self.inner.notify.notify_waiters();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_zero_count_resolves_immediately() {
        let barrier = JoinBarrier::new(0);
        tokio::time::timeout(Duration::from_secs(1), barrier.wait())
            .await
            .expect("barrier with no guards should not block");
    }

    #[tokio::test]
    async fn test_wait_resolves_after_last_guard() {
        let barrier = JoinBarrier::new(3);
        let guards: Vec<_> = (0..3).map(|_| barrier.guard()).collect();

        let waiter = {
            let barrier = barrier.clone();
            tokio::spawn(async move { barrier.wait().await })
        };

        for (i, guard) in guards.into_iter().enumerate() {
            assert_eq!(barrier.outstanding(), 3 - i);
            assert!(!waiter.is_finished());
            drop(guard);
            tokio::task::yield_now().await;
        }

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish")
            .unwrap();
        assert_eq!(barrier.outstanding(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_guard_released_by_panicking_task() {
        let barrier = JoinBarrier::new(1);
        let guard = barrier.guard();

        let task = tokio::spawn(async move {
            let _guard = guard;
            panic!("sink failure");
        });
        assert!(task.await.is_err());

        tokio::time::timeout(Duration::from_secs(1), barrier.wait())
            .await
            .expect("panicking holder must still release the barrier");
    }
}
