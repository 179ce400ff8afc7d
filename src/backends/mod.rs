// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ready-made stage implementations.
//!
//! # Adapters
//! Closures turned into stages, for logic that does not need its own type:
//! - **`pipe_from_fn`**: one output per input (a pure item-to-item function)
//! - **`filter_map_from_fn`**: zero or one output per input
//! - **`source_from_fn`**: each source worker emits the items of a freshly built iterator
//! - **`sink_from_fn`**: a side effect per item
//!
//! All adapters stop producing as soon as their output reports that the reader is gone.
//!
//! ## Stub Backend (Test-Only)
//! Number generators, arithmetic pipes, counting sinks and deliberately failing stages used
//! by the engine's tests. Only available in test builds.
//!
//! # Examples
//!
//! ```rust
//! use muxline::backends::adapters::{pipe_from_fn, sink_from_fn, source_from_fn};
//! use muxline::pipeline::Pipeline;
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let total = Arc::new(AtomicU64::new(0));
//! let sum = Arc::clone(&total);
//!
//! let pipeline = Pipeline::builder(source_from_fn(|| 1..=4u64), 2)
//!     .with_pipe(pipe_from_fn(|x: u64| x * 10), 3)
//!     .with_sinks(sink_from_fn(move |x: u64| { sum.fetch_add(x, Ordering::Relaxed); }), 1)
//!     .unwrap();
//!
//! pipeline.up().wait().await.unwrap();
//! assert_eq!(total.load(Ordering::Relaxed), 200);
//! # }
//! ```

pub mod adapters;
#[cfg(test)]
pub mod stub;
