// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for a human-readable line and [`StructuredLog`]
//! to emit that line together with its fields at the level documented on the type.
//!
//! # Organization
//!
//! * `engine` - pipeline lifecycle events
//! * `relay` - relay (multiplexer) events
//! * `worker` - worker lifecycle events
//! * `validation` - configuration validation problems
//!
//! # Usage Pattern
//!
//! ```rust
//! use muxline::observability::messages::engine::PipelineStarted;
//!
//! let msg = PipelineStarted {
//!     pipeline: "numbers",
//!     layers: 3,
//!     workers: 7,
//!     relays: 2,
//! };
//!
//! tracing::info!("{}", msg);
//! ```

use tracing::Span;

pub mod engine;
pub mod relay;
pub mod validation;
pub mod worker;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
