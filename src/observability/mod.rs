// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging in the pipeline engine. Message types follow a struct-based pattern
//! with `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep field names consistent between the human-readable text and structured fields
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - pipeline lifecycle events (start, completion, failure)
//! * `messages::relay` - relay start, input closure, delivery and shutdown
//! * `messages::worker` - worker start, finish and panics
//! * `messages::validation` - configuration validation problems
//!
//! Installing a `tracing` subscriber is left to the application.
//!
//! # Usage
//!
//! ```rust
//! use muxline::observability::messages::StructuredLog;
//! use muxline::observability::messages::worker::WorkerPanicked;
//!
//! let msg = WorkerPanicked {
//!     layer: "pipe-1",
//!     index: 3,
//!     message: "unexpected item",
//! };
//!
//! msg.log();
//! ```

pub mod messages;
