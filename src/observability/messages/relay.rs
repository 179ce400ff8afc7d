// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for relay (multiplexer) events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Relay spawned between two layers.
///
/// # Log Level
/// `debug!` - Wiring detail
pub struct RelayStarted<'a> {
    pub relay: &'a str,
    pub inputs: usize,
    pub outputs: usize,
}

impl Display for RelayStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Relay '{}' started: {} inputs -> {} outputs",
            self.relay, self.inputs, self.outputs
        )
    }
}

impl StructuredLog for RelayStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            relay = self.relay,
            inputs = self.inputs,
            outputs = self.outputs,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "relay",
            span_name = name,
            relay = self.relay,
            inputs = self.inputs,
            outputs = self.outputs,
        )
    }
}

/// One upstream conduit reported end-of-stream.
///
/// # Log Level
/// `debug!` - Wiring detail
pub struct RelayInputClosed<'a> {
    pub relay: &'a str,
    pub input: usize,
    pub closed: usize,
    pub inputs: usize,
}

impl Display for RelayInputClosed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Relay '{}' input {} closed ({}/{} closed)",
            self.relay, self.input, self.closed, self.inputs
        )
    }
}

impl StructuredLog for RelayInputClosed<'_> {
    fn log(&self) {
        tracing::debug!(
            relay = self.relay,
            input = self.input,
            closed = self.closed,
            inputs = self.inputs,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "relay_input_closed",
            span_name = name,
            relay = self.relay,
            input = self.input,
        )
    }
}

/// A downstream reader went away; the relay stops offering items to it.
///
/// # Log Level
/// `warn!` - A consumer exited before its input closed
pub struct RelayOutputRetired<'a> {
    pub relay: &'a str,
    pub output: usize,
}

impl Display for RelayOutputRetired<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Relay '{}' output {} has no reader, retiring it",
            self.relay, self.output
        )
    }
}

impl StructuredLog for RelayOutputRetired<'_> {
    fn log(&self) {
        tracing::warn!(relay = self.relay, output = self.output, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "relay_output_retired",
            span_name = name,
            relay = self.relay,
            output = self.output,
        )
    }
}

/// One item moved from an input to an output.
///
/// # Log Level
/// `trace!` - Per-item detail
pub struct RelayDelivered<'a> {
    pub relay: &'a str,
    pub input: usize,
    pub output: usize,
}

impl Display for RelayDelivered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Relay '{}' moved an item from input {} to output {}",
            self.relay, self.input, self.output
        )
    }
}

impl StructuredLog for RelayDelivered<'_> {
    fn log(&self) {
        tracing::trace!(
            relay = self.relay,
            input = self.input,
            output = self.output,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "relay_delivered",
            span_name = name,
            relay = self.relay,
            input = self.input,
            output = self.output,
        )
    }
}

/// Every input closed; all outputs were closed and the relay exited.
///
/// # Log Level
/// `debug!` - Wiring detail
pub struct RelayClosed<'a> {
    pub relay: &'a str,
    pub received: u64,
    pub delivered: u64,
}

impl Display for RelayClosed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Relay '{}' drained: {} received, {} delivered; closing outputs",
            self.relay, self.received, self.delivered
        )
    }
}

impl StructuredLog for RelayClosed<'_> {
    fn log(&self) {
        tracing::debug!(
            relay = self.relay,
            received = self.received,
            delivered = self.delivered,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "relay_closed",
            span_name = name,
            relay = self.relay,
            received = self.received,
            delivered = self.delivered,
        )
    }
}

/// The relay gave up because nothing downstream is reading.
///
/// # Log Level
/// `error!` - Items were lost
pub struct RelayFailed<'a> {
    pub relay: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for RelayFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Relay '{}' failed: {}", self.relay, self.error)
    }
}

impl StructuredLog for RelayFailed<'_> {
    fn log(&self) {
        tracing::error!(relay = self.relay, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "relay_failed",
            span_name = name,
            relay = self.relay,
            error = %self.error,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_delivered_display() {
        let msg = RelayDelivered {
            relay: "source->pipe-1",
            input: 2,
            output: 7,
        };
        assert_eq!(
            msg.to_string(),
            "Relay 'source->pipe-1' moved an item from input 2 to output 7"
        );
        msg.log();
    }
}
