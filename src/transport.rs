//! Boundary traits implemented by the embedding transport engine.
//!
//! portico never touches a socket. The engine underneath (the component that
//! owns the accept loop, HTTP parsing, and RFC 6455 framing) reaches the core
//! through the inbound event methods on [`Server`](crate::server::Server) and
//! hands the core these two outbound primitives:
//!
//! - [`ResponseSink`] - a per-request sink that receives the fully buffered
//!   HTTP response bytes exactly once.
//! - [`FrameSink`] - a per-connection sink that writes a single WebSocket
//!   text frame and reports the engine's send result.
//!
//! `ResponseSink` is implemented for `Vec<u8>` so tests and simple embedders
//! can capture the serialized response directly.

use std::io;

/// Per-request sink for raw HTTP response bytes.
///
/// The dispatcher writes the status line, fixed headers, and the complete
/// buffered body through this trait in one finalization step. There is no
/// partial or streaming emission.
pub trait ResponseSink {
    /// Write `bytes` to the underlying connection.
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl ResponseSink for Vec<u8> {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Per-connection sink for outbound WebSocket text frames.
///
/// One instance is handed to the core at connect time and lives for the
/// connection's lifetime. Frame serialization (masking, fragmentation,
/// per-connection write locking) is the engine's job; the core only ever
/// sends whole text frames.
pub trait FrameSink: Send + Sync {
    /// Send `text` as a single text frame.
    fn send_text(&self, text: &str) -> SendOutcome;
}

/// Result of a WebSocket send attempt, as reported by the engine.
///
/// Mirrors the classic `n / 0 / -1` return of embedded engine write calls.
/// `Closed` is terminal for the handle: callers keeping their own liveness
/// list should evict it rather than retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Frame written; payload byte count as counted by the engine.
    Sent(usize),
    /// The connection is already closed.
    Closed,
    /// Engine-level write failure.
    Error,
}

impl SendOutcome {
    /// True when the frame was written.
    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self, SendOutcome::Sent(_))
    }
}
