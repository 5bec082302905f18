//! Buffered response builder.
//!
//! A [`ResponseBuilder`] is owned by exactly one dispatch call. The invoked
//! handler mutates it; the dispatcher then finalizes it unconditionally.
//! Finalization is an explicit, consuming step rather than drop-glue, which
//! keeps flush timing visible and testable: a suppressed builder writes
//! nothing, an unsuppressed one serializes the status line, fixed headers,
//! and the complete body exactly once.

use std::fmt;
use std::io;

use crate::transport::ResponseSink;

/// Body of the synthesized response when no handler matches.
pub(crate) const NOT_FOUND_BODY: &str = "<html><body><h2>Page not found!</h2></body></html>\n";

/// Accumulates a status and body for one HTTP exchange.
///
/// Defaults to `500 unknown server error` so a handler that returns `true`
/// without setting a status still produces a well-formed, clearly wrong
/// response instead of a silent 200.
pub struct ResponseBuilder {
    status: u16,
    reason: String,
    body: Vec<u8>,
    suppressed: bool,
}

impl ResponseBuilder {
    pub(crate) fn new() -> Self {
        Self {
            status: 500,
            reason: "unknown server error".to_string(),
            body: Vec::new(),
            suppressed: false,
        }
    }

    /// Overwrite the default status code and reason text.
    pub fn set_status(&mut self, code: u16, text: impl Into<String>) {
        self.status = code;
        self.reason = text.into();
    }

    /// Append `data` to the body buffer. Writes are append-only and ordered;
    /// the only size limit is available memory.
    pub fn append(&mut self, data: impl AsRef<[u8]>) {
        self.body.extend_from_slice(data.as_ref());
    }

    /// Current status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Mark the exchange as declined: finalization will write nothing.
    pub(crate) fn suppress(&mut self) {
        self.suppressed = true;
    }

    /// Serialize to the sink, exactly once, unless suppressed.
    ///
    /// Bodies are fully buffered: no chunked transfer, no keep-alive, and
    /// nothing is emitted before the handler has returned.
    pub(crate) fn finalize(self, sink: &mut dyn ResponseSink) -> io::Result<()> {
        if self.suppressed {
            return Ok(());
        }
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n",
            self.status, self.reason
        );
        sink.write_all(head.as_bytes())?;
        sink.write_all(&self.body)
    }
}

impl io::Write for ResponseBuilder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Write for ResponseBuilder {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s.as_bytes());
        Ok(())
    }
}
