//! WebSocket leaf types: opcode, message view, connection wrapper, endpoint.

use std::fmt;
use std::sync::Arc;

use crate::transport::{FrameSink, SendOutcome};

/// RFC 6455 §11.8 frame opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Continuation = 0x0,
    Text = 0x1,
    Binary = 0x2,
    Close = 0x8,
    Ping = 0x9,
    Pong = 0xa,
}

impl Opcode {
    /// Decode the opcode from a data frame's flag byte (low 4 bits).
    ///
    /// Returns `None` for the reserved opcode values; a conforming engine
    /// never delivers those, so the caller treats `None` as a transport
    /// contract breach.
    #[must_use]
    pub fn from_frame_flags(flags: u8) -> Option<Self> {
        match flags & 0x0f {
            0x0 => Some(Opcode::Continuation),
            0x1 => Some(Opcode::Text),
            0x2 => Some(Opcode::Binary),
            0x8 => Some(Opcode::Close),
            0x9 => Some(Opcode::Ping),
            0xa => Some(Opcode::Pong),
            _ => None,
        }
    }
}

/// Borrowed view of one inbound frame, valid only inside the data callback.
/// Must not be retained.
pub struct WsMessage<'a> {
    data: &'a [u8],
    opcode: Opcode,
}

impl<'a> WsMessage<'a> {
    pub(crate) fn new(data: &'a [u8], opcode: Opcode) -> Self {
        Self { data, opcode }
    }

    /// Raw payload bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data
    }

    /// Frame opcode.
    #[must_use]
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }
}

/// Opaque, stable identity for one WebSocket connection's lifetime.
///
/// Issued monotonically at connect time, so a handle is never reused even if
/// the engine recycles its own per-connection memory. A new TCP-level
/// connection always produces a new handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnHandle(u64);

impl ConnHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConnHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ws#{}", self.0)
    }
}

/// Non-owning wrapper around one open connection.
///
/// Cheap to clone; cloning does not extend the connection's lifetime. After
/// the engine closes the connection, [`send`](Self::send) reports
/// [`SendOutcome::Closed`] rather than failing hard.
#[derive(Clone)]
pub struct WsConn {
    handle: ConnHandle,
    sink: Arc<dyn FrameSink>,
}

impl WsConn {
    pub(crate) fn new(handle: ConnHandle, sink: Arc<dyn FrameSink>) -> Self {
        Self { handle, sink }
    }

    /// The connection's registry handle.
    #[must_use]
    pub fn handle(&self) -> ConnHandle {
        self.handle
    }

    /// Send `text` as a single text frame. There is no binary send path and
    /// no fragmentation support at this layer.
    pub fn send(&self, text: &str) -> SendOutcome {
        self.sink.send_text(text)
    }
}

impl fmt::Debug for WsConn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WsConn").field("handle", &self.handle).finish()
    }
}

/// Callback invoked once, after the upgrade is accepted and before any data.
pub type ConnectHandler = Box<dyn Fn(&WsConn) + Send + Sync>;
/// Callback invoked for every inbound data frame.
pub type DataHandler = Box<dyn Fn(&WsConn, &WsMessage<'_>) + Send + Sync>;
/// Callback invoked exactly once when the connection closes, before the
/// client is removed from the registry.
pub type CloseHandler = Box<dyn Fn(&WsConn) + Send + Sync>;

/// The callback triple registered for one WebSocket path pattern; the
/// payload type of the WebSocket route table.
pub struct WsEndpoint {
    pub(crate) on_connect: ConnectHandler,
    pub(crate) on_data: DataHandler,
    pub(crate) on_close: CloseHandler,
}

impl WsEndpoint {
    pub(crate) fn new(
        on_connect: ConnectHandler,
        on_data: DataHandler,
        on_close: CloseHandler,
    ) -> Self {
        Self {
            on_connect,
            on_data,
            on_close,
        }
    }
}
