//! Server façade tying the dispatcher, the WebSocket route table, and the
//! live client registry together.
//!
//! The transport engine delivers one HTTP callback and four WebSocket
//! callbacks into this type; application code registers handlers before
//! traffic starts and may take [`Server::lock`] at any time to push
//! unsolicited messages to live connections.

use std::io;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::dispatcher::{DispatchOutcome, Dispatcher, Request};
use crate::error::PatternError;
use crate::router::RouteTable;
use crate::server::response::ResponseBuilder;
use crate::transport::{FrameSink, ResponseSink};
use crate::ws::{
    ClientRegistry, ConnHandle, Opcode, RegistryGuard, WsConn, WsEndpoint, WsMessage,
};

/// Routing and connection-lifecycle layer in front of a transport engine.
///
/// All registration must happen before the engine starts delivering traffic;
/// the handler tables are read without synchronization on the hot path
/// (design contract, same as populate-before-serve route loading).
pub struct Server {
    http: Dispatcher,
    ws_routes: RouteTable<WsEndpoint>,
    clients: ClientRegistry,
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}

impl Server {
    /// Create a server with empty handler tables and no live connections.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: Dispatcher::new(),
            ws_routes: RouteTable::new(),
            clients: ClientRegistry::new(),
        }
    }

    // --- registration -----------------------------------------------------

    /// Register an HTTP handler for any method on paths matching
    /// `path_pattern` (a full-string, case-sensitive regex).
    pub fn add_handler<F>(&mut self, path_pattern: &str, handler: F) -> Result<(), PatternError>
    where
        F: Fn(&Request<'_>, &mut ResponseBuilder) -> bool + Send + Sync + 'static,
    {
        self.http.register(path_pattern, handler)
    }

    /// Register an HTTP handler for methods matching `method_pattern`
    /// (full-string, case-insensitive regex) on paths matching
    /// `path_pattern`.
    pub fn add_handler_for<F>(
        &mut self,
        method_pattern: &str,
        path_pattern: &str,
        handler: F,
    ) -> Result<(), PatternError>
    where
        F: Fn(&Request<'_>, &mut ResponseBuilder) -> bool + Send + Sync + 'static,
    {
        self.http.register_for_method(method_pattern, path_pattern, handler)
    }

    /// Register a WebSocket endpoint for upgrade paths matching
    /// `path_pattern`.
    ///
    /// `on_connect` runs once per accepted connection before any data,
    /// `on_data` once per inbound frame, `on_close` exactly once before the
    /// client leaves the registry.
    pub fn add_websocket_handler<C, D, X>(
        &mut self,
        path_pattern: &str,
        on_connect: C,
        on_data: D,
        on_close: X,
    ) -> Result<(), PatternError>
    where
        C: Fn(&WsConn) + Send + Sync + 'static,
        D: Fn(&WsConn, &WsMessage<'_>) + Send + Sync + 'static,
        X: Fn(&WsConn) + Send + Sync + 'static,
    {
        let endpoint = WsEndpoint::new(Box::new(on_connect), Box::new(on_data), Box::new(on_close));
        self.ws_routes.register(None, path_pattern, endpoint)?;
        info!(
            path_pattern,
            total_endpoints = self.ws_routes.len(),
            "websocket handler registered"
        );
        Ok(())
    }

    // --- inbound events from the transport engine -------------------------

    /// One incoming HTTP request. See
    /// [`Dispatcher::dispatch`](crate::dispatcher::Dispatcher::dispatch).
    pub fn on_http_request(
        &self,
        method: &str,
        path: &str,
        query: &str,
        sink: &mut dyn ResponseSink,
    ) -> io::Result<DispatchOutcome> {
        self.http.dispatch(method, path, query, sink)
    }

    /// A WebSocket upgrade request for `path`, carrying the engine's
    /// per-connection frame sink.
    ///
    /// Returns the issued handle when an endpoint matched (accept the
    /// upgrade; the engine keys all later events for this connection by the
    /// handle) or `None` when no endpoint matched (reject the upgrade; no
    /// further events may follow).
    pub fn on_ws_connect(&self, path: &str, sink: Arc<dyn FrameSink>) -> Option<ConnHandle> {
        let Some(m) = self.ws_routes.find_path(path) else {
            debug!(path, "no websocket endpoint matched, rejecting upgrade");
            return None;
        };

        let handle = self.clients.issue_handle();
        self.clients.insert(WsConn::new(handle, sink), m.entry);
        info!(%handle, path, "websocket client connected");
        Some(handle)
    }

    /// The connection for `handle` completed its upgrade. Runs the matched
    /// endpoint's `on_connect` callback (outside the registry lock, but
    /// serialized per connection by the engine), then marks the client
    /// ready.
    pub fn on_ws_ready(&self, handle: ConnHandle) {
        let Some(snap) = self.clients.snapshot(handle) else {
            error!(%handle, "ready event for unknown connection");
            debug_assert!(false, "ready event for unknown connection");
            return;
        };
        debug_assert!(!snap.ready, "duplicate ready event for {handle}");

        (snap.endpoint.payload().on_connect)(&snap.conn);
        self.clients.set_ready(handle);
    }

    /// One inbound data frame for `handle`. `frame_flags` is the frame's
    /// flag byte; the opcode is its low 4 bits.
    pub fn on_ws_data(&self, handle: ConnHandle, frame_flags: u8, payload: &[u8]) {
        let Some(opcode) = Opcode::from_frame_flags(frame_flags) else {
            error!(%handle, frame_flags, "reserved opcode in data frame");
            debug_assert!(false, "reserved opcode in data frame");
            return;
        };
        let Some(snap) = self.clients.snapshot(handle) else {
            error!(%handle, "data event for unknown connection");
            debug_assert!(false, "data event for unknown connection");
            return;
        };
        debug_assert!(snap.ready, "data event before ready for {handle}");

        let message = WsMessage::new(payload, opcode);
        (snap.endpoint.payload().on_data)(&snap.conn, &message);
    }

    /// The connection for `handle` closed. Runs `on_close` first, then
    /// removes the client from the registry; afterwards the handle is no
    /// longer resolvable and external sends targeting it fail softly.
    pub fn on_ws_close(&self, handle: ConnHandle) {
        let Some(snap) = self.clients.snapshot(handle) else {
            error!(%handle, "close event for unknown connection");
            debug_assert!(false, "close event for unknown connection");
            return;
        };

        (snap.endpoint.payload().on_close)(&snap.conn);

        let removed = self.clients.remove(handle);
        debug_assert!(removed, "close raced another removal for {handle}");
        info!(%handle, "websocket client disconnected");
    }

    // --- application surface ----------------------------------------------

    /// Acquire the global lock for the duration of a lookup plus any
    /// subsequent sends, e.g. a periodic broadcaster iterating live
    /// handles from outside any callback.
    #[must_use]
    pub fn lock(&self) -> ServerLock<'_> {
        ServerLock {
            guard: self.clients.lock(),
        }
    }

    /// Number of live WebSocket connections.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.clients.len()
    }
}

/// Scoped acquisition of the global lock.
///
/// While held, no connection can be added to or removed from the registry,
/// so iterating and sending cannot race a concurrent close. Dropping the
/// guard releases the lock.
pub struct ServerLock<'a> {
    guard: RegistryGuard<'a>,
}

impl ServerLock<'_> {
    /// Connection wrapper for `handle`, or `None` once its close event has
    /// completed.
    #[must_use]
    pub fn connection(&self, handle: ConnHandle) -> Option<WsConn> {
        self.guard.connection(handle)
    }

    /// Handles of all live connections, in no particular order.
    pub fn handles(&self) -> impl Iterator<Item = ConnHandle> + '_ {
        self.guard.handles()
    }

    /// Number of live connections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guard.len()
    }

    /// True when no connection is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}
